//! Game settings and preferences
//!
//! Read once at startup from JSON and never written back.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming a settings file (native only)
pub const SETTINGS_ENV: &str = "BLOKSPACE_SETTINGS";

/// Why a settings file could not be used
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Start with sound off
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Visual Effects ===
    /// Blink the player while invincible
    pub invincibility_flicker: bool,

    // === Behaviour ===
    /// Pause when the window loses focus
    pub pause_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Fixed RNG seed; random per session when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,

            invincibility_flicker: true,

            pause_on_blur: false,

            show_fps: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read and parse a settings file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Clamp volumes into range
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Load settings from the file named by `BLOKSPACE_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path);
                Self::default()
            }
        }
    }

    /// Web builds have no settings source
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        log::info!("Using default settings");
        Self::default()
    }
}

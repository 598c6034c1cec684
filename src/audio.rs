//! Audio system using Web Audio API
//!
//! Every cue is one sine sweep with an exponential decay, generated on the fly.
//! Native builds have no audio backend and only log the cues.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;

/// Gain the envelope decays to before the oscillator stops
pub const DECAY_FLOOR: f32 = 0.01;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player fired
    Shoot,
    /// Enemy destroyed
    Hit,
    /// Player lost a life
    PlayerHit,
}

/// Frequency sweep and envelope for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    /// Seconds
    pub duration: f64,
    pub gain: f32,
}

impl SoundCue {
    pub fn tone(self) -> Tone {
        match self {
            SoundCue::Shoot => Tone {
                start_hz: 800.0,
                end_hz: 400.0,
                duration: 0.1,
                gain: 0.1,
            },
            SoundCue::Hit => Tone {
                start_hz: 300.0,
                end_hz: 100.0,
                duration: 0.2,
                gain: 0.2,
            },
            SoundCue::PlayerHit => Tone {
                start_hz: 200.0,
                end_hz: 50.0,
                duration: 0.5,
                gain: 0.3,
            },
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: Self::create_context(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    #[cfg(target_arch = "wasm32")]
    fn create_context() -> Option<AudioContext> {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        ctx
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue. Never fails; problems are logged and dropped.
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        {
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if Self::play_tone(ctx, cue.tone(), vol).is_none() {
                log::warn!("Failed to play {:?}", cue);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        log::debug!("cue {:?} at volume {:.2}", cue, vol);
    }

    #[cfg(target_arch = "wasm32")]
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    #[cfg(target_arch = "wasm32")]
    fn play_tone(ctx: &AudioContext, tone: Tone, vol: f32) -> Option<()> {
        let (osc, gain) = Self::create_osc(ctx, tone.start_hz)?;
        let t = ctx.current_time();
        let end = t + tone.duration;

        osc.frequency().set_value_at_time(tone.start_hz, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.end_hz, end)
            .ok()?;
        gain.gain().set_value_at_time(tone.gain * vol, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(DECAY_FLOOR, end)
            .ok()?;

        osc.start().ok()?;
        osc.stop_with_when(end).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_tones() {
        let shoot = SoundCue::Shoot.tone();
        assert_eq!((shoot.start_hz, shoot.end_hz), (800.0, 400.0));
        assert_eq!(shoot.duration, 0.1);

        let hit = SoundCue::Hit.tone();
        assert_eq!((hit.start_hz, hit.end_hz, hit.gain), (300.0, 100.0, 0.2));

        let player_hit = SoundCue::PlayerHit.tone();
        assert_eq!(player_hit.duration, 0.5);
        assert_eq!(player_hit.gain, 0.3);
    }

    #[test]
    fn test_every_tone_decays_above_floor() {
        for cue in [SoundCue::Shoot, SoundCue::Hit, SoundCue::PlayerHit] {
            let tone = cue.tone();
            assert!(tone.gain > DECAY_FLOOR);
            assert!(tone.end_hz > 0.0 && tone.end_hz < tone.start_hz);
        }
    }

    #[test]
    fn test_volume_and_mute() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        assert_eq!(audio.effective_volume(), 0.5);

        assert!(audio.toggle_muted());
        assert_eq!(audio.effective_volume(), 0.0);
        assert!(!audio.toggle_muted());
        assert_eq!(audio.effective_volume(), 0.5);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            muted: true,
            master_volume: 0.3,
            ..Default::default()
        };
        let audio = AudioManager::from_settings(&settings);
        assert!(audio.is_muted());
        audio.play(SoundCue::Hit);
    }
}

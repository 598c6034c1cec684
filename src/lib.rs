//! BlokSpace - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entity pools, collisions, spawning, game state)
//! - `frontend`: Presentation adapter seam (render, HUD, sound cues)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural sound cues
//! - `platform`: Keyboard/touch input mapping
//! - `settings`: Runtime configuration

pub mod audio;
pub mod frontend;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use frontend::{Headless, Hud, Presenter, present};
pub use settings::Settings;

/// Game configuration constants
///
/// Distances are world units (nominally pixels), speeds are units per tick,
/// and timers are milliseconds.
pub mod consts {
    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const STARTING_LIVES: i32 = 3;
    pub const STARTING_LEVEL: u32 = 1;

    /// Player bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 8.0;
    pub const SHOOT_COOLDOWN_MS: f64 = 150.0;

    /// Enemy bullets
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 25.0;
    /// Spawn x range is computed against this margin, not the enemy size
    pub const ENEMY_SPAWN_MARGIN: f32 = 30.0;
    pub const ENEMY_SPAWN_Y_MIN: f32 = 50.0;
    pub const ENEMY_SPAWN_Y_RANGE: f32 = 200.0;
    pub const ENEMY_SPEED_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_RANGE: f32 = 2.0;
    /// Vertical drop when an enemy bounces off a side wall
    pub const ENEMY_DROP: f32 = 20.0;
    pub const ENEMY_SHOOT_DELAY_MIN_MS: f64 = 1000.0;
    pub const ENEMY_SHOOT_DELAY_RANGE_MS: f64 = 2000.0;

    /// Spawn cadence
    pub const INITIAL_ENEMIES: usize = 5;
    pub const ENEMY_SPAWN_DELAY_MS: f64 = 2000.0;
    /// Trickle spawning stops at this many live enemies
    pub const ENEMY_TRICKLE_CAP: usize = 8;
    /// Chance of an immediate replacement after a kill
    pub const ENEMY_REPLACEMENT_CHANCE: f64 = 0.6;

    /// Combat
    pub const KILL_SCORE: u64 = 100;
    pub const INVINCIBILITY_MS: f64 = 1000.0;

    /// Explosion particles
    pub const EXPLOSION_PARTICLES: usize = 8;
    pub const PARTICLE_LIFE: u32 = 30;
    /// Velocity components are drawn from [-SPREAD/2, SPREAD/2)
    pub const PARTICLE_SPREAD: f32 = 8.0;
    pub const PARTICLE_SIZE_MIN: f32 = 3.0;
    pub const PARTICLE_SIZE_RANGE: f32 = 3.0;

    /// Pool caps
    pub const MAX_BULLETS: usize = 20;
    pub const MAX_ENEMY_BULLETS: usize = 30;
    pub const MAX_PARTICLES: usize = 50;

    /// Invincibility flicker slot length (toggles at ~10 Hz)
    pub const FLICKER_SLOT_MS: f64 = 100.0;
    pub const FLICKER_ALPHA: f32 = 0.5;

    /// Player gun sprite, centered above the body
    pub const GUN_WIDTH: f32 = 4.0;
    pub const GUN_HEIGHT: f32 = 8.0;
    pub const GUN_RISE: f32 = 5.0;

    /// Static starfield (fixed lattice, 1x1 stars)
    pub const STAR_COUNT: u32 = 50;
    pub const STAR_STEP_X: u32 = 137;
    pub const STAR_STEP_Y: u32 = 211;

    /// Entity colors (0xRRGGBB)
    pub const PLAYER_COLOR: u32 = 0x00ff00;
    pub const PLAYER_GUN_COLOR: u32 = 0x888888;
    pub const BULLET_COLOR: u32 = 0x00ffff;
    pub const ENEMY_COLOR: u32 = 0xff4444;
    pub const ENEMY_BULLET_COLOR: u32 = 0xff8800;
    pub const BACKGROUND_COLOR: u32 = 0x000011;
    pub const STAR_COLOR: u32 = 0xffffff;
}

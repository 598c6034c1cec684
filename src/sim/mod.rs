//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Side effects leave only through queued `GameEvent`s

pub mod collision;
pub mod combat;
pub mod player;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use player::MoveIntent;
pub use pool::Pool;
pub use state::{
    Bullet, Enemy, EnemyBullet, GameEvent, GamePhase, GameState, Particle, Player, WorldBounds,
};
pub use tick::{TickInput, tick, toggle_pause};

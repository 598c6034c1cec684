//! Enemy spawning cadences
//!
//! Two independent sources: a fixed batch at session start/reset, and a
//! timer-driven trickle during play.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState, random_shoot_delay};
use crate::consts::*;

/// Spawn one enemy at a random spot in the top band of the world
pub fn spawn_enemy(state: &mut GameState) {
    let id = state.next_entity_id();
    let span_x = (state.world.width - ENEMY_SPAWN_MARGIN).max(0.0);
    let rng = &mut state.rng;

    let enemy = Enemy {
        id,
        pos: Vec2::new(
            rng.random::<f32>() * span_x,
            ENEMY_SPAWN_Y_MIN + rng.random::<f32>() * ENEMY_SPAWN_Y_RANGE,
        ),
        size: Vec2::splat(ENEMY_SIZE),
        speed: ENEMY_SPEED_MIN + rng.random::<f32>() * ENEMY_SPEED_RANGE,
        direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        color: ENEMY_COLOR,
        shoot_timer: 0.0,
        shoot_delay: random_shoot_delay(rng),
    };

    log::debug!(
        "Enemy {} spawned at ({:.0}, {:.0})",
        enemy.id,
        enemy.pos.x,
        enemy.pos.y
    );
    state.enemies.spawn(enemy);
}

/// Opening batch for a fresh or reset session
pub fn seed_initial_enemies(state: &mut GameState) {
    for _ in 0..INITIAL_ENEMIES {
        spawn_enemy(state);
    }
}

/// Advance the trickle timer; at each threshold add one enemy unless the
/// arena already holds the trickle cap. The timer resets either way.
pub fn trickle(state: &mut GameState, dt_ms: f64) {
    state.enemy_spawn_timer += dt_ms;
    if state.enemy_spawn_timer >= ENEMY_SPAWN_DELAY_MS {
        if state.enemies.len() < ENEMY_TRICKLE_CAP {
            spawn_enemy(state);
        }
        state.enemy_spawn_timer = 0.0;
    }
}

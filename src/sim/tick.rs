//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one display refresh.

use super::combat::resolve_collisions;
use super::player::{MoveIntent, apply_movement, try_shoot};
use super::spawn::trickle;
use super::state::{EnemyBullet, GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions, merged across keyboard and touch
    pub movement: MoveIntent,
    /// Fire a bullet (one-shot)
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Start a fresh session (one-shot)
    pub reset: bool,
}

/// Advance the game state by one frame
///
/// `now_ms` is the monotonic wall clock; `dt_ms` is the time elapsed since
/// the previous call.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64, dt_ms: f64) {
    // Invincibility runs on the wall clock, so it expires in every phase
    state.player.expire_invincibility(now_ms);

    if input.reset {
        state.reset();
    }

    if input.pause {
        toggle_pause(state);
    }

    if input.fire {
        try_shoot(state);
    }

    // Don't tick if paused or game over
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;

    if state.shoot_cooldown > 0.0 {
        state.shoot_cooldown -= dt_ms;
    }

    apply_movement(&mut state.player, input.movement, &state.world);
    advance_pools(state, dt_ms);
    resolve_collisions(state, now_ms);
    trickle(state, dt_ms);
    limit_pool_sizes(state);
}

/// Flip between playing and paused; ignored once the game is over
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
            log::info!("Paused");
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.push_event(GameEvent::Resumed);
            log::info!("Resumed");
        }
        GamePhase::GameOver => {}
    }
}

/// Move every entity and drop the ones that left the world or burned out
///
/// Enemies advance before enemy bullets, so a bullet fired this tick also
/// moves this tick.
fn advance_pools(state: &mut GameState, dt_ms: f64) {
    state.bullets.advance(|b| b.advance());
    state.bullets.cull(|b| b.is_live());

    let mut muzzles = Vec::new();
    {
        let world = state.world;
        let rng = &mut state.rng;
        state.enemies.advance(|enemy| {
            if let Some(muzzle) = enemy.advance(dt_ms, &world, rng) {
                muzzles.push(muzzle);
            }
        });
    }
    for muzzle in muzzles {
        let id = state.next_entity_id();
        state.enemy_bullets.spawn(EnemyBullet::new(id, muzzle));
    }

    let world = state.world;
    state.enemy_bullets.advance(|b| b.advance());
    state.enemy_bullets.cull(|b| b.is_live(&world));

    state.particles.advance(|p| p.advance());
    state.particles.cull(|p| p.is_live());
}

/// Trim capped pools, oldest first
fn limit_pool_sizes(state: &mut GameState) {
    state.bullets.cap();
    state.enemy_bullets.cap();
    state.particles.cap();
}

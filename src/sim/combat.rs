//! Collision resolution between entity pools
//!
//! Runs once per playing tick, in a fixed order:
//! 1. player bullets vs enemies
//! 2. enemy bullets vs player
//! 3. enemies vs player (skipped while invincible)

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::spawn::spawn_enemy;
use super::state::{GameEvent, GamePhase, GameState, Particle};
use crate::consts::*;

/// Resolve every collision for this tick
pub fn resolve_collisions(state: &mut GameState, now_ms: f64) {
    bullets_vs_enemies(state);
    enemy_bullets_vs_player(state, now_ms);
    enemies_vs_player(state, now_ms);
}

/// Scan bullets and enemies newest-first. A bullet destroys at most one enemy.
fn bullets_vs_enemies(state: &mut GameState) {
    let mut bi = state.bullets.len();
    while bi > 0 {
        bi -= 1;
        let bullet_rect = state.bullets.as_slice()[bi].rect();

        let mut ei = state.enemies.len();
        while ei > 0 {
            ei -= 1;
            if !overlaps(&bullet_rect, &state.enemies.as_slice()[ei].rect()) {
                continue;
            }

            state.bullets.remove(bi);
            let enemy = state.enemies.remove(ei);

            state.score += KILL_SCORE;
            let at = enemy.center();
            spawn_explosion(state, at, enemy.color);
            state.push_event(GameEvent::EnemyDestroyed { at });
            log::debug!("Enemy {} destroyed, score {}", enemy.id, state.score);

            if state.rng.random_bool(ENEMY_REPLACEMENT_CHANCE) {
                spawn_enemy(state);
            }
            break;
        }
    }
}

/// Enemy bullets always hit, invincible or not
fn enemy_bullets_vs_player(state: &mut GameState, now_ms: f64) {
    let player_rect = state.player.rect();
    let mut i = state.enemy_bullets.len();
    while i > 0 {
        i -= 1;
        if overlaps(&state.enemy_bullets.as_slice()[i].rect(), &player_rect) {
            state.enemy_bullets.remove(i);
            damage_player(state, now_ms);
        }
    }
}

/// Contact damage; the enemy survives the collision.
///
/// Invincibility is sampled once, so several enemies touching the player in
/// the same tick each cost a life.
fn enemies_vs_player(state: &mut GameState, now_ms: f64) {
    if state.player.invincible {
        return;
    }

    let player_rect = state.player.rect();
    let hits = state
        .enemies
        .iter()
        .filter(|enemy| overlaps(&enemy.rect(), &player_rect))
        .count();

    for _ in 0..hits {
        damage_player(state, now_ms);
    }
}

/// Take a life, burst particles, and start an invincibility window
fn damage_player(state: &mut GameState, now_ms: f64) {
    state.lives -= 1;
    let at = state.player.rect().center();
    spawn_explosion(state, at, PLAYER_COLOR);
    state.push_event(GameEvent::PlayerHit {
        at,
        lives: state.lives,
    });
    state.player.make_invincible(now_ms);
    log::debug!("Player hit, {} lives left", state.lives);

    if state.lives <= 0 && state.phase != GamePhase::GameOver {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
    }
}

/// Burst of particles flying out from `at`
pub fn spawn_explosion(state: &mut GameState, at: Vec2, color: u32) {
    for _ in 0..EXPLOSION_PARTICLES {
        let id = state.next_entity_id();
        let rng = &mut state.rng;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        let size = PARTICLE_SIZE_MIN + rng.random::<f32>() * PARTICLE_SIZE_RANGE;
        state.particles.spawn(Particle {
            id,
            pos: at,
            vel,
            color,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            alpha: 1.0,
            size,
        });
    }
}

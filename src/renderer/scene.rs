//! Scene assembly: game state to colored triangles in world coordinates

use glam::Vec2;

use super::shapes::{rect, square_centered};
use super::vertex::{Vertex, rgba};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, WorldBounds};

/// Player alpha for this wall-clock instant
///
/// Odd 100 ms slots are dimmed while invincible.
pub fn player_alpha(invincible: bool, now_ms: f64, flicker: bool) -> f32 {
    let odd_slot = (now_ms / FLICKER_SLOT_MS).floor() as i64 % 2 != 0;
    if invincible && flicker && odd_slot {
        FLICKER_ALPHA
    } else {
        1.0
    }
}

/// Star positions for the current world size
pub fn star_positions(world: &WorldBounds) -> impl Iterator<Item = Vec2> {
    let w = (world.width.max(1.0)) as u32;
    let h = (world.height.max(1.0)) as u32;
    (0..STAR_COUNT).map(move |i| {
        Vec2::new(
            ((i * STAR_STEP_X) % w) as f32,
            ((i * STAR_STEP_Y) % h) as f32,
        )
    })
}

/// Build every triangle for one frame, back to front
pub fn build_scene(state: &GameState, now_ms: f64, settings: &Settings) -> Vec<Vertex> {
    let entity_count = 3
        + STAR_COUNT as usize
        + state.bullets.len()
        + state.enemies.len()
        + state.enemy_bullets.len()
        + state.particles.len();
    let mut out = Vec::with_capacity(entity_count * 6);

    // Background
    let world = state.world;
    rect(
        &mut out,
        Vec2::ZERO,
        Vec2::new(world.width, world.height),
        rgba(BACKGROUND_COLOR, 1.0),
    );

    let star = rgba(STAR_COLOR, 1.0);
    for pos in star_positions(&world) {
        rect(&mut out, pos, Vec2::ONE, star);
    }

    // Player body and gun share the flicker alpha
    let player = &state.player;
    let alpha = player_alpha(player.invincible, now_ms, settings.invincibility_flicker);
    rect(&mut out, player.pos, player.size, rgba(player.color, alpha));
    let gun_pos = Vec2::new(
        player.pos.x + player.size.x / 2.0 - GUN_WIDTH / 2.0,
        player.pos.y - GUN_RISE,
    );
    rect(
        &mut out,
        gun_pos,
        Vec2::new(GUN_WIDTH, GUN_HEIGHT),
        rgba(PLAYER_GUN_COLOR, alpha),
    );

    for bullet in &state.bullets {
        rect(&mut out, bullet.pos, bullet.size, rgba(bullet.color, 1.0));
    }
    for enemy in &state.enemies {
        rect(&mut out, enemy.pos, enemy.size, rgba(enemy.color, 1.0));
    }
    for bullet in &state.enemy_bullets {
        rect(&mut out, bullet.pos, bullet.size, rgba(bullet.color, 1.0));
    }
    for particle in &state.particles {
        square_centered(
            &mut out,
            particle.pos,
            particle.size,
            rgba(particle.color, particle.alpha),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Bullet;

    const QUAD: usize = 6;

    #[test]
    fn test_flicker_slots() {
        assert_eq!(player_alpha(true, 50.0, true), 1.0);
        assert_eq!(player_alpha(true, 150.0, true), 0.5);
        assert_eq!(player_alpha(true, 250.0, true), 1.0);
        assert_eq!(player_alpha(false, 150.0, true), 1.0);
        assert_eq!(player_alpha(true, 150.0, false), 1.0);
    }

    #[test]
    fn test_star_lattice() {
        let stars: Vec<Vec2> = star_positions(&WorldBounds::default()).collect();
        assert_eq!(stars.len(), 50);
        assert_eq!(stars[0], Vec2::ZERO);
        assert_eq!(stars[1], Vec2::new(137.0, 211.0));
        assert_eq!(stars[6], Vec2::new(22.0, 66.0));
    }

    #[test]
    fn test_scene_quad_count() {
        let mut state = GameState::new(7);
        let id = state.next_entity_id();
        state.bullets.spawn(Bullet::new(id, Vec2::new(100.0, 100.0)));

        let vertices = build_scene(&state, 0.0, &Settings::default());
        // background + stars + body + gun + bullet + 5 enemies
        assert_eq!(vertices.len(), (1 + 50 + 2 + 1 + 5) * QUAD);
    }

    #[test]
    fn test_player_drawn_with_gun() {
        let mut state = GameState::new(7);
        state.enemies.clear();
        let vertices = build_scene(&state, 0.0, &Settings::default());

        let body = &vertices[51 * QUAD..52 * QUAD];
        assert_eq!(body[0].position, [400.0, 500.0]);
        assert_eq!(body[0].color, rgba(PLAYER_COLOR, 1.0));

        let gun = &vertices[52 * QUAD..53 * QUAD];
        assert_eq!(gun[0].position, [413.0, 495.0]);
        assert_eq!(gun[4].position, [417.0, 503.0]);
    }

    #[test]
    fn test_invincible_player_dims_on_odd_slot() {
        let mut state = GameState::new(7);
        state.enemies.clear();
        state.player.make_invincible(0.0);

        let vertices = build_scene(&state, 120.0, &Settings::default());
        assert_eq!(vertices[51 * QUAD].color[3], 0.5);
        assert_eq!(vertices[52 * QUAD].color[3], 0.5);

        let steady = Settings {
            invincibility_flicker: false,
            ..Default::default()
        };
        let vertices = build_scene(&state, 120.0, &steady);
        assert_eq!(vertices[51 * QUAD].color[3], 1.0);
    }

    #[test]
    fn test_particles_centered_with_alpha() {
        let mut state = GameState::new(7);
        state.enemies.clear();
        crate::sim::combat::spawn_explosion(&mut state, Vec2::new(200.0, 200.0), ENEMY_COLOR);
        for particle in state.particles.iter_mut() {
            particle.alpha = 0.25;
        }

        let vertices = build_scene(&state, 0.0, &Settings::default());
        assert_eq!(vertices.len(), (1 + 50 + 2 + 8) * QUAD);

        let first = &vertices[53 * QUAD..54 * QUAD];
        let particle = state.particles.get(0).unwrap();
        let half = particle.size / 2.0;
        assert_eq!(first[0].position, [200.0 - half, 200.0 - half]);
        assert_eq!(first[0].color[3], 0.25);
    }
}

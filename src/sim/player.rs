//! Player movement and firing

use super::state::{Bullet, GameEvent, GameState, Player, WorldBounds};
use crate::consts::SHOOT_COOLDOWN_MS;

/// Directional intents for one tick (already merged across input sources)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveIntent {
    /// Merge two sources: a direction is active if either source holds it
    pub fn merge(self, other: MoveIntent) -> MoveIntent {
        MoveIntent {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// Move the player by each active intent, clamped to the world.
///
/// Axes are independent, so diagonal movement covers more ground.
pub fn apply_movement(player: &mut Player, intent: MoveIntent, world: &WorldBounds) {
    let max_x = world.width - player.size.x;
    let max_y = world.height - player.size.y;

    if intent.left {
        player.pos.x = (player.pos.x - player.speed).max(0.0);
    }
    if intent.right {
        player.pos.x = (player.pos.x + player.speed).min(max_x);
    }
    if intent.up {
        player.pos.y = (player.pos.y - player.speed).max(0.0);
    }
    if intent.down {
        player.pos.y = (player.pos.y + player.speed).min(max_y);
    }
}

/// Fire a bullet if allowed; returns whether one was spawned.
///
/// Silently refuses while not playing, while cooling down, or at the bullet cap.
pub fn try_shoot(state: &mut GameState) -> bool {
    if !state.is_playing() || state.shoot_cooldown > 0.0 || state.bullets.is_full() {
        return false;
    }

    let id = state.next_entity_id();
    let muzzle = state.player.muzzle();
    state.bullets.spawn(Bullet::new(id, muzzle));
    state.push_event(GameEvent::Shot);
    state.shoot_cooldown = SHOOT_COOLDOWN_MS;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use glam::Vec2;

    fn intent(left: bool, right: bool, up: bool, down: bool) -> MoveIntent {
        MoveIntent {
            left,
            right,
            up,
            down,
        }
    }

    #[test]
    fn test_moves_by_speed() {
        let world = WorldBounds::default();
        let mut player = Player::default();
        apply_movement(&mut player, intent(true, false, true, false), &world);
        assert_eq!(player.pos, Vec2::new(395.0, 495.0));
    }

    #[test]
    fn test_clamped_to_world() {
        let world = WorldBounds::default();
        let mut player = Player::default();

        player.pos = Vec2::new(2.0, 3.0);
        apply_movement(&mut player, intent(true, false, true, false), &world);
        assert_eq!(player.pos, Vec2::ZERO);

        player.pos = Vec2::new(768.0, 568.0);
        apply_movement(&mut player, intent(false, true, false, true), &world);
        assert_eq!(player.pos, Vec2::new(770.0, 570.0));
    }

    #[test]
    fn test_opposite_intents_cancel() {
        let world = WorldBounds::default();
        let mut player = Player::default();
        apply_movement(&mut player, intent(true, true, false, false), &world);
        assert_eq!(player.pos.x, 400.0);
    }

    #[test]
    fn test_merge_is_logical_or() {
        let keys = intent(true, false, false, false);
        let touch = intent(true, false, false, true);
        let merged = keys.merge(touch);
        assert_eq!(merged, intent(true, false, false, true));

        // Both sources holding left still moves only once
        let world = WorldBounds::default();
        let mut player = Player::default();
        apply_movement(&mut player, merged, &world);
        assert_eq!(player.pos, Vec2::new(395.0, 505.0));
    }

    #[test]
    fn test_clamp_follows_resized_world() {
        let mut world = WorldBounds::default();
        world.width = 300.0;
        let mut player = Player::default();
        apply_movement(&mut player, intent(false, true, false, false), &world);
        assert_eq!(player.pos.x, 270.0);
    }

    #[test]
    fn test_shoot_spawns_at_muzzle() {
        let mut state = GameState::new(1);
        assert!(try_shoot(&mut state));
        let bullet = state.bullets.get(0).unwrap();
        assert_eq!(bullet.pos, Vec2::new(413.0, 500.0));
        assert_eq!(state.shoot_cooldown, 150.0);
        assert_eq!(state.events(), &[GameEvent::Shot]);
    }

    #[test]
    fn test_shoot_gated_by_cooldown() {
        let mut state = GameState::new(1);
        assert!(try_shoot(&mut state));
        assert!(!try_shoot(&mut state));
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_shoot_gated_by_phase() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Paused;
        assert!(!try_shoot(&mut state));
        state.phase = GamePhase::GameOver;
        assert!(!try_shoot(&mut state));
        assert!(state.bullets.is_empty());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_shoot_gated_by_bullet_cap() {
        let mut state = GameState::new(1);
        for _ in 0..20 {
            state.shoot_cooldown = 0.0;
            assert!(try_shoot(&mut state));
        }
        state.shoot_cooldown = 0.0;
        assert!(!try_shoot(&mut state));
        assert_eq!(state.bullets.len(), 20);
    }
}

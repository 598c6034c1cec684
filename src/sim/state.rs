//! Game state and core simulation types
//!
//! The whole session lives in [`GameState`]; the tick functions take it by
//! mutable reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::pool::Pool;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended (only reset leaves this phase)
    GameOver,
}

/// Something the presentation layer should react to after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player fired a bullet
    Shot,
    /// A player bullet destroyed an enemy centered at `at`
    EnemyDestroyed { at: Vec2 },
    /// The player lost a life
    PlayerHit { at: Vec2, lives: i32 },
    /// Lives ran out
    GameOver { score: u64 },
    Paused,
    Resumed,
    /// Session was reinitialized
    Reset,
}

/// Playable area; the core clamps against whatever the current value is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: u32,
    pub invincible: bool,
    /// Wall-clock deadlines (ms) at which the invincible flag clears.
    /// Every hit arms its own deadline; the earliest one to pass clears the flag.
    pub invincibility_deadlines: Vec<f64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
            color: PLAYER_COLOR,
            invincible: false,
            invincibility_deadlines: Vec::new(),
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Grant invincibility until `now_ms + INVINCIBILITY_MS`
    pub fn make_invincible(&mut self, now_ms: f64) {
        self.invincible = true;
        self.invincibility_deadlines.push(now_ms + INVINCIBILITY_MS);
    }

    /// Drop passed deadlines; the flag clears if any deadline has passed
    pub fn expire_invincibility(&mut self, now_ms: f64) {
        let before = self.invincibility_deadlines.len();
        self.invincibility_deadlines.retain(|&deadline| deadline > now_ms);
        if self.invincibility_deadlines.len() < before {
            self.invincible = false;
        }
    }

    /// Where fired bullets appear
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0, self.pos.y)
    }
}

/// A player-fired bullet
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: u32,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
            color: BULLET_COLOR,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    /// Still on screen (not yet past the top edge)
    pub fn is_live(&self) -> bool {
        self.pos.y > -self.size.y
    }
}

/// A bullet fired by an enemy
#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: u32,
}

impl EnemyBullet {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
            speed: ENEMY_BULLET_SPEED,
            color: ENEMY_BULLET_COLOR,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    /// Still on screen (not yet past the bottom edge)
    pub fn is_live(&self, world: &WorldBounds) -> bool {
        self.pos.y < world.height + self.size.y
    }
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub color: u32,
    pub shoot_timer: f64,
    pub shoot_delay: f64,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Where this enemy's bullets appear (base-center)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0 - ENEMY_BULLET_WIDTH / 2.0,
            self.pos.y + self.size.y,
        )
    }

    /// Move sideways, bounce off the walls, and run the shoot cadence.
    ///
    /// Returns the muzzle position when the enemy fires this tick.
    pub fn advance<R: Rng>(&mut self, dt_ms: f64, world: &WorldBounds, rng: &mut R) -> Option<Vec2> {
        self.pos.x += self.direction * self.speed;

        if self.pos.x <= 0.0 || self.pos.x >= world.width - self.size.x {
            self.direction = -self.direction;
            self.pos.y += ENEMY_DROP;
        }

        self.shoot_timer += dt_ms;
        if self.shoot_timer >= self.shoot_delay {
            self.shoot_timer = 0.0;
            self.shoot_delay = random_shoot_delay(rng);
            return Some(self.muzzle());
        }

        None
    }
}

/// Sample an enemy shoot delay from [1000, 3000) ms
pub fn random_shoot_delay<R: Rng>(rng: &mut R) -> f64 {
    ENEMY_SHOOT_DELAY_MIN_MS + rng.random::<f64>() * ENEMY_SHOOT_DELAY_RANGE_MS
}

/// A particle for explosion effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub max_life: u32,
    pub alpha: f32,
    pub size: f32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.alpha = self.life as f32 / self.max_life as f32;
    }

    pub fn is_live(&self) -> bool {
        self.life > 0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub score: u64,
    /// Signed: several hits in one tick can take this below zero
    pub lives: i32,
    /// Displayed but never advanced
    pub level: u32,
    pub world: WorldBounds,
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<EnemyBullet>,
    pub enemies: Pool<Enemy>,
    pub particles: Pool<Particle>,
    /// Trickle spawn accumulator (ms)
    pub enemy_spawn_timer: f64,
    /// Remaining fire cooldown (ms)
    pub shoot_cooldown: f64,
    /// Playing ticks simulated so far
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed and seed the opening enemies
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            lives: STARTING_LIVES,
            level: STARTING_LEVEL,
            world: WorldBounds::default(),
            player: Player::default(),
            bullets: Pool::with_capacity(MAX_BULLETS),
            enemy_bullets: Pool::with_capacity(MAX_ENEMY_BULLETS),
            enemies: Pool::unbounded(),
            particles: Pool::with_capacity(MAX_PARTICLES),
            enemy_spawn_timer: 0.0,
            shoot_cooldown: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        super::spawn::seed_initial_enemies(&mut state);

        state
    }

    /// Reinitialize the session in place
    ///
    /// Pending invincibility deadlines and the fire cooldown are wall-clock
    /// timers and are left running.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = STARTING_LEVEL;
        self.player.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);

        self.bullets.clear();
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.particles.clear();

        self.enemy_spawn_timer = 0.0;

        super::spawn::seed_initial_enemies(self);
        self.push_event(GameEvent::Reset);
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_world_bounds(&mut self, width: f32, height: f32) {
        self.world = WorldBounds { width, height };
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.len(), INITIAL_ENEMIES);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_entity_ids_are_unique_and_increasing() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
        let enemy_ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        assert!(enemy_ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bullet_leaves_top() {
        let mut bullet = Bullet::new(1, Vec2::new(100.0, -2.0));
        assert!(bullet.is_live());
        bullet.advance();
        assert_eq!(bullet.pos.y, -10.0);
        assert!(!bullet.is_live());
    }

    #[test]
    fn test_enemy_bullet_leaves_bottom() {
        let world = WorldBounds::default();
        let mut bullet = EnemyBullet::new(1, Vec2::new(100.0, 600.0));
        assert!(bullet.is_live(&world));
        bullet.advance();
        assert_eq!(bullet.pos.y, 604.0);
        assert!(bullet.is_live(&world));
        bullet.advance();
        assert!(!bullet.is_live(&world));
    }

    #[test]
    fn test_enemy_bounces_and_drops() {
        let world = WorldBounds::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::new(773.0, 100.0),
            size: Vec2::splat(ENEMY_SIZE),
            speed: 2.0,
            direction: 1.0,
            color: ENEMY_COLOR,
            shoot_timer: 0.0,
            shoot_delay: 5000.0,
        };

        // 775 >= 800 - 25 triggers the bounce
        assert!(enemy.advance(16.0, &world, &mut rng).is_none());
        assert_eq!(enemy.pos.x, 775.0);
        assert_eq!(enemy.direction, -1.0);
        assert_eq!(enemy.pos.y, 120.0);

        enemy.advance(16.0, &world, &mut rng);
        assert_eq!(enemy.pos.x, 773.0);
        assert_eq!(enemy.pos.y, 120.0);
    }

    #[test]
    fn test_enemy_shoot_cadence() {
        let world = WorldBounds::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::splat(ENEMY_SIZE),
            speed: 1.0,
            direction: 1.0,
            color: ENEMY_COLOR,
            shoot_timer: 990.0,
            shoot_delay: 1000.0,
        };

        let muzzle = enemy.advance(10.0, &world, &mut rng).expect("should fire");
        assert_eq!(muzzle, Vec2::new(101.0 + 12.5 - 2.0, 125.0));
        assert_eq!(enemy.shoot_timer, 0.0);
        assert!((1000.0..3000.0).contains(&enemy.shoot_delay));
    }

    #[test]
    fn test_particle_fades() {
        let mut particle = Particle {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            color: ENEMY_COLOR,
            life: 2,
            max_life: 2,
            alpha: 1.0,
            size: 4.0,
        };
        particle.advance();
        assert_eq!(particle.pos, Vec2::new(1.0, -2.0));
        assert_eq!(particle.alpha, 0.5);
        assert!(particle.is_live());
        particle.advance();
        assert!(!particle.is_live());
        assert_eq!(particle.alpha, 0.0);
    }

    #[test]
    fn test_invincibility_earliest_deadline_clears() {
        let mut player = Player::default();
        player.make_invincible(0.0);
        player.make_invincible(500.0);
        assert!(player.invincible);

        player.expire_invincibility(999.0);
        assert!(player.invincible);

        // The first hit's deadline clears the flag even though the second is pending
        player.expire_invincibility(1000.0);
        assert!(!player.invincible);
        assert_eq!(player.invincibility_deadlines, vec![1500.0]);

        player.expire_invincibility(1500.0);
        assert!(!player.invincible);
        assert!(player.invincibility_deadlines.is_empty());
    }
}

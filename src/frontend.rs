//! Presentation adapter seam
//!
//! The simulation never draws, writes text, or makes sound. It queues
//! [`GameEvent`]s during a tick; [`present`] drains them afterwards and hands
//! the results to a [`Presenter`].

use crate::audio::SoundCue;
use crate::sim::{GameEvent, GamePhase, GameState};

/// Values shown in the score/lives/level display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub lives: i32,
    pub level: u32,
    pub phase: GamePhase,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            lives: state.lives,
            level: state.level,
            phase: state.phase,
        }
    }
}

/// Everything the game loop needs from the host environment
pub trait Presenter {
    /// Draw the current frame
    fn render(&mut self, state: &GameState, now_ms: f64);

    /// Refresh the score/lives/level display
    fn update_hud(&mut self, hud: &Hud);

    /// Play a short tone; must not fail
    fn play_cue(&mut self, cue: SoundCue);

    /// Show or hide overlays (pause screen, game over screen)
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Sound cue for an event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::Shot => Some(SoundCue::Shoot),
        GameEvent::EnemyDestroyed { .. } => Some(SoundCue::Hit),
        GameEvent::PlayerHit { .. } => Some(SoundCue::PlayerHit),
        _ => None,
    }
}

/// Dispatch the effects of the last tick, then render
///
/// The HUD is refreshed every frame while playing, plus on the frame that
/// ended or restarted the session.
pub fn present<P: Presenter + ?Sized>(state: &mut GameState, presenter: &mut P, now_ms: f64) {
    let events = state.drain_events();

    let mut hud_due = state.is_playing();
    for event in &events {
        if let Some(cue) = cue_for(event) {
            presenter.play_cue(cue);
        }
        if matches!(event, GameEvent::GameOver { .. } | GameEvent::Reset) {
            hud_due = true;
        }
        presenter.on_event(event);
    }

    if hud_due {
        presenter.update_hud(&Hud::from_state(state));
    }
    presenter.render(state, now_ms);
}

/// Presenter for runs without a display (native builds, tests)
#[derive(Debug, Default)]
pub struct Headless {
    pub frames: u64,
    pub hud: Option<Hud>,
    pub cues: Vec<SoundCue>,
    pub paused_overlay: bool,
    pub game_over_overlay: Option<u64>,
    pub muted: bool,
}

impl Headless {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Default::default()
        }
    }
}

impl Presenter for Headless {
    fn render(&mut self, _state: &GameState, _now_ms: f64) {
        self.frames += 1;
    }

    fn update_hud(&mut self, hud: &Hud) {
        self.hud = Some(*hud);
    }

    fn play_cue(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        log::trace!("cue {:?}", cue);
        self.cues.push(cue);
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Paused => self.paused_overlay = true,
            GameEvent::Resumed => self.paused_overlay = false,
            GameEvent::GameOver { score } => self.game_over_overlay = Some(*score),
            GameEvent::Reset => {
                self.paused_overlay = false;
                self.game_over_overlay = None;
            }
            _ => {}
        }
    }
}

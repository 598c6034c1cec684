//! Keyboard and touch input mapping
//!
//! Held keys and held touch buttons are tracked separately and OR-merged into
//! one [`MoveIntent`] per frame. Presses that act once (fire, pause, reset,
//! mute) are buffered until the next frame takes them.

use std::collections::HashSet;

use crate::sim::{GamePhase, MoveIntent, TickInput};

/// Discrete commands from buttons, keys, or touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fire,
    Pause,
    Reset,
    Mute,
}

/// Input state gathered between frames
#[derive(Debug, Default)]
pub struct Controls {
    keys_down: HashSet<String>,
    touch_down: HashSet<String>,
    pending: TickInput,
    mute_requested: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press (`KeyboardEvent.code`).
    ///
    /// Space fires while playing and resumes while paused, judged against the
    /// phase the next tick will see once queued commands apply. Returns true
    /// when the browser's default action should be suppressed.
    pub fn key_down(&mut self, code: &str, phase: GamePhase) -> bool {
        self.keys_down.insert(code.to_string());

        match code {
            "Space" => {
                match self.effective_phase(phase) {
                    GamePhase::Playing => self.trigger(Action::Fire),
                    GamePhase::Paused => self.trigger(Action::Pause),
                    GamePhase::GameOver => {}
                }
                true
            }
            "KeyP" => {
                self.trigger(Action::Pause);
                false
            }
            "KeyR" => {
                self.trigger(Action::Reset);
                false
            }
            "KeyM" => {
                self.trigger(Action::Mute);
                false
            }
            _ => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.keys_down.remove(code);
    }

    /// Touch button pressed (`data-key` of the on-screen control)
    pub fn touch_start(&mut self, key: &str) {
        if key == "shoot" {
            self.trigger(Action::Fire);
        } else {
            self.touch_down.insert(key.to_string());
        }
    }

    pub fn touch_end(&mut self, key: &str) {
        self.touch_down.remove(key);
    }

    /// Phase after the buffered reset and pause apply, in tick order
    fn effective_phase(&self, phase: GamePhase) -> GamePhase {
        let phase = if self.pending.reset {
            GamePhase::Playing
        } else {
            phase
        };
        match (phase, self.pending.pause) {
            (GamePhase::Playing, true) => GamePhase::Paused,
            (GamePhase::Paused, true) => GamePhase::Playing,
            (phase, _) => phase,
        }
    }

    /// Make sure the next tick leaves the game paused if it would be playing.
    ///
    /// Unlike [`Action::Pause`] this never cancels a queued pause.
    pub fn force_pause(&mut self, phase: GamePhase) {
        if self.effective_phase(phase) == GamePhase::Playing {
            self.pending.pause ^= true;
        }
    }

    /// Forget every held key and touch button (focus lost)
    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.touch_down.clear();
    }

    /// Queue a one-shot command for the next frame
    pub fn trigger(&mut self, action: Action) {
        match action {
            Action::Fire => self.pending.fire = true,
            // Two presses in one frame cancel out
            Action::Pause => self.pending.pause ^= true,
            Action::Reset => self.pending.reset = true,
            Action::Mute => self.mute_requested ^= true,
        }
    }

    /// Held directions across both sources
    pub fn movement(&self) -> MoveIntent {
        let keys = MoveIntent {
            left: self.key_held(&["KeyA", "ArrowLeft"]),
            right: self.key_held(&["KeyD", "ArrowRight"]),
            up: self.key_held(&["KeyW", "ArrowUp"]),
            down: self.key_held(&["KeyS", "ArrowDown"]),
        };
        let touch = MoveIntent {
            left: self.touch_down.contains("left"),
            right: self.touch_down.contains("right"),
            up: self.touch_down.contains("up"),
            down: self.touch_down.contains("down"),
        };
        keys.merge(touch)
    }

    fn key_held(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.keys_down.contains(*code))
    }

    /// Build this frame's input, consuming buffered one-shots
    pub fn take_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.movement = self.movement();
        input
    }

    /// Whether mute was toggled since the last call
    pub fn take_mute(&mut self) -> bool {
        std::mem::take(&mut self.mute_requested)
    }
}

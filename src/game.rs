//! Host adapter
//!
//! Ties a host's key events and animation frames to a session. The host owns
//! the drawing surface and the overlay widgets; `Game` only talks to them
//! through `RenderSurface` and `UiSurface`.

use crate::config::GameConfig;
use crate::input::{InputState, Key};
use crate::render::RenderSurface;
use crate::sim::{FrameClock, GamePhase, Session, render, tick};
use crate::ui::{UiSurface, apply_events};

/// A running game: session, held keys and frame clock
#[derive(Debug, Clone)]
pub struct Game {
    pub session: Session,
    input: InputState,
    clock: FrameClock,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: Session::new(config),
            input: InputState::new(),
            clock: FrameClock::new(),
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Key went down. Confirm and Activate act on the press edge only.
    pub fn key_down(&mut self, key: Key) {
        if !self.input.press(key) {
            return;
        }
        match key {
            Key::Confirm => {
                self.session.confirm();
            }
            Key::Activate if self.session.phase() == GamePhase::Playing => {
                self.session.activate_power_up();
            }
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Browser `KeyboardEvent.code` down. Returns whether the key is one we use.
    pub fn key_down_code(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.key_down(key);
                true
            }
            None => false,
        }
    }

    /// Browser `KeyboardEvent.code` up
    pub fn key_up_code(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.key_up(key);
                true
            }
            None => false,
        }
    }

    /// One animation frame: advance, redraw, publish overlay changes
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        surface: &mut dyn RenderSurface,
        ui: &mut dyn UiSurface,
    ) {
        let dt = self.clock.advance(timestamp_ms);
        tick(&mut self.session, &self.input, dt);
        render(&self.session, surface);
        self.apply_ui(ui);
    }

    /// Flush queued overlay changes (also needed after key events)
    pub fn apply_ui(&mut self, ui: &mut dyn UiSurface) {
        apply_events(self.session.drain_ui_events(), ui);
    }
}

//! Session-wide state
//!
//! Score, lives, stage, phase and meter. Only the session controller mutates it.

use serde::{Deserialize, Serialize};

use super::meter::PowerMeter;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Active gameplay
    Playing,
    /// Lives ran out; waiting for confirm
    Over,
}

/// Aggregate session values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub stage: u32,
    pub meter: PowerMeter,
}

impl SessionState {
    /// Title-screen state
    pub fn new(max_lives: u32) -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0,
            lives: max_lives,
            stage: 1,
            meter: PowerMeter::default(),
        }
    }

    /// Fresh values for a new game
    pub fn reset(&mut self, max_lives: u32) {
        *self = Self {
            phase: GamePhase::Playing,
            ..Self::new(max_lives)
        };
    }
}

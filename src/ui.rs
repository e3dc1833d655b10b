//! HUD / overlay publishing
//!
//! The session never touches widgets. It queues `UiEvent`s in the order its state
//! changes; the host drains them and applies them to a `UiSurface`.

use serde::{Deserialize, Serialize};

use crate::sim::UpgradeKind;

/// Values shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u32,
    pub stage: u32,
    /// Meter slot currently highlighted, if the meter is active
    pub selected: Option<UpgradeKind>,
}

/// A change the host must reflect in its overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    /// Score / lives / stage / meter changed
    Hud(HudSnapshot),
    /// A game started: hide start and game-over overlays
    OverlaysHidden,
    /// Lives ran out
    GameOver { final_score: u64 },
}

/// Widgets the host exposes
pub trait UiSurface {
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: u32);
    fn set_stage(&mut self, stage: u32);
    /// Toggle the "selected" marker on one meter slot
    fn set_slot_selected(&mut self, slot: UpgradeKind, selected: bool);
    fn set_start_visible(&mut self, visible: bool);
    fn set_game_over_visible(&mut self, visible: bool);
    fn set_final_score(&mut self, score: u64);
}

/// Apply queued events in order
pub fn apply_events<I>(events: I, ui: &mut dyn UiSurface)
where
    I: IntoIterator<Item = UiEvent>,
{
    for event in events {
        match event {
            UiEvent::Hud(hud) => {
                ui.set_score(hud.score);
                ui.set_lives(hud.lives);
                ui.set_stage(hud.stage);
                for slot in UpgradeKind::ALL {
                    ui.set_slot_selected(slot, hud.selected == Some(slot));
                }
            }
            UiEvent::OverlaysHidden => {
                ui.set_start_visible(false);
                ui.set_game_over_visible(false);
            }
            UiEvent::GameOver { final_score } => {
                ui.set_final_score(final_score);
                ui.set_game_over_visible(true);
            }
        }
    }
}

/// In-memory overlay, used by headless hosts and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudState {
    pub score: u64,
    pub lives: u32,
    pub stage: u32,
    pub selected_slots: [bool; UpgradeKind::COUNT],
    pub start_visible: bool,
    pub game_over_visible: bool,
    pub final_score: Option<u64>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: 0,
            stage: 0,
            selected_slots: [false; UpgradeKind::COUNT],
            start_visible: true,
            game_over_visible: false,
            final_score: None,
        }
    }
}

impl HudState {
    /// Slot marked selected, if exactly one is
    pub fn selected_slot(&self) -> Option<UpgradeKind> {
        let mut selected = UpgradeKind::ALL
            .into_iter()
            .filter(|slot| self.selected_slots[slot.index()]);
        match (selected.next(), selected.next()) {
            (Some(slot), None) => Some(slot),
            _ => None,
        }
    }
}

impl UiSurface for HudState {
    fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    fn set_stage(&mut self, stage: u32) {
        self.stage = stage;
    }

    fn set_slot_selected(&mut self, slot: UpgradeKind, selected: bool) {
        self.selected_slots[slot.index()] = selected;
    }

    fn set_start_visible(&mut self, visible: bool) {
        self.start_visible = visible;
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        self.game_over_visible = visible;
    }

    fn set_final_score(&mut self, score: u64) {
        self.final_score = Some(score);
    }
}

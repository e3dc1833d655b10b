//! Power meter
//!
//! A cyclic selector over the upgrade list. Red capsules advance it; activation
//! spends the selected upgrade and switches the meter off.

use serde::{Deserialize, Serialize};

/// Upgrades in meter order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    SpeedUp,
    Missile,
    Double,
    Laser,
    Option,
    Shield,
}

impl UpgradeKind {
    pub const COUNT: usize = 6;

    pub const ALL: [UpgradeKind; Self::COUNT] = [
        UpgradeKind::SpeedUp,
        UpgradeKind::Missile,
        UpgradeKind::Double,
        UpgradeKind::Laser,
        UpgradeKind::Option,
        UpgradeKind::Shield,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in the meter
    pub fn index(self) -> usize {
        self as usize
    }

    /// HUD slot identifier
    pub fn slot_id(self) -> &'static str {
        match self {
            UpgradeKind::SpeedUp => "speed-up",
            UpgradeKind::Missile => "missile",
            UpgradeKind::Double => "double",
            UpgradeKind::Laser => "laser",
            UpgradeKind::Option => "option",
            UpgradeKind::Shield => "shield",
        }
    }
}

/// Meter state: off, or on with a selected slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerMeter {
    active: bool,
    position: Option<usize>,
}

impl PowerMeter {
    /// Whether a capsule has lit the meter since the last activation
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Selected slot index, or -1 when nothing is selected
    pub fn position(&self) -> i32 {
        self.position.map_or(-1, |p| p as i32)
    }

    pub fn selected(&self) -> Option<UpgradeKind> {
        self.position.and_then(UpgradeKind::from_index)
    }

    /// Step to the next slot (wrapping) and switch the meter on
    pub fn advance(&mut self) -> UpgradeKind {
        let next = self.position.map_or(0, |p| (p + 1) % UpgradeKind::COUNT);
        self.position = Some(next);
        self.active = true;
        UpgradeKind::ALL[next]
    }

    /// Switch off and clear the selection
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Spend the selected upgrade. Does nothing and returns `None` unless
    /// the meter is active with a selection.
    pub fn take(&mut self) -> Option<UpgradeKind> {
        if !self.active {
            return None;
        }
        let kind = self.selected()?;
        self.reset();
        Some(kind)
    }
}

//! Trailing options
//!
//! Each option replays its leader's recent path: it records the leader's position
//! every tick and sits where the leader was `OPTION_LAG` ticks ago. Chained options
//! give the serpentine trail.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Entity, EntityKind, PlayerBullet};
use super::player::Weapons;
use super::rect::Rect;
use crate::consts::*;
use crate::render::{Color, RenderSurface};

/// Who an option follows. A positional handle, never ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leader {
    Player,
    /// Index into the player's option chain
    Follower(usize),
}

/// A trailing option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follower {
    pub rect: Rect,
    pub leader: Leader,
    /// Leader positions, newest first
    history: VecDeque<Vec2>,
}

impl Follower {
    /// Spawn just behind the leader with a history full of the spawn point
    pub fn new(leader: Leader, leader_pos: Vec2) -> Self {
        let pos = leader_pos - Vec2::new(OPTION_SPAWN_GAP, 0.0);
        Self {
            rect: Rect::new(pos.x, pos.y, OPTION_WIDTH, OPTION_HEIGHT),
            leader,
            history: std::iter::repeat_n(pos, OPTION_HISTORY_LEN).collect(),
        }
    }

    /// Record the leader's position and move to the lagged sample
    pub fn follow(&mut self, leader_pos: Vec2) {
        self.history.push_front(leader_pos);
        self.history.truncate(OPTION_HISTORY_LEN);

        if let Some(&pos) = self.history.get(OPTION_LAG) {
            self.rect.pos = pos;
        }
    }

    pub fn history(&self) -> &VecDeque<Vec2> {
        &self.history
    }

    /// Fire the player's current primary pattern from this option
    pub fn shoot(&self, weapons: &Weapons, out: &mut Vec<PlayerBullet>) {
        weapons.fire_primary(self.rect, out);
    }

    /// Fire a missile if the player has them
    pub fn shoot_missile(&self, weapons: &Weapons, out: &mut Vec<PlayerBullet>) {
        if weapons.has_missile() {
            out.push(Weapons::missile_from(self.rect));
        }
    }
}

impl Entity for Follower {
    fn kind(&self) -> EntityKind {
        EntityKind::Option
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_destroyed(&self) -> bool {
        false
    }

    fn destroy(&mut self) {}

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.set_fill(Color::SKY);
        surface.fill_rect(self.rect);
        surface.set_stroke(Color::WHITE);
        surface.set_line_width(1.0);
        surface.stroke_rect(self.rect);
    }
}

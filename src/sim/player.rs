//! The player ship
//!
//! Movement, weapons, upgrades, shield and post-hit invincibility. The ship also owns
//! its option chain and drives it each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{BulletKind, Entity, EntityKind, PlayerBullet};
use super::follower::{Follower, Leader};
use super::meter::UpgradeKind;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;
use crate::frames;
use crate::input::{InputState, Key};
use crate::render::{Color, RenderSurface};

/// Weapon upgrades. Double and laser exclude each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapons {
    missile: bool,
    double: bool,
    laser: bool,
}

impl Weapons {
    pub fn has_missile(&self) -> bool {
        self.missile
    }

    pub fn has_double(&self) -> bool {
        self.double
    }

    pub fn has_laser(&self) -> bool {
        self.laser
    }

    pub fn equip_missile(&mut self) {
        self.missile = true;
    }

    pub fn equip_double(&mut self) {
        self.double = true;
        self.laser = false;
    }

    pub fn equip_laser(&mut self) {
        self.laser = true;
        self.double = false;
    }

    /// Fire one primary volley from `shooter`: laser beats double beats single
    pub fn fire_primary(&self, shooter: Rect, out: &mut Vec<PlayerBullet>) {
        let muzzle = Vec2::new(shooter.right(), shooter.center().y - BULLET_HEIGHT / 2.0);

        if self.laser {
            out.push(PlayerBullet::new(BulletKind::Laser, muzzle));
        } else if self.double {
            out.push(PlayerBullet::new(BulletKind::Normal, muzzle));
            out.push(PlayerBullet::new(
                BulletKind::Diagonal,
                Vec2::new(shooter.right(), shooter.y()),
            ));
        } else {
            out.push(PlayerBullet::new(BulletKind::Normal, muzzle));
        }
    }

    /// Missile dropped from under the middle of `shooter`
    pub fn missile_from(shooter: Rect) -> PlayerBullet {
        PlayerBullet::new(
            BulletKind::Missile,
            Vec2::new(shooter.center().x, shooter.bottom()),
        )
    }
}

/// What a hit did to the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Invincible: nothing happened
    Ignored,
    /// The shield soaked it
    Absorbed,
    /// Upgrades lost; an explosion belongs at `at`
    Struck { at: Vec2 },
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Base speed (pixels per reference frame)
    pub speed: f32,
    speed_level: u32,
    weapons: Weapons,
    has_shield: bool,
    shield_hits: u32,
    followers: Vec<Follower>,
    max_options: usize,

    /// Seconds until the guns are ready
    shoot_timer: f32,

    invincible: bool,
    /// Milliseconds of invincibility left
    invincibility_left_ms: f32,
    invincibility_ms: f32,
    blink_timer: f32,
    visible: bool,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(
                config.player_start_x,
                config.player_start_y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            speed: config.player_speed,
            speed_level: 0,
            weapons: Weapons::default(),
            has_shield: false,
            shield_hits: 0,
            followers: Vec::with_capacity(MAX_OPTIONS),
            max_options: config.max_options.min(MAX_OPTIONS),
            shoot_timer: 0.0,
            invincible: false,
            invincibility_left_ms: 0.0,
            invincibility_ms: config.invincibility_ms,
            blink_timer: 0.0,
            visible: true,
        }
    }

    pub fn speed_level(&self) -> u32 {
        self.speed_level
    }

    pub fn weapons(&self) -> &Weapons {
        &self.weapons
    }

    pub fn has_shield(&self) -> bool {
        self.has_shield
    }

    pub fn shield_hits(&self) -> u32 {
        self.shield_hits
    }

    pub fn followers(&self) -> &[Follower] {
        &self.followers
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Per-axis speed this tick, in pixels per reference frame
    pub fn current_speed(&self) -> f32 {
        self.speed + self.speed_level as f32
    }

    /// Move, fire, tick timers and drag the option chain along
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        playfield: Vec2,
        out: &mut Vec<PlayerBullet>,
    ) {
        // Axes are independent: diagonals are not normalized
        let dir = Vec2::new(input.horizontal(), input.vertical());
        self.rect.pos += dir * self.current_speed() * frames(dt);
        self.rect.clamp_within(playfield);

        self.shoot_timer -= dt;
        if input.is_down(Key::Fire) && self.shoot_timer <= 0.0 {
            self.shoot(out);
            self.shoot_timer = PLAYER_SHOOT_DELAY;
        }
        if input.is_down(Key::Missile) && self.weapons.has_missile() && self.shoot_timer <= 0.0 {
            self.shoot_missile(out);
            self.shoot_timer = PLAYER_SHOOT_DELAY * MISSILE_DELAY_FACTOR;
        }

        if self.invincible {
            self.invincibility_left_ms -= dt * 1000.0;

            self.blink_timer -= dt;
            if self.blink_timer <= 0.0 {
                self.visible = !self.visible;
                self.blink_timer = BLINK_INTERVAL;
            }

            if self.invincibility_left_ms <= 0.0 {
                self.invincible = false;
                self.visible = true;
            }
        }

        self.update_followers();
    }

    /// Each option chases its leader; earlier options have already moved this tick
    fn update_followers(&mut self) {
        for i in 0..self.followers.len() {
            let leader_pos = match self.followers[i].leader {
                Leader::Player => self.rect.pos,
                Leader::Follower(j) => self.followers[j].rect.pos,
            };
            self.followers[i].follow(leader_pos);
        }
    }

    /// Primary volley from the ship and every option
    pub fn shoot(&self, out: &mut Vec<PlayerBullet>) {
        self.weapons.fire_primary(self.rect, out);
        for follower in &self.followers {
            follower.shoot(&self.weapons, out);
        }
    }

    /// Missile from the ship and every option (needs the missile upgrade)
    pub fn shoot_missile(&self, out: &mut Vec<PlayerBullet>) {
        if !self.weapons.has_missile() {
            return;
        }
        out.push(Weapons::missile_from(self.rect));
        for follower in &self.followers {
            follower.shoot_missile(&self.weapons, out);
        }
    }

    /// Take a hit
    pub fn hit(&mut self) -> HitOutcome {
        if self.invincible {
            return HitOutcome::Ignored;
        }

        if self.has_shield {
            self.shield_hits += 1;
            if self.shield_hits >= SHIELD_CAPACITY {
                self.has_shield = false;
                self.shield_hits = 0;
                log::debug!("Shield broken");
            }
            return HitOutcome::Absorbed;
        }

        let at = self.rect.pos;
        self.strip_upgrades();
        self.invincible = true;
        self.invincibility_left_ms = self.invincibility_ms;
        self.blink_timer = 0.0;
        HitOutcome::Struck { at }
    }

    fn strip_upgrades(&mut self) {
        self.speed_level = 0;
        self.weapons = Weapons::default();
        self.followers.clear();
        self.has_shield = false;
        self.shield_hits = 0;
    }

    /// Grant an upgrade. Returns false when it had no effect
    /// (speed already maxed, option chain full).
    pub fn apply_upgrade(&mut self, kind: UpgradeKind) -> bool {
        log::info!("Applying power-up: {}", kind.slot_id());

        match kind {
            UpgradeKind::SpeedUp => {
                if self.speed_level >= MAX_SPEED_LEVEL {
                    log::debug!("Speed already at max level {}", MAX_SPEED_LEVEL);
                    return false;
                }
                self.speed_level += 1;
            }
            UpgradeKind::Missile => self.weapons.equip_missile(),
            UpgradeKind::Double => self.weapons.equip_double(),
            UpgradeKind::Laser => self.weapons.equip_laser(),
            UpgradeKind::Option => return self.add_follower(),
            UpgradeKind::Shield => {
                self.has_shield = true;
                self.shield_hits = 0;
            }
        }
        true
    }

    /// Append an option at the tail of the chain
    fn add_follower(&mut self) -> bool {
        if self.followers.len() >= self.max_options {
            log::debug!("Maximum options reached: {}", self.followers.len());
            return false;
        }

        let (leader, leader_pos) = match self.followers.len().checked_sub(1) {
            Some(tail) => (Leader::Follower(tail), self.followers[tail].rect.pos),
            None => (Leader::Player, self.rect.pos),
        };
        self.followers.push(Follower::new(leader, leader_pos));
        log::debug!("Option added, total: {}", self.followers.len());
        true
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_destroyed(&self) -> bool {
        false
    }

    fn destroy(&mut self) {}

    fn draw(&self, surface: &mut dyn RenderSurface) {
        if !self.visible {
            return;
        }
        let r = self.rect;

        surface.set_fill(Color::BLUE);
        surface.fill_rect(r);

        // Nose
        surface.set_fill(Color::CYAN);
        surface.fill_path(&[
            Vec2::new(r.right(), r.center().y),
            Vec2::new(r.right() - 10.0, r.y()),
            Vec2::new(r.right() - 10.0, r.bottom()),
        ]);

        if self.has_shield {
            use std::f32::consts::FRAC_PI_2;
            surface.set_stroke(Color::CYAN);
            surface.set_line_width(2.0);
            surface.stroke_arc(
                Vec2::new(r.right(), r.center().y),
                15.0,
                -FRAC_PI_2,
                FRAC_PI_2,
            );
        }
    }
}

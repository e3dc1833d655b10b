//! Entity kinds and their per-kind motion, destruction and drawing
//!
//! Destruction is a flag first: a destroyed entity stops updating, drawing and
//! colliding immediately, and is swept out of its collection by `purge`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::frames;
use crate::render::{Color, RenderSurface};

/// The closed set of simulated things
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Star,
    PlayerBullet,
    EnemyBullet,
    Enemy,
    Capsule,
    Explosion,
    Option,
    Player,
}

/// Capabilities shared by every entity
pub trait Entity {
    fn kind(&self) -> EntityKind;
    fn bounds(&self) -> Rect;
    fn is_destroyed(&self) -> bool;
    /// Set the destroyed flag (never cleared)
    fn destroy(&mut self);
    /// Issue draw calls for the live entity
    fn draw(&self, surface: &mut dyn RenderSurface);

    /// Draw unless destroyed
    fn render(&self, surface: &mut dyn RenderSurface) {
        if !self.is_destroyed() {
            self.draw(surface);
        }
    }
}

/// Remove destroyed entries, keeping survivors in order
pub fn purge<T: Entity>(items: &mut Vec<T>) {
    items.retain(|e| !e.is_destroyed());
}

/// Draw every live entity in order
pub fn render_all<T: Entity>(items: &[T], surface: &mut dyn RenderSurface) {
    for item in items {
        item.render(surface);
    }
}

// === Background ===

/// A background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    fn random<R: Rng + ?Sized>(rng: &mut R, playfield: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * playfield.x,
                rng.random::<f32>() * playfield.y,
            ),
            size: rng.random::<f32>() * 2.0 + 1.0,
            speed: rng.random::<f32>() * 2.0 + 1.0,
        }
    }

    /// Scroll left; wrap to the right edge at a new height once off the left edge
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, playfield: Vec2, rng: &mut R) {
        self.pos.x -= self.speed * frames(dt);
        if self.pos.x < 0.0 {
            self.pos.x = playfield.x;
            self.pos.y = rng.random::<f32>() * playfield.y;
        }
    }
}

impl Entity for Star {
    fn kind(&self) -> EntityKind {
        EntityKind::Star
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    fn is_destroyed(&self) -> bool {
        false
    }

    fn destroy(&mut self) {}

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.set_fill(Color::WHITE);
        surface.fill_rect(self.bounds());
    }
}

/// Scrolling star background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
    playfield: Vec2,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(count: usize, playfield: Vec2, rng: &mut R) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(rng, playfield)).collect(),
            playfield,
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        for star in &mut self.stars {
            star.update(dt, self.playfield, rng);
        }
    }

    /// Black backdrop plus stars
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.set_fill(Color::BLACK);
        surface.fill_rect(Rect {
            pos: Vec2::ZERO,
            size: self.playfield,
        });
        render_all(&self.stars, surface);
    }
}

// === Player bullets ===

/// Player shot variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    Normal,
    Diagonal,
    Laser,
    Missile,
}

/// A shot fired by the player or an option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub rect: Rect,
    pub kind: BulletKind,
    pub speed: f32,
    /// Vertical speed (missiles only, positive is down)
    pub fall_speed: f32,
    pub damage: i32,
    pub destroyed: bool,
}

impl PlayerBullet {
    pub fn new(kind: BulletKind, pos: Vec2) -> Self {
        let (size, speed, fall_speed, damage) = match kind {
            BulletKind::Normal | BulletKind::Diagonal => (
                Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
                BULLET_SPEED,
                0.0,
                BULLET_DAMAGE,
            ),
            BulletKind::Laser => (
                Vec2::new(LASER_WIDTH, BULLET_HEIGHT),
                BULLET_SPEED,
                0.0,
                LASER_DAMAGE,
            ),
            BulletKind::Missile => (
                Vec2::splat(MISSILE_SIZE),
                MISSILE_SPEED,
                MISSILE_FALL_SPEED,
                MISSILE_DAMAGE,
            ),
        };
        Self {
            rect: Rect { pos, size },
            kind,
            speed,
            fall_speed,
            damage,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32, playfield: Vec2) {
        if self.destroyed {
            return;
        }
        let step = frames(dt);

        match self.kind {
            BulletKind::Missile => {
                self.rect.pos.x += self.speed * step;
                self.rect.pos.y += self.fall_speed * step;
                // Bounce off the floor only
                if self.rect.bottom() > playfield.y {
                    self.fall_speed = -self.fall_speed.abs();
                }
            }
            BulletKind::Diagonal => {
                self.rect.pos.x += self.speed * DIAGONAL_FACTOR * step;
                self.rect.pos.y -= self.speed * DIAGONAL_FACTOR * step;
            }
            BulletKind::Normal | BulletKind::Laser => {
                self.rect.pos.x += self.speed * step;
            }
        }

        let off_top = self.kind != BulletKind::Missile && self.rect.y() < 0.0;
        if self.rect.x() > playfield.x || off_top {
            self.destroy();
        }
    }
}

impl Entity for PlayerBullet {
    fn kind(&self) -> EntityKind {
        EntityKind::PlayerBullet
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        let color = match self.kind {
            BulletKind::Laser => Color::MAGENTA,
            BulletKind::Missile => Color::ORANGE,
            BulletKind::Normal | BulletKind::Diagonal => Color::WHITE,
        };
        surface.set_fill(color);
        surface.fill_rect(self.rect);
    }
}

// === Enemy bullets ===

/// A shot fired by an enemy, travelling straight left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub rect: Rect,
    pub speed: f32,
    pub destroyed: bool,
}

impl EnemyBullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
            speed: ENEMY_BULLET_SPEED,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        self.rect.pos.x -= self.speed * frames(dt);
        if self.rect.right() < 0.0 {
            self.destroy();
        }
    }
}

impl Entity for EnemyBullet {
    fn kind(&self) -> EntityKind {
        EntityKind::EnemyBullet
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.set_fill(Color::YELLOW);
        surface.fill_rect(self.rect);
    }
}

// === Enemies ===

/// A basic enemy drifting left and firing on a random interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
    pub health: i32,
    /// Seconds until the next shot
    pub shoot_timer: f32,
    pub destroyed: bool,
}

impl Enemy {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, ENEMY_SIZE, ENEMY_SIZE),
            speed: ENEMY_SPEED,
            health: ENEMY_HEALTH,
            shoot_timer: rng.random::<f32>() * ENEMY_FIRST_SHOT_MAX,
            destroyed: false,
        }
    }

    /// Move and maybe fire. Returns the bullet to spawn, if any.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Option<EnemyBullet> {
        if self.destroyed {
            return None;
        }

        self.rect.pos.x -= self.speed * frames(dt);
        if self.rect.right() < 0.0 {
            self.destroy();
            return None;
        }

        self.shoot_timer -= dt;
        if self.shoot_timer <= 0.0 {
            self.shoot_timer = ENEMY_SHOT_MIN + rng.random::<f32>() * ENEMY_SHOT_SPREAD;
            return Some(self.shoot());
        }
        None
    }

    /// Bullet leaving the nose, vertically centred
    pub fn shoot(&self) -> EnemyBullet {
        let y = self.rect.center().y - ENEMY_BULLET_HEIGHT / 2.0;
        EnemyBullet::new(Vec2::new(self.rect.x(), y))
    }

    /// Apply damage. Returns true if this hit killed the enemy.
    pub fn hit(&mut self, damage: i32) -> bool {
        if self.destroyed {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.destroy();
            return true;
        }
        false
    }
}

impl Entity for Enemy {
    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.set_fill(Color::RED);
        surface.fill_rect(self.rect);
    }
}

// === Capsules ===

/// Capsule colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapsuleKind {
    /// Advances the power meter
    Red,
    /// Wipes every enemy on screen
    Blue,
}

impl CapsuleKind {
    /// 80% red, 20% blue
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(RED_CAPSULE_CHANCE) {
            CapsuleKind::Red
        } else {
            CapsuleKind::Blue
        }
    }
}

/// A collectible power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capsule {
    pub rect: Rect,
    pub kind: CapsuleKind,
    pub speed: f32,
    pub destroyed: bool,
}

impl Capsule {
    pub fn new(kind: CapsuleKind, pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, CAPSULE_SIZE, CAPSULE_SIZE),
            kind,
            speed: CAPSULE_SPEED,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        self.rect.pos.x -= self.speed * frames(dt);
        if self.rect.right() < 0.0 {
            self.destroy();
        }
    }
}

impl Entity for Capsule {
    fn kind(&self) -> EntityKind {
        EntityKind::Capsule
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        let color = match self.kind {
            CapsuleKind::Red => Color::RED,
            CapsuleKind::Blue => Color::BLUE,
        };
        surface.set_fill(color);
        surface.fill_arc(
            self.rect.center(),
            self.rect.width() / 2.0,
            0.0,
            std::f32::consts::TAU,
        );
    }
}

// === Explosions ===

/// Expanding, fading ring of fire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    /// Pixels per second
    pub growth: f32,
    pub destroyed: bool,
}

impl Explosion {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: EXPLOSION_START_RADIUS,
            max_radius: EXPLOSION_MAX_RADIUS,
            growth: EXPLOSION_GROWTH,
            destroyed: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.destroyed {
            return;
        }
        self.radius += self.growth * dt;
        if self.radius >= self.max_radius {
            self.destroy();
        }
    }

    /// Opacity falls linearly to zero as the radius reaches max
    pub fn alpha(&self) -> f32 {
        (1.0 - self.radius / self.max_radius).clamp(0.0, 1.0)
    }
}

impl Entity for Explosion {
    fn kind(&self) -> EntityKind {
        EntityKind::Explosion
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.center - Vec2::splat(self.radius),
            size: Vec2::splat(self.radius * 2.0),
        }
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.set_fill(Color::rgba(255, 100, 0, self.alpha()));
        surface.fill_arc(self.center, self.radius, 0.0, std::f32::consts::TAU);
    }
}

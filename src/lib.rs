//! Nebula Strike - A side-scrolling shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, power meter, session state)
//! - `render`: Draw-call surface the simulation renders into
//! - `ui`: HUD/overlay surface the simulation publishes to
//! - `input`: Held-key map and edge detection
//! - `game`: Host adapter that ties frames and key events to a session
//! - `config`: Data-driven session tuning

pub mod config;
pub mod game;
pub mod input;
pub mod render;
pub mod sim;
pub mod ui;

pub use config::GameConfig;
pub use game::Game;
pub use input::{InputState, Key};
pub use render::{Color, DrawCommand, DrawList, RenderSurface};
pub use ui::{HudSnapshot, HudState, UiEvent, UiSurface};

/// Fixed entity tuning
///
/// Speeds are pixels per reference frame (see [`REFERENCE_FPS`]); timers are seconds
/// unless the name says otherwise.
pub mod consts {
    /// Frame rate the per-frame speeds were tuned at
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 15.0;
    pub const PLAYER_SHOOT_DELAY: f32 = 0.2;
    /// Missile cooldown is the shoot delay times this
    pub const MISSILE_DELAY_FACTOR: f32 = 1.5;
    pub const MAX_SPEED_LEVEL: u32 = 5;
    pub const BLINK_INTERVAL: f32 = 0.1;
    /// Hits a shield soaks before it breaks
    pub const SHIELD_CAPACITY: u32 = 2;

    /// Option followers
    pub const OPTION_WIDTH: f32 = 15.0;
    pub const OPTION_HEIGHT: f32 = 10.0;
    pub const OPTION_SPAWN_GAP: f32 = 30.0;
    pub const OPTION_HISTORY_LEN: usize = 30;
    pub const OPTION_LAG: usize = 10;
    pub const MAX_OPTIONS: usize = 4;

    /// Player bullets
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    pub const BULLET_DAMAGE: i32 = 1;
    pub const LASER_WIDTH: f32 = 50.0;
    pub const LASER_DAMAGE: i32 = 2;
    pub const DIAGONAL_FACTOR: f32 = 0.7;
    pub const MISSILE_SIZE: f32 = 8.0;
    pub const MISSILE_SPEED: f32 = 8.0;
    pub const MISSILE_FALL_SPEED: f32 = 2.0;
    pub const MISSILE_DAMAGE: i32 = 3;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_HEALTH: i32 = 1;
    pub const ENEMY_SPAWN_OFFSET: f32 = 50.0;
    pub const ENEMY_FIRST_SHOT_MAX: f32 = 3.0;
    pub const ENEMY_SHOT_MIN: f32 = 2.0;
    pub const ENEMY_SHOT_SPREAD: f32 = 2.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 10.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 5.0;
    pub const ENEMY_BULLET_SPEED: f32 = 5.0;

    /// Capsules
    pub const CAPSULE_SIZE: f32 = 20.0;
    pub const CAPSULE_SPEED: f32 = 2.0;
    pub const CAPSULE_SPAWN_OFFSET: f32 = 30.0;
    pub const CAPSULE_DROP_CHANCE: f64 = 0.3;
    pub const RED_CAPSULE_CHANCE: f64 = 0.8;

    /// Explosions
    pub const EXPLOSION_START_RADIUS: f32 = 5.0;
    pub const EXPLOSION_MAX_RADIUS: f32 = 30.0;
    /// Pixels per second
    pub const EXPLOSION_GROWTH: f32 = 60.0;

    /// Score awards
    pub const ENEMY_KILL_SCORE: u64 = 100;
    pub const RED_CAPSULE_SCORE: u64 = 100;
    pub const BLUE_CAPSULE_SCORE: u64 = 1000;
}

/// Convert a wall-clock delta (seconds) to reference frames
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}

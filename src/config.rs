//! Session configuration
//!
//! Tunables that shape a session (playfield, lives, spawn rates). Loaded from JSON by
//! the host; every field falls back to its default when missing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_OPTIONS;

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Player ===
    /// Base movement speed (pixels per reference frame)
    pub player_speed: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub max_lives: u32,
    /// Post-hit invincibility in milliseconds
    pub invincibility_ms: f32,
    pub max_options: usize,

    // === Spawning ===
    /// Per-tick enemy spawn probability
    pub enemy_spawn_chance: f64,
    /// Per-tick capsule spawn probability
    pub capsule_spawn_chance: f64,
    pub star_count: usize,

    /// RNG seed
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,

            player_speed: 5.0,
            player_start_x: 100.0,
            player_start_y: 300.0,
            max_lives: 3,
            invincibility_ms: 2000.0,
            max_options: MAX_OPTIONS,

            enemy_spawn_chance: 0.02,
            capsule_spawn_chance: 0.005,
            star_count: 100,

            seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::sanitized)
    }

    /// Playfield size as a vector
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Replace the seed, keeping everything else
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Clamp values the simulation cannot run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.width > 0.0 && self.height > 0.0) {
            log::warn!(
                "Invalid playfield {}x{}, using {}x{}",
                self.width,
                self.height,
                defaults.width,
                defaults.height
            );
            self.width = defaults.width;
            self.height = defaults.height;
        }
        if !self.player_speed.is_finite() || self.player_speed < 0.0 {
            log::warn!("Invalid player_speed {}, using {}", self.player_speed, defaults.player_speed);
            self.player_speed = defaults.player_speed;
        }
        if !self.invincibility_ms.is_finite() || self.invincibility_ms < 0.0 {
            log::warn!(
                "Invalid invincibility_ms {}, using {}",
                self.invincibility_ms,
                defaults.invincibility_ms
            );
            self.invincibility_ms = defaults.invincibility_ms;
        }
        if self.max_lives == 0 {
            log::warn!("max_lives must be at least 1");
            self.max_lives = 1;
        }
        if self.max_options > MAX_OPTIONS {
            log::warn!("max_options {} capped to {}", self.max_options, MAX_OPTIONS);
            self.max_options = MAX_OPTIONS;
        }
        self.enemy_spawn_chance = clamp_probability(self.enemy_spawn_chance);
        self.capsule_spawn_chance = clamp_probability(self.capsule_spawn_chance);
        self
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

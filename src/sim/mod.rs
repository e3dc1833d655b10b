//! Simulation module
//!
//! All gameplay logic lives here. It is deterministic for a given seed and
//! input sequence:
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (collection order)
//! - No platform dependencies; drawing goes through `RenderSurface`, widgets
//!   through queued `UiEvent`s

pub mod collision;
pub mod entities;
pub mod follower;
pub mod meter;
pub mod player;
pub mod rect;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::resolve_collisions;
pub use entities::{
    BulletKind, Capsule, CapsuleKind, Enemy, EnemyBullet, Entity, EntityKind, Explosion,
    PlayerBullet, Star, Starfield,
};
pub use follower::{Follower, Leader};
pub use meter::{PowerMeter, UpgradeKind};
pub use player::{HitOutcome, Player, Weapons};
pub use rect::Rect;
pub use session::Session;
pub use state::{GamePhase, SessionState};
pub use tick::{FrameClock, render, tick};

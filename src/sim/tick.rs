//! Per-frame simulation tick and render pass
//!
//! Order per tick: player, background, entity collections (each swept after its
//! own update), collisions, spawners. Rendering is a separate pass the host
//! runs every frame regardless of phase.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::entities::{Entity, purge, render_all};
use super::rect::Rect;
use super::session::Session;
use super::state::GamePhase;
use crate::input::InputState;
use crate::render::{Color, RenderSurface, TextAlign};

/// Title shown on the start overlay
pub const TITLE: &str = "NEBULA STRIKE";

/// Advance the session by `dt` seconds. Does nothing outside `Playing`.
pub fn tick(session: &mut Session, input: &InputState, dt: f32) {
    if session.phase() != GamePhase::Playing {
        return;
    }

    let playfield = session.playfield();
    session
        .player
        .update(dt, input, playfield, &mut session.player_bullets);
    session.scroll_background(dt);

    // Entities (fixed order)
    session.update_enemies(dt);

    for bullet in &mut session.enemy_bullets {
        bullet.update(dt);
    }
    purge(&mut session.enemy_bullets);

    for bullet in &mut session.player_bullets {
        bullet.update(dt, playfield);
    }
    purge(&mut session.player_bullets);

    for capsule in &mut session.capsules {
        capsule.update(dt);
    }
    purge(&mut session.capsules);

    for explosion in &mut session.explosions {
        explosion.update(dt);
    }
    purge(&mut session.explosions);

    resolve_collisions(session);
    session.run_spawners();
}

/// Converts host timestamps (milliseconds) into tick deltas (seconds)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame. The first frame yields 0; spikes are not clamped.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => ((timestamp_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(timestamp_ms);
        dt
    }
}

/// Full redraw of the current phase
pub fn render(session: &Session, surface: &mut dyn RenderSurface) {
    let field = session.playfield();
    surface.clear(field.x, field.y);
    session.background.render(surface);

    match session.phase() {
        GamePhase::Start => {
            render_title(field, surface);
            return;
        }
        // The game-over overlay belongs to the UI
        GamePhase::Over => return,
        GamePhase::Playing => {}
    }

    render_all(&session.enemies, surface);
    render_all(&session.enemy_bullets, surface);
    render_all(&session.player_bullets, surface);
    render_all(&session.capsules, surface);
    render_all(&session.explosions, surface);
    // Options sit behind the ship
    render_all(session.player.followers(), surface);
    session.player.render(surface);

    render_debug(session, surface);
}

fn render_title(field: Vec2, surface: &mut dyn RenderSurface) {
    surface.set_fill(Color::BLACK.with_alpha(0.5));
    surface.fill_rect(Rect {
        pos: Vec2::ZERO,
        size: field,
    });

    surface.set_fill(Color::WHITE);
    let cx = field.x / 2.0;
    surface.fill_text(TITLE, Vec2::new(cx, 200.0), 48.0, TextAlign::Center);
    surface.fill_text(
        "Press ENTER to Start",
        Vec2::new(cx, 250.0),
        24.0,
        TextAlign::Center,
    );
}

fn render_debug(session: &Session, surface: &mut dyn RenderSurface) {
    let options = session.player.followers().len();
    let meter = u8::from(session.state().meter.is_active());

    surface.set_fill(Color::WHITE);
    surface.fill_text(
        &format!("Options: {options}"),
        Vec2::new(10.0, 580.0),
        12.0,
        TextAlign::Left,
    );
    surface.fill_text(
        &format!("Power Meter: {meter}"),
        Vec2::new(120.0, 580.0),
        12.0,
        TextAlign::Left,
    );
}

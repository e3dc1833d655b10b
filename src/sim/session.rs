//! Session controller
//!
//! Owns the aggregate state, the player, every entity collection and the RNG.
//! All score/lives/meter changes go through the methods here, which queue the
//! matching `UiEvent`s in order.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::{
    Capsule, CapsuleKind, Enemy, EnemyBullet, Entity, Explosion, PlayerBullet, Starfield, purge,
};
use super::meter::UpgradeKind;
use super::player::{HitOutcome, Player};
use super::state::{GamePhase, SessionState};
use crate::config::GameConfig;
use crate::consts::*;
use crate::ui::{HudSnapshot, UiEvent};

/// A game session: everything the tick loop reads and writes
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    state: SessionState,
    pub player: Player,
    pub background: Starfield,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub player_bullets: Vec<PlayerBullet>,
    pub capsules: Vec<Capsule>,
    pub explosions: Vec<Explosion>,
    rng: Pcg32,
    ui_events: Vec<UiEvent>,
}

impl Session {
    /// A session sitting on the title screen
    pub fn new(config: GameConfig) -> Self {
        let config = config.sanitized();
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let background = Starfield::new(config.star_count, config.playfield(), &mut rng);

        let mut session = Self {
            state: SessionState::new(config.max_lives),
            player: Player::new(&config),
            background,
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            player_bullets: Vec::new(),
            capsules: Vec::new(),
            explosions: Vec::new(),
            rng,
            ui_events: Vec::new(),
            config,
        };
        session.publish_hud();
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn playfield(&self) -> Vec2 {
        self.config.playfield()
    }

    /// Scroll the starfield (respawned stars draw from the session RNG)
    pub(crate) fn scroll_background(&mut self, dt: f32) {
        self.background.update(dt, &mut self.rng);
    }

    /// Move enemies, collect their shots, sweep the dead
    pub(crate) fn update_enemies(&mut self, dt: f32) {
        for enemy in &mut self.enemies {
            if let Some(bullet) = enemy.update(dt, &mut self.rng) {
                self.enemy_bullets.push(bullet);
            }
        }
        purge(&mut self.enemies);
    }

    /// Take the queued UI changes, oldest first
    pub fn drain_ui_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.ui_events)
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.state.score,
            lives: self.state.lives,
            stage: self.state.stage,
            selected: self.state.meter.selected(),
        }
    }

    fn publish_hud(&mut self) {
        let hud = self.hud_snapshot();
        self.ui_events.push(UiEvent::Hud(hud));
    }

    /// Reset everything and begin playing
    pub fn start_game(&mut self) {
        self.state.reset(self.config.max_lives);
        self.player = Player::new(&self.config);
        self.enemies.clear();
        self.enemy_bullets.clear();
        self.player_bullets.clear();
        self.capsules.clear();
        self.explosions.clear();

        self.ui_events.push(UiEvent::OverlaysHidden);
        self.publish_hud();
        log::info!("Game started!");
    }

    /// Confirm key: start a game from any non-playing phase
    pub fn confirm(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            return false;
        }
        self.start_game();
        true
    }

    /// Enter the game-over phase and publish the final score
    pub fn game_over(&mut self) {
        if self.state.phase == GamePhase::Over {
            return;
        }
        self.state.phase = GamePhase::Over;
        self.ui_events.push(UiEvent::GameOver {
            final_score: self.state.score,
        });
        log::info!("Game over, final score {}", self.state.score);
    }

    pub fn add_score(&mut self, points: u64) {
        self.state.score += points;
        self.publish_hud();
    }

    /// Lose a life, let the ship react, end the game at zero lives
    pub fn player_hit(&mut self) {
        self.state.lives = self.state.lives.saturating_sub(1);
        self.publish_hud();

        if let HitOutcome::Struck { at } = self.player.hit() {
            self.explosions.push(Explosion::new(at));
        }

        if self.state.lives == 0 {
            self.game_over();
        }
    }

    /// Step the meter to the next slot and light it
    pub fn advance_meter(&mut self) -> UpgradeKind {
        let kind = self.state.meter.advance();
        log::debug!("Power meter advanced to position {}", self.state.meter.position());
        self.publish_hud();
        kind
    }

    pub fn reset_meter(&mut self) {
        self.state.meter.reset();
        self.publish_hud();
    }

    /// Spend the meter on the selected upgrade. Does nothing (and logs) when
    /// the meter is off.
    pub fn activate_power_up(&mut self) -> bool {
        let Some(kind) = self.state.meter.take() else {
            log::debug!("No power-ups available");
            return false;
        };
        self.player.apply_upgrade(kind);
        self.publish_hud();
        true
    }

    /// Effect of picking up a capsule
    pub fn collect_capsule(&mut self, kind: CapsuleKind) {
        match kind {
            CapsuleKind::Red => {
                self.advance_meter();
                self.add_score(RED_CAPSULE_SCORE);
            }
            CapsuleKind::Blue => {
                for enemy in &mut self.enemies {
                    enemy.destroy();
                }
                log::debug!("Blue capsule: all enemies destroyed");
                self.add_score(BLUE_CAPSULE_SCORE);
            }
        }
    }

    /// Aftermath of a kill: explosion, score, maybe a capsule
    pub(crate) fn enemy_killed(&mut self, pos: Vec2) {
        self.explosions.push(Explosion::new(pos));
        self.add_score(ENEMY_KILL_SCORE);

        if self.rng.random::<f64>() < CAPSULE_DROP_CHANCE {
            let kind = CapsuleKind::roll(&mut self.rng);
            self.capsules.push(Capsule::new(kind, pos));
        }
    }

    /// Per-tick Bernoulli spawns
    pub fn run_spawners(&mut self) {
        if self.rng.random::<f64>() < self.config.enemy_spawn_chance {
            self.spawn_enemy();
        }
        if self.rng.random::<f64>() < self.config.capsule_spawn_chance {
            self.spawn_capsule();
        }
    }

    /// New enemy just off the right edge
    pub fn spawn_enemy(&mut self) {
        let field = self.playfield();
        let y = self.rng.random::<f32>() * (field.y - ENEMY_SPAWN_OFFSET).max(0.0);
        let enemy = Enemy::new(Vec2::new(field.x + ENEMY_SPAWN_OFFSET, y), &mut self.rng);
        self.enemies.push(enemy);
    }

    /// New capsule just off the right edge
    pub fn spawn_capsule(&mut self) {
        let field = self.playfield();
        let kind = CapsuleKind::roll(&mut self.rng);
        let y = self.rng.random::<f32>() * (field.y - CAPSULE_SPAWN_OFFSET).max(0.0);
        self.capsules
            .push(Capsule::new(kind, Vec2::new(field.x + CAPSULE_SPAWN_OFFSET, y)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Session {
        let mut session = Session::new(GameConfig::default());
        session.start_game();
        session.drain_ui_events();
        session
    }

    #[test]
    fn test_new_session_waits_on_title() {
        let session = Session::new(GameConfig::default());
        assert_eq!(session.phase(), GamePhase::Start);
        assert_eq!(session.background.stars.len(), 100);
    }

    #[test]
    fn test_start_game_resets_everything() {
        let mut session = playing();
        session.add_score(500);
        session.advance_meter();
        session.spawn_enemy();
        session.player.rect.pos = Vec2::new(10.0, 10.0);

        session.start_game();
        let state = session.state();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.stage, 1);
        assert_eq!(state.meter.position(), -1);
        assert!(!state.meter.is_active());
        assert_eq!(session.player.rect.pos, Vec2::new(100.0, 300.0));
        assert!(session.enemies.is_empty());

        let events = session.drain_ui_events();
        assert_eq!(events[events.len() - 2], UiEvent::OverlaysHidden);
    }

    #[test]
    fn test_confirm_only_outside_play() {
        let mut session = Session::new(GameConfig::default());
        assert!(session.confirm());
        assert!(!session.confirm());

        session.game_over();
        assert!(session.confirm());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_red_capsule_advances_meter_and_scores() {
        let mut session = playing();
        session.collect_capsule(CapsuleKind::Red);
        assert_eq!(session.state().meter.position(), 0);
        assert!(session.state().meter.is_active());
        assert_eq!(session.state().score, RED_CAPSULE_SCORE);

        for expected in [1, 2, 3, 4, 5, 0, 1] {
            session.collect_capsule(CapsuleKind::Red);
            assert_eq!(session.state().meter.position(), expected);
        }
    }

    #[test]
    fn test_blue_capsule_wipes_enemies_without_explosions() {
        let mut session = playing();
        session.spawn_enemy();
        session.spawn_enemy();
        session.collect_capsule(CapsuleKind::Blue);

        assert!(session.enemies.iter().all(|e| e.destroyed));
        assert!(session.explosions.is_empty());
        assert_eq!(session.state().score, BLUE_CAPSULE_SCORE);
    }

    #[test]
    fn test_activate_applies_selected_upgrade() {
        let mut session = playing();
        assert!(!session.activate_power_up());

        session.collect_capsule(CapsuleKind::Red);
        session.collect_capsule(CapsuleKind::Red);
        assert!(session.activate_power_up());
        assert!(session.player.weapons().has_missile());
        assert_eq!(session.state().meter.position(), -1);
        assert!(!session.state().meter.is_active());
        assert!(!session.activate_power_up());
    }

    #[test]
    fn test_reset_meter_clears_selection() {
        let mut session = playing();
        session.collect_capsule(CapsuleKind::Red);
        session.drain_ui_events();

        session.reset_meter();
        assert_eq!(session.state().meter.position(), -1);
        assert!(!session.activate_power_up());
        let events = session.drain_ui_events();
        assert!(matches!(events[0], UiEvent::Hud(HudSnapshot { selected: None, .. })));
    }

    #[test]
    fn test_player_hit_publishes_lives_before_game_over() {
        let config = GameConfig {
            max_lives: 1,
            ..Default::default()
        };
        let mut session = Session::new(config);
        session.start_game();
        session.add_score(700);
        session.drain_ui_events();

        session.player_hit();
        assert_eq!(session.phase(), GamePhase::Over);

        let events = session.drain_ui_events();
        assert!(matches!(events[0], UiEvent::Hud(HudSnapshot { lives: 0, .. })));
        assert_eq!(events[1], UiEvent::GameOver { final_score: 700 });
    }

    #[test]
    fn test_enemy_kill_drops_at_most_one_capsule() {
        let mut drops = 0;
        for seed in 0..200 {
            let mut session = Session::new(GameConfig::default().with_seed(seed));
            session.start_game();
            session.enemy_killed(Vec2::new(300.0, 200.0));

            assert_eq!(session.explosions.len(), 1);
            assert_eq!(session.state().score, ENEMY_KILL_SCORE);
            assert!(session.capsules.len() <= 1);
            if let Some(capsule) = session.capsules.first() {
                assert_eq!(capsule.rect.pos, Vec2::new(300.0, 200.0));
                drops += 1;
            }
        }
        // ~30% of kills drop something
        assert!((30..=90).contains(&drops), "drops = {drops}");
    }

    #[test]
    fn test_spawned_enemy_starts_off_screen() {
        let mut session = playing();
        session.spawn_enemy();
        let enemy = &session.enemies[0];
        assert_eq!(enemy.rect.x(), 850.0);
        assert!((0.0..550.0).contains(&enemy.rect.y()));
    }

    #[test]
    fn test_spawned_capsule_starts_off_screen() {
        let mut session = playing();
        for _ in 0..50 {
            session.spawn_capsule();
        }
        for capsule in &session.capsules {
            assert_eq!(capsule.rect.x(), 830.0);
            assert!((0.0..570.0).contains(&capsule.rect.y()));
            assert_eq!(capsule.rect.size, Vec2::splat(20.0));
        }
        // Mostly red
        let red = session
            .capsules
            .iter()
            .filter(|c| c.kind == CapsuleKind::Red)
            .count();
        assert!(red > 25, "red = {red}");
    }

    #[test]
    fn test_capsule_spawner_fires_at_full_chance() {
        let config = GameConfig {
            enemy_spawn_chance: 0.0,
            capsule_spawn_chance: 1.0,
            ..Default::default()
        };
        let mut session = Session::new(config);
        session.start_game();
        session.run_spawners();
        session.run_spawners();
        assert_eq!(session.capsules.len(), 2);
        assert!(session.enemies.is_empty());
    }
}

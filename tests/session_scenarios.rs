//! End-to-end scenarios driven through the public tick/render API

use glam::Vec2;
use nebula_strike::sim::{
    BulletKind, CapsuleKind, EnemyBullet, Entity, GamePhase, Leader, PlayerBullet, Session,
    UpgradeKind, render, tick,
};
use nebula_strike::{DrawList, Game, GameConfig, HudState, InputState, Key, UiEvent};

const FRAME: f32 = 1.0 / 60.0;

fn quiet(config: GameConfig) -> GameConfig {
    GameConfig {
        enemy_spawn_chance: 0.0,
        capsule_spawn_chance: 0.0,
        ..config
    }
}

fn playing(config: GameConfig) -> Session {
    let mut session = Session::new(quiet(config));
    session.start_game();
    session.drain_ui_events();
    session
}

/// Enemy bullet that will sit exactly on the ship after one tick
fn bullet_on_player(session: &mut Session) {
    let at = session.player.rect.pos + Vec2::new(5.0, 0.0);
    session.enemy_bullets.push(EnemyBullet::new(at));
}

/// Enemy near the middle of the field, out of the ship's way
fn enemy_in_open(session: &mut Session, health: i32) {
    session.spawn_enemy();
    let enemy = session.enemies.last_mut().unwrap();
    enemy.rect.pos = Vec2::new(400.0, 100.0);
    enemy.health = health;
}

#[test]
fn fresh_session_starts_clean() {
    let mut session = Session::new(GameConfig::default());
    session.spawn_enemy();
    session.start_game();

    let state = session.state();
    assert_eq!(state.score, 0);
    assert_eq!(state.lives, 3);
    assert_eq!(state.stage, 1);
    assert_eq!(state.meter.position(), -1);
    assert_eq!(session.player.rect.pos, Vec2::new(100.0, 300.0));
    assert!(session.enemies.is_empty());
    assert!(session.enemy_bullets.is_empty());
    assert!(session.player_bullets.is_empty());
    assert!(session.capsules.is_empty());
    assert!(session.explosions.is_empty());
}

#[test]
fn enemy_bullet_costs_a_life() {
    let mut session = playing(GameConfig::default());
    bullet_on_player(&mut session);

    tick(&mut session, &InputState::new(), FRAME);

    assert_eq!(session.state().lives, 2);
    assert!(session.enemy_bullets[0].is_destroyed());
    assert!(session.player.is_invincible());
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.explosions.len(), 1);
}

#[test]
fn last_life_ends_the_game() {
    let mut session = playing(GameConfig {
        max_lives: 1,
        ..Default::default()
    });
    session.add_score(1200);
    session.drain_ui_events();
    bullet_on_player(&mut session);

    tick(&mut session, &InputState::new(), FRAME);

    assert_eq!(session.state().lives, 0);
    assert_eq!(session.phase(), GamePhase::Over);

    let mut hud = HudState::default();
    let events = session.drain_ui_events();
    assert_eq!(events.last(), Some(&UiEvent::GameOver { final_score: 1200 }));
    nebula_strike::ui::apply_events(events, &mut hud);
    assert_eq!(hud.lives, 0);
    assert!(hud.game_over_visible);
    assert_eq!(hud.final_score, Some(1200));

    // Frozen afterwards
    let bullets = session.enemy_bullets.len();
    tick(&mut session, &InputState::new(), FRAME);
    assert_eq!(session.enemy_bullets.len(), bullets);
}

#[test]
fn killing_an_enemy_scores_and_explodes() {
    let mut drops = 0;
    for seed in 0..100 {
        let mut session = playing(GameConfig::default().with_seed(seed));
        enemy_in_open(&mut session, 1);
        session
            .player_bullets
            .push(PlayerBullet::new(BulletKind::Normal, Vec2::new(400.0, 110.0)));

        tick(&mut session, &InputState::new(), FRAME);

        let enemy = &session.enemies[0];
        assert!(enemy.is_destroyed());
        assert!(enemy.health <= 0);
        assert_eq!(session.state().score, 100);
        assert_eq!(session.explosions.len(), 1);
        assert_eq!(session.explosions[0].center, enemy.rect.pos);
        assert!(session.capsules.len() <= 1);
        if let Some(capsule) = session.capsules.first() {
            assert_eq!(capsule.rect.pos, enemy.rect.pos);
            drops += 1;
        }
    }
    assert!((10..=50).contains(&drops), "drops = {drops}");
}

#[test]
fn red_capsules_cycle_the_meter() {
    let mut session = playing(GameConfig::default());
    let mut seen = Vec::new();
    for _ in 0..8 {
        session.collect_capsule(CapsuleKind::Red);
        seen.push(session.state().meter.position());
        assert!(session.state().meter.is_active());
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 0, 1]);
    assert_eq!(session.state().meter.selected(), Some(UpgradeKind::Missile));

    assert!(session.activate_power_up());
    assert_eq!(session.state().meter.position(), -1);
    assert!(!session.state().meter.is_active());
    assert!(session.player.weapons().has_missile());
}

#[test]
fn shield_soaks_two_hits_then_breaks() {
    let mut session = playing(GameConfig {
        max_lives: 5,
        ..Default::default()
    });
    session.player.apply_upgrade(UpgradeKind::Shield);
    session.player.apply_upgrade(UpgradeKind::Laser);

    for _ in 0..2 {
        bullet_on_player(&mut session);
        tick(&mut session, &InputState::new(), FRAME);
        assert!(!session.player.is_invincible());
        assert!(session.explosions.is_empty());
    }
    assert!(!session.player.has_shield());
    assert!(session.player.weapons().has_laser());

    bullet_on_player(&mut session);
    tick(&mut session, &InputState::new(), FRAME);
    assert!(session.player.is_invincible());
    assert!(!session.player.weapons().has_laser());
    assert_eq!(session.explosions.len(), 1);
}

#[test]
fn option_chain_trails_and_caps() {
    let mut session = playing(GameConfig::default());
    for _ in 0..6 {
        session.player.apply_upgrade(UpgradeKind::Option);
    }
    let followers = session.player.followers();
    assert_eq!(followers.len(), 4);
    assert_eq!(followers[0].leader, Leader::Player);
    for (n, follower) in followers.iter().enumerate().skip(1) {
        assert_eq!(follower.leader, Leader::Follower(n - 1));
    }

    let mut input = InputState::new();
    input.press(Key::Down);
    input.press(Key::Fire);
    for _ in 0..40 {
        tick(&mut session, &input, FRAME);
    }
    let player_y = session.player.rect.y();
    let first = session.player.followers()[0].rect.y();
    assert!(first < player_y, "option should lag behind the ship");
    // Every option fires with the ship
    assert!(session.player_bullets.len() >= 5);
}

#[test]
fn destroyed_entities_are_inert() {
    let mut session = playing(GameConfig::default());
    enemy_in_open(&mut session, 1);
    session.enemies[0].destroy();
    session
        .player_bullets
        .push(PlayerBullet::new(BulletKind::Normal, Vec2::new(400.0, 110.0)));

    let mut list = DrawList::new();
    render(&session, &mut list);
    assert!(list.rects_with(nebula_strike::Color::RED).is_empty());

    tick(&mut session, &InputState::new(), FRAME);
    assert!(session.enemies.is_empty());
    assert!(!session.player_bullets[0].is_destroyed());
    assert_eq!(session.state().score, 0);
}

#[test]
fn browser_style_game_flow() {
    let mut game = Game::new(quiet(GameConfig::default()));
    let mut list = DrawList::new();
    let mut hud = HudState::default();

    game.frame(0.0, &mut list, &mut hud);
    assert!(hud.start_visible);
    assert!(list.texts().contains(&"Press ENTER to Start"));

    assert!(game.key_down_code("Enter"));
    game.apply_ui(&mut hud);
    assert!(!hud.start_visible);

    game.session.collect_capsule(CapsuleKind::Red);
    game.apply_ui(&mut hud);
    assert_eq!(hud.selected_slot(), Some(UpgradeKind::SpeedUp));
    assert_eq!(hud.score, 100);

    game.key_down_code("Space");
    game.apply_ui(&mut hud);
    assert_eq!(hud.selected_slot(), None);
    assert_eq!(game.session.player.speed_level(), 1);

    game.key_down_code("ArrowRight");
    list.reset();
    game.frame(1000.0 / 60.0, &mut list, &mut hud);
    assert_eq!(game.session.player.rect.x(), 106.0);
    assert!(list.texts().contains(&"Power Meter: 0"));
}

//! Collision resolution
//!
//! Runs once per tick after everything has moved, on post-move, pre-purge
//! positions. Destroyed entities never take part.

use super::entities::Entity;
use super::session::Session;

/// Box-vs-box overlap between any two entities
#[inline]
pub fn overlaps(a: &impl Entity, b: &impl Entity) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Resolve every collision category, in order
pub fn resolve_collisions(session: &mut Session) {
    player_vs_enemies(session);
    player_vs_enemy_bullets(session);
    bullets_vs_enemies(session);
    player_vs_capsules(session);
}

/// First enemy touching the ship costs a life; the rest wait for next tick
fn player_vs_enemies(session: &mut Session) {
    if session.player.is_invincible() {
        return;
    }
    let touching = session
        .enemies
        .iter()
        .find(|e| !e.destroyed && overlaps(&session.player, *e))
        .map(|e| e.kind());
    if let Some(kind) = touching {
        log::debug!("Player rammed by {kind:?}");
        session.player_hit();
    }
}

/// First enemy bullet touching the ship costs a life and is consumed
fn player_vs_enemy_bullets(session: &mut Session) {
    if session.player.is_invincible() {
        return;
    }
    let hit = session
        .enemy_bullets
        .iter()
        .position(|b| !b.destroyed && overlaps(&session.player, b));
    if let Some(i) = hit {
        log::debug!("Player hit by {:?}", session.enemy_bullets[i].kind());
        session.player_hit();
        session.enemy_bullets[i].destroy();
    }
}

/// Each bullet damages the first live enemy it overlaps, then is spent.
/// An enemy can take several bullets in one tick if it survives the first.
fn bullets_vs_enemies(session: &mut Session) {
    for b in 0..session.player_bullets.len() {
        if session.player_bullets[b].destroyed {
            continue;
        }
        let bullet_box = session.player_bullets[b].rect;
        let target = session
            .enemies
            .iter()
            .position(|e| !e.destroyed && bullet_box.overlaps(&e.rect));

        if let Some(e) = target {
            let damage = session.player_bullets[b].damage;
            let enemy = &mut session.enemies[e];
            let pos = enemy.rect.pos;
            if enemy.hit(damage) {
                session.enemy_killed(pos);
            }
            session.player_bullets[b].destroy();
        }
    }
}

/// Every capsule touching the ship is collected
fn player_vs_capsules(session: &mut Session) {
    for c in 0..session.capsules.len() {
        let capsule = &session.capsules[c];
        if capsule.destroyed || !overlaps(&session.player, capsule) {
            continue;
        }
        let kind = capsule.kind;
        session.collect_capsule(kind);
        session.capsules[c].destroy();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;
    use crate::consts::*;
    use crate::sim::entities::{BulletKind, Capsule, CapsuleKind, EnemyBullet, PlayerBullet};
    use crate::sim::state::GamePhase;

    fn playing() -> Session {
        let mut session = Session::new(GameConfig::default());
        session.start_game();
        session
    }

    fn enemy_at(session: &mut Session, pos: Vec2, health: i32) {
        session.spawn_enemy();
        let enemy = session.enemies.last_mut().unwrap();
        enemy.rect.pos = pos;
        enemy.health = health;
    }

    #[test]
    fn test_enemy_contact_hits_once_per_tick() {
        let mut session = playing();
        let at = session.player.rect.pos;
        enemy_at(&mut session, at, 1);
        enemy_at(&mut session, at, 1);

        resolve_collisions(&mut session);
        assert_eq!(session.state().lives, 2);
        // Contact does not hurt the enemy
        assert!(session.enemies.iter().all(|e| !e.destroyed));
    }

    #[test]
    fn test_enemy_bullet_consumed_on_hit() {
        let mut session = playing();
        let at = session.player.rect.pos;
        session.enemy_bullets.push(EnemyBullet::new(at));
        session.enemy_bullets.push(EnemyBullet::new(at));

        resolve_collisions(&mut session);
        assert_eq!(session.state().lives, 2);
        assert!(session.enemy_bullets[0].destroyed);
        assert!(!session.enemy_bullets[1].destroyed);
        assert!(session.player.is_invincible());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_invincible_player_is_not_hit() {
        let mut session = playing();
        session.player.hit();
        let at = session.player.rect.pos;
        session.enemy_bullets.push(EnemyBullet::new(at));

        resolve_collisions(&mut session);
        assert_eq!(session.state().lives, 3);
        assert!(!session.enemy_bullets[0].destroyed);
    }

    #[test]
    fn test_bullet_spent_on_first_enemy_only() {
        let mut session = playing();
        enemy_at(&mut session, Vec2::new(400.0, 100.0), 1);
        enemy_at(&mut session, Vec2::new(400.0, 100.0), 1);
        session
            .player_bullets
            .push(PlayerBullet::new(BulletKind::Normal, Vec2::new(405.0, 110.0)));

        resolve_collisions(&mut session);
        assert!(session.enemies[0].destroyed);
        assert!(!session.enemies[1].destroyed);
        assert!(session.player_bullets[0].destroyed);
        assert_eq!(session.state().score, ENEMY_KILL_SCORE);
        assert_eq!(session.explosions.len(), 1);
    }

    #[test]
    fn test_tough_enemy_takes_several_bullets_in_one_tick() {
        let mut session = playing();
        enemy_at(&mut session, Vec2::new(400.0, 100.0), 3);
        for _ in 0..3 {
            session
                .player_bullets
                .push(PlayerBullet::new(BulletKind::Normal, Vec2::new(405.0, 110.0)));
        }

        resolve_collisions(&mut session);
        assert!(session.enemies[0].destroyed);
        assert!(session.player_bullets.iter().all(|b| b.destroyed));
        // Only one kill is scored
        assert_eq!(session.explosions.len(), 1);
    }

    #[test]
    fn test_dead_enemy_does_not_absorb_bullets() {
        let mut session = playing();
        enemy_at(&mut session, Vec2::new(400.0, 100.0), 1);
        for _ in 0..2 {
            session
                .player_bullets
                .push(PlayerBullet::new(BulletKind::Laser, Vec2::new(405.0, 110.0)));
        }

        resolve_collisions(&mut session);
        assert!(session.player_bullets[0].destroyed);
        assert!(!session.player_bullets[1].destroyed);
        assert_eq!(session.state().score, ENEMY_KILL_SCORE);
    }

    #[test]
    fn test_all_touching_capsules_collected() {
        let mut session = playing();
        let at = session.player.rect.pos;
        session.capsules.push(Capsule::new(CapsuleKind::Red, at));
        session.capsules.push(Capsule::new(CapsuleKind::Red, at));
        session
            .capsules
            .push(Capsule::new(CapsuleKind::Red, Vec2::new(600.0, 50.0)));

        resolve_collisions(&mut session);
        assert!(session.capsules[0].destroyed);
        assert!(session.capsules[1].destroyed);
        assert!(!session.capsules[2].destroyed);
        assert_eq!(session.state().meter.position(), 1);
        assert_eq!(session.state().score, 2 * RED_CAPSULE_SCORE);
    }
}

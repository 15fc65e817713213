//! Collision detection
//!
//! Two kinds of contact: projectile→enemy hits and enemy→center reaches.
//! Everything is plain distance checks against circles.

use glam::Vec2;

use super::effects::{GameEvent, TextTone};
use super::state::{Enemy, EntityId, Motion, Projectile, Simulation};
use crate::consts::{BALLISTIC_HIT_RADIUS_SQ, CENTER_REACH_RADIUS, PLAYER_HIT_FLASH_MS};

/// A projectile striking an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: EntityId,
    pub enemy: EntityId,
    pub damage: f32,
    pub crit: bool,
}

/// Enemy struck by a projectile, if any
///
/// Homing shots only ever hit their own target, and only when movement
/// reported them `in_contact`. Ballistic shots take the first enemy in store
/// order within range of their new position, not necessarily the nearest.
pub fn projectile_hit(projectile: &Projectile, enemies: &[Enemy], in_contact: bool) -> Option<EntityId> {
    match projectile.motion {
        Motion::Homing { target } => enemies
            .iter()
            .find(|e| e.id == target && in_contact)
            .map(|e| e.id),
        Motion::Ballistic { .. } => enemies
            .iter()
            .find(|e| e.pos.distance_squared(projectile.pos) < BALLISTIC_HIT_RADIUS_SQ)
            .map(|e| e.id),
    }
}

/// Collect hits and remove the projectiles that landed
///
/// `contacts` lists the homing projectiles movement found within range.
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    enemies: &[Enemy],
    contacts: &[EntityId],
) -> Vec<Hit> {
    let mut hits = Vec::new();
    projectiles.retain(|p| match projectile_hit(p, enemies, contacts.contains(&p.id)) {
        Some(enemy) => {
            hits.push(Hit {
                projectile: p.id,
                enemy,
                damage: p.damage,
                crit: p.crit,
            });
            false
        }
        None => true,
    });
    hits
}

/// Check if an enemy has reached the fish
pub fn enemy_reached_center(pos: Vec2, center: Vec2) -> bool {
    pos.distance(center) < CENTER_REACH_RADIUS
}

/// Remove every enemy at the center, returning them in store order
pub fn remove_reached(enemies: &mut Vec<Enemy>, center: Vec2) -> Vec<Enemy> {
    let mut reached = Vec::new();
    enemies.retain(|e| {
        if enemy_reached_center(e.pos, center) {
            reached.push(e.clone());
            false
        } else {
            true
        }
    });
    reached
}

/// Reach phase: enemies at the center are removed and cost one life each
///
/// Losses from the same tick are summed and applied once, floored at zero.
/// Returns the number of lives lost.
pub fn reach_phase(sim: &mut Simulation, now_ms: f64) -> u32 {
    let center = sim.center();
    let reached = remove_reached(&mut sim.entities.enemies, center);
    if reached.is_empty() {
        return 0;
    }

    let loss = reached.len() as u32;
    for _ in &reached {
        let text = sim.effects.spawn_text(
            now_ms,
            center - Vec2::new(0.0, 80.0),
            "Shaken!",
            TextTone::PlayerHit,
            2.5,
        );
        sim.emit(GameEvent::FloatingText(text));
    }

    let state = &mut sim.state;
    state.lives = state.lives.saturating_sub(loss);
    state.damage_taken_this_level += loss;
    let lives_left = state.lives;
    sim.effects.flash(now_ms, PLAYER_HIT_FLASH_MS);
    log::debug!("{loss} enemies reached the fish, {lives_left} lives left");
    sim.emit(GameEvent::PlayerHit {
        lives_lost: loss,
        lives_left,
    });
    loss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Archetype, EntityStore, ProjectileVariant};

    fn shot(id: EntityId, pos: Vec2, motion: Motion) -> Projectile {
        Projectile {
            id,
            pos,
            speed: 8.0,
            damage: 10.0,
            crit: false,
            variant: ProjectileVariant::Normal,
            motion,
        }
    }

    #[test]
    fn test_homing_hits_only_its_target() {
        let mut store = EntityStore::new();
        let a = store.spawn_enemy(Archetype::Normal, Vec2::new(100.0, 100.0), 20.0, 1.0, "a");
        let b = store.spawn_enemy(Archetype::Normal, Vec2::new(300.0, 100.0), 20.0, 1.0, "b");

        // Sitting on top of `a` but aimed at `b`
        let p = shot(1, Vec2::new(100.0, 100.0), Motion::Homing { target: b });
        assert_eq!(projectile_hit(&p, &store.enemies, false), None);

        let p = shot(2, Vec2::new(115.0, 100.0), Motion::Homing { target: a });
        assert_eq!(projectile_hit(&p, &store.enemies, true), Some(a));
        assert_eq!(projectile_hit(&p, &store.enemies, false), None);
    }

    #[test]
    fn test_ballistic_takes_first_in_store_order() {
        let mut store = EntityStore::new();
        let far = store.spawn_enemy(Archetype::Normal, Vec2::new(135.0, 100.0), 20.0, 1.0, "far");
        let _near = store.spawn_enemy(Archetype::Normal, Vec2::new(101.0, 100.0), 20.0, 1.0, "near");
        let p = shot(
            1,
            Vec2::new(100.0, 100.0),
            Motion::Ballistic {
                velocity: Vec2::X,
            },
        );
        assert_eq!(projectile_hit(&p, &store.enemies, false), Some(far));
    }

    #[test]
    fn test_ballistic_radius_is_exclusive() {
        let mut store = EntityStore::new();
        store.spawn_enemy(Archetype::Normal, Vec2::new(140.0, 100.0), 20.0, 1.0, "edge");
        let p = shot(
            1,
            Vec2::new(100.0, 100.0),
            Motion::Ballistic {
                velocity: Vec2::X,
            },
        );
        assert_eq!(projectile_hit(&p, &store.enemies, false), None);
    }

    #[test]
    fn test_resolve_removes_landed_projectiles() {
        let mut store = EntityStore::new();
        let a = store.spawn_enemy(Archetype::Normal, Vec2::new(100.0, 100.0), 20.0, 1.0, "a");
        let mut shots = vec![
            shot(1, Vec2::new(105.0, 100.0), Motion::Homing { target: a }),
            shot(2, Vec2::new(500.0, 500.0), Motion::Homing { target: a }),
            shot(3, Vec2::new(110.0, 110.0), Motion::Ballistic { velocity: Vec2::Y }),
        ];
        let hits = resolve_projectile_hits(&mut shots, &store.enemies, &[1]);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.enemy == a));
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].id, 2);
    }

    #[test]
    fn test_remove_reached() {
        let center = Vec2::new(400.0, 300.0);
        let mut store = EntityStore::new();
        store.spawn_enemy(Archetype::Normal, center + Vec2::new(89.0, 0.0), 20.0, 1.0, "in");
        store.spawn_enemy(Archetype::Normal, center + Vec2::new(90.0, 0.0), 20.0, 1.0, "out");
        let reached = remove_reached(&mut store.enemies, center);
        assert_eq!(reached.len(), 1);
        assert_eq!(reached[0].word, "in");
        assert_eq!(store.enemies.len(), 1);
    }
}

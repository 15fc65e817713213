//! Damage resolution
//!
//! Runs in two passes so that every hit of a tick sees the same enemy
//! positions: first aggregate per-enemy damage, then apply damage and
//! knockback and filter out the dead.

use glam::Vec2;

use super::collision::Hit;
use super::effects::{GameEvent, TextTone};
use super::state::{Archetype, Enemy, EntityId, Simulation};
use crate::direction_to;

/// All damage one enemy takes this tick
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDamage {
    pub enemy: EntityId,
    pub total: f32,
    /// Individual (damage, crit) contributions in hit order
    pub hits: Vec<(f32, bool)>,
}

/// An enemy removed by damage
#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub id: EntityId,
    pub archetype: Archetype,
    pub pos: Vec2,
}

/// Pass one: group hits by enemy, preserving first-hit order
pub fn aggregate_hits(hits: &[Hit]) -> Vec<EnemyDamage> {
    let mut out: Vec<EnemyDamage> = Vec::new();
    for hit in hits {
        match out.iter_mut().find(|d| d.enemy == hit.enemy) {
            Some(entry) => {
                entry.total += hit.damage;
                entry.hits.push((hit.damage, hit.crit));
            }
            None => out.push(EnemyDamage {
                enemy: hit.enemy,
                total: hit.damage,
                hits: vec![(hit.damage, hit.crit)],
            }),
        }
    }
    out
}

/// Displacement pushing an enemy away from `center`
///
/// Zero when the enemy sits exactly on the center.
pub fn knockback_offset(pos: Vec2, center: Vec2, knockback: f32, archetype: Archetype) -> Vec2 {
    direction_to(center, pos)
        .map(|dir| dir * knockback * archetype.knockback_multiplier())
        .unwrap_or(Vec2::ZERO)
}

/// Floating text for a single hit
pub fn damage_label(damage: f32, crit: bool) -> String {
    if crit {
        format!("CRIT {}!", damage.floor())
    } else {
        format!("-{}", damage.floor())
    }
}

/// Pass two: apply damage, knockback and hit stamps; remove the dead
///
/// Returns the removed enemies in store order.
pub fn apply_damage(
    enemies: &mut Vec<Enemy>,
    damage: &[EnemyDamage],
    center: Vec2,
    knockback: f32,
    now_ms: f64,
) -> Vec<Kill> {
    for entry in damage {
        if let Some(enemy) = enemies.iter_mut().find(|e| e.id == entry.enemy) {
            enemy.hp -= entry.total;
            enemy.pos += knockback_offset(enemy.pos, center, knockback, enemy.archetype);
            enemy.last_hit_ms = Some(now_ms);
        }
    }

    let mut kills = Vec::new();
    enemies.retain(|e| {
        if e.hp <= 0.0 {
            kills.push(Kill {
                id: e.id,
                archetype: e.archetype,
                pos: e.pos,
            });
            false
        } else {
            true
        }
    });
    kills
}

/// Combat phase: resolve this tick's hits against the live enemies
pub fn combat_phase(sim: &mut Simulation, hits: &[Hit], now_ms: f64) {
    if hits.is_empty() {
        return;
    }
    let center = sim.center();
    let damage = aggregate_hits(hits);

    // Effects are placed at pre-knockback positions
    for entry in &damage {
        let Some(pos) = sim.entities.enemy(entry.enemy).map(|e| e.pos) else {
            continue;
        };
        for &(amount, crit) in &entry.hits {
            let spark = sim.effects.spawn_spark(now_ms, pos, crit);
            sim.emit(GameEvent::HitSpark(spark));
            let (tone, scale) = if crit {
                (TextTone::Crit, 1.5)
            } else {
                (TextTone::Damage, 1.0)
            };
            let text = sim.effects.spawn_text(
                now_ms,
                pos - Vec2::new(0.0, 20.0),
                damage_label(amount, crit),
                tone,
                scale,
            );
            sim.emit(GameEvent::FloatingText(text));
        }
    }

    let knockback = sim.stats.knockback;
    let kills = apply_damage(&mut sim.entities.enemies, &damage, center, knockback, now_ms);

    for kill in kills {
        let gained = kill.archetype.kill_score();
        sim.state.score += gained;
        sim.state.kills_this_level += 1;
        log::trace!("Enemy #{} ({:?}) destroyed", kill.id, kill.archetype);

        let text = sim
            .effects
            .spawn_text(now_ms, kill.pos, "Break!", TextTone::Kill, 2.2);
        sim.emit(GameEvent::FloatingText(text));
        sim.emit(GameEvent::EnemyKilled {
            id: kill.id,
            archetype: kill.archetype,
            pos: kill.pos,
        });
        let total = sim.state.score;
        sim.emit(GameEvent::ScoreChanged {
            delta: gained,
            total,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EntityStore;

    fn hit(enemy: EntityId, damage: f32, crit: bool) -> Hit {
        Hit {
            projectile: 0,
            enemy,
            damage,
            crit,
        }
    }

    #[test]
    fn test_aggregate_sums_per_enemy() {
        let damage = aggregate_hits(&[hit(2, 10.0, false), hit(1, 5.0, true), hit(2, 15.0, true)]);
        assert_eq!(damage.len(), 2);
        assert_eq!(damage[0].enemy, 2);
        assert_eq!(damage[0].total, 25.0);
        assert_eq!(damage[0].hits, vec![(10.0, false), (15.0, true)]);
        assert_eq!(damage[1].total, 5.0);
    }

    #[test]
    fn test_tank_knockback_is_half_normal() {
        let center = Vec2::new(400.0, 300.0);
        let pos = Vec2::new(400.0, 100.0);
        let normal = knockback_offset(pos, center, 20.0, Archetype::Normal);
        let tank = knockback_offset(pos, center, 20.0, Archetype::Tank);
        assert_eq!(normal, Vec2::new(0.0, -20.0));
        assert_eq!(tank.length() * 2.0, normal.length());
        assert_eq!(
            knockback_offset(pos, center, 20.0, Archetype::Boss),
            Vec2::new(0.0, -4.0)
        );
    }

    #[test]
    fn test_knockback_zero_distance() {
        let c = Vec2::new(10.0, 10.0);
        assert_eq!(knockback_offset(c, c, 50.0, Archetype::Fast), Vec2::ZERO);
    }

    #[test]
    fn test_multi_hit_knocks_back_once() {
        let center = Vec2::new(400.0, 300.0);
        let mut store = EntityStore::new();
        let id = store.spawn_enemy(Archetype::Normal, Vec2::new(400.0, 100.0), 100.0, 1.0, "x");
        let damage = aggregate_hits(&[hit(id, 10.0, false), hit(id, 10.0, false)]);
        let kills = apply_damage(&mut store.enemies, &damage, center, 20.0, 5.0);
        assert!(kills.is_empty());
        let enemy = store.enemy(id).unwrap();
        assert_eq!(enemy.hp, 80.0);
        assert_eq!(enemy.pos, Vec2::new(400.0, 80.0));
        assert_eq!(enemy.last_hit_ms, Some(5.0));
    }

    #[test]
    fn test_dead_enemies_removed() {
        let center = Vec2::new(400.0, 300.0);
        let mut store = EntityStore::new();
        let a = store.spawn_enemy(Archetype::Normal, Vec2::new(0.0, 0.0), 10.0, 1.0, "a");
        let b = store.spawn_enemy(Archetype::Boss, Vec2::new(800.0, 0.0), 10.0, 1.0, "b");
        let damage = aggregate_hits(&[hit(a, 10.0, false), hit(b, 10.0, false)]);
        let kills = apply_damage(&mut store.enemies, &damage, center, 0.0, 0.0);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].id, a);
        assert_eq!(store.enemies.len(), 1);
        assert_eq!(store.enemies[0].hp, 40.0);
    }

    #[test]
    fn test_damage_label() {
        assert_eq!(damage_label(10.0, false), "-10");
        assert_eq!(damage_label(15.0, true), "CRIT 15!");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_health_never_increases(
                hp in 1.0f32..500.0,
                volleys in prop::collection::vec(prop::collection::vec(0.0f32..60.0, 0..4), 1..20),
            ) {
                let center = Vec2::new(400.0, 300.0);
                let mut store = EntityStore::new();
                let id = store.spawn_enemy(Archetype::Tank, Vec2::new(100.0, 300.0), hp, 1.0, "x");
                let mut last_hp = store.enemy(id).map(|e| e.hp);
                let mut removed = 0;
                for (tick, volley) in volleys.iter().enumerate() {
                    let hits: Vec<Hit> = volley.iter().map(|&d| hit(id, d, false)).collect();
                    let damage = aggregate_hits(&hits);
                    removed += apply_damage(&mut store.enemies, &damage, center, 5.0, tick as f64).len();
                    let now_hp = store.enemy(id).map(|e| e.hp);
                    if let (Some(before), Some(after)) = (last_hp, now_hp) {
                        prop_assert!(after <= before);
                    }
                    if let Some(after) = now_hp {
                        prop_assert!(after > 0.0);
                    }
                    last_hp = now_hp;
                }
                prop_assert!(removed <= 1);
                prop_assert_eq!(removed == 1, store.enemy(id).is_none());
            }
        }
    }
}

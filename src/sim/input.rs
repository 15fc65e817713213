//! Firing and manual input
//!
//! A volley is one primary shot at the enemy nearest the center plus an
//! optional split shot at another enemy. Manual taps fire a volley and add a
//! shockwave; auto-fire fires volleys on the attack-speed cadence.

use glam::Vec2;
use rand::Rng;

use super::effects::GameEvent;
use super::state::{Enemy, EntityId, GameStatus, Motion, Projectile, ProjectileVariant, Simulation};
use crate::consts::{
    COMBO_WINDOW_MS, SHOCKWAVE_PUSH, SHOCKWAVE_RADIUS, TAP_FLASH_MS, VISIBLE_MARGIN,
};
use crate::error::FlowError;
use crate::settings::Viewport;
use crate::{direction_to, unit_from_angle};

/// Projectiles created by one volley
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volley {
    pub primary: EntityId,
    pub split: Option<EntityId>,
}

/// Enemy nearest to `center` by squared distance (first wins ties)
pub fn nearest_to(enemies: &[Enemy], center: Vec2) -> Option<&Enemy> {
    enemies.iter().fold(None, |best: Option<&Enemy>, e| match best {
        Some(b) if b.pos.distance_squared(center) <= e.pos.distance_squared(center) => Some(b),
        _ => Some(e),
    })
}

/// True when `pos` lies inside the viewport grown by the visibility margin
pub fn is_visible(pos: Vec2, viewport: &Viewport) -> bool {
    pos.x > -VISIBLE_MARGIN
        && pos.x < viewport.width + VISIBLE_MARGIN
        && pos.y > -VISIBLE_MARGIN
        && pos.y < viewport.height + VISIBLE_MARGIN
}

/// Push every enemy near the center straight outward
pub fn shockwave(enemies: &mut [Enemy], center: Vec2) {
    for enemy in enemies.iter_mut() {
        if enemy.pos.distance(center) >= SHOCKWAVE_RADIUS {
            continue;
        }
        if let Some(dir) = direction_to(center, enemy.pos) {
            enemy.pos += dir * SHOCKWAVE_PUSH;
        }
    }
}

/// Create one projectile from the center
///
/// Crit and damage are rolled here and never recomputed. Visible targets
/// get a homing shot; anything else gets a ballistic shot in a random
/// direction.
pub fn fire_shot(
    sim: &mut Simulation,
    target: Option<(EntityId, Vec2)>,
    variant: ProjectileVariant,
) -> EntityId {
    let stats = sim.stats;
    let crit = sim.rng.random::<f32>() < stats.crit_chance;
    let damage = stats.shot_damage(crit);

    let motion = match target {
        Some((id, pos)) if is_visible(pos, &sim.settings.viewport) => Motion::Homing { target: id },
        _ => {
            let theta = sim.rng.random_range(0.0..std::f32::consts::TAU);
            Motion::Ballistic {
                velocity: unit_from_angle(theta) * stats.projectile_speed,
            }
        }
    };

    let id = sim.entities.next_entity_id();
    let pos = sim.center();
    sim.entities.projectiles.push(Projectile {
        id,
        pos,
        speed: stats.projectile_speed,
        damage,
        crit,
        variant,
        motion,
    });
    id
}

/// Fire a primary shot and, on a multi-shot roll, a split shot
pub fn fire_volley(sim: &mut Simulation) -> Volley {
    let center = sim.center();
    let primary_target = nearest_to(&sim.entities.enemies, center).map(|e| (e.id, e.pos));
    let primary = fire_shot(sim, primary_target, ProjectileVariant::Normal);

    let mut split = None;
    let roll = sim.rng.random::<f32>();
    if roll < sim.stats.multi_shot_chance && sim.entities.enemies.len() > 1 {
        if let Some((primary_id, _)) = primary_target {
            let others: Vec<(EntityId, Vec2)> = sim
                .entities
                .enemies
                .iter()
                .filter(|e| e.id != primary_id)
                .map(|e| (e.id, e.pos))
                .collect();
            if !others.is_empty() {
                let pick = others[sim.rng.random_range(0..others.len())];
                split = Some(fire_shot(sim, Some(pick), ProjectileVariant::Split));
            }
        }
    }

    Volley { primary, split }
}

/// Handle a manual tap at `pointer` (screen coords, cosmetic only)
pub fn manual_tap(sim: &mut Simulation, pointer: Vec2, now_ms: f64) -> Result<Volley, FlowError> {
    if sim.status != GameStatus::Playing {
        return Err(FlowError::InvalidTransition {
            action: "tap",
            status: sim.status,
        });
    }
    sim.now_ms = now_ms;

    let state = &mut sim.state;
    state.combo = match state.last_tap_ms {
        Some(last) if now_ms - last <= COMBO_WINDOW_MS => state.combo + 1,
        _ => 1,
    };
    state.max_combo = state.max_combo.max(state.combo);
    state.taps_this_level += 1;
    state.last_tap_ms = Some(now_ms);

    sim.effects.flash(now_ms, TAP_FLASH_MS);
    let ripple = sim.effects.spawn_ripple(now_ms, pointer);
    sim.emit(GameEvent::Ripple(ripple));

    let volley = fire_volley(sim);
    let center = sim.center();
    shockwave(&mut sim.entities.enemies, center);
    Ok(volley)
}

/// Auto-fire phase: fires a volley when the cadence allows and a target exists
pub fn auto_fire_phase(sim: &mut Simulation, now_ms: f64) -> Option<Volley> {
    if !sim.settings.auto_fire || sim.entities.enemies.is_empty() {
        return None;
    }
    let interval = sim.stats.fire_interval_ms()?;
    if sim.next_volley_ms.is_some_and(|next| now_ms < next) {
        return None;
    }
    sim.next_volley_ms = Some(now_ms + interval);
    Some(fire_volley(sim))
}

/// Drop the combo once the window since the last tap has passed
pub fn expire_combo(sim: &mut Simulation, now_ms: f64) {
    let state = &mut sim.state;
    if state.combo > 0 && state.last_tap_ms.is_some_and(|last| now_ms - last > COMBO_WINDOW_MS) {
        state.combo = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Archetype;
    use crate::stats::PlayerStats;

    fn playing(stats: PlayerStats) -> Simulation {
        let settings = Settings::default()
            .with_viewport(800.0, 600.0)
            .with_auto_fire(false)
            .with_initial_stats(stats);
        let mut sim = Simulation::new(settings);
        sim.start(0.0).unwrap();
        sim
    }

    fn no_crit() -> PlayerStats {
        PlayerStats {
            crit_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_tap_requires_playing() {
        let mut sim = Simulation::new(Settings::default());
        assert!(manual_tap(&mut sim, Vec2::ZERO, 0.0).is_err());
        assert!(sim.entities.projectiles.is_empty());
    }

    #[test]
    fn test_tap_targets_nearest_to_center() {
        let mut sim = playing(no_crit());
        let far = sim
            .entities
            .spawn_enemy(Archetype::Normal, Vec2::new(400.0, 0.0), 20.0, 1.0, "far");
        let near = sim
            .entities
            .spawn_enemy(Archetype::Normal, Vec2::new(600.0, 300.0), 20.0, 1.0, "near");
        let volley = manual_tap(&mut sim, Vec2::ZERO, 10.0).unwrap();
        assert!(volley.split.is_none());
        let shot = &sim.entities.projectiles[0];
        assert_eq!(shot.id, volley.primary);
        assert_eq!(shot.motion, Motion::Homing { target: near });
        assert_ne!(shot.motion, Motion::Homing { target: far });
        assert_eq!(shot.damage, 10.0);
        assert_eq!(shot.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_offscreen_target_gets_ballistic_shot() {
        let mut sim = playing(no_crit());
        sim.entities
            .spawn_enemy(Archetype::Normal, Vec2::new(400.0, -51.0), 20.0, 1.0, "off");
        manual_tap(&mut sim, Vec2::ZERO, 0.0).unwrap();
        match sim.entities.projectiles[0].motion {
            Motion::Ballistic { velocity } => assert!((velocity.length() - 8.0).abs() < 1e-4),
            other => panic!("expected ballistic, got {other:?}"),
        }
    }

    #[test]
    fn test_tap_without_enemies_fires_ballistic() {
        let mut sim = playing(no_crit());
        let volley = manual_tap(&mut sim, Vec2::ZERO, 0.0).unwrap();
        assert!(volley.split.is_none());
        assert!(matches!(
            sim.entities.projectiles[0].motion,
            Motion::Ballistic { .. }
        ));
    }

    #[test]
    fn test_split_shot_never_hits_primary_target() {
        let mut sim = playing(PlayerStats {
            multi_shot_chance: 1.0,
            ..no_crit()
        });
        let near = sim
            .entities
            .spawn_enemy(Archetype::Normal, Vec2::new(400.0, 200.0), 20.0, 1.0, "near");
        sim.entities
            .spawn_enemy(Archetype::Normal, Vec2::new(100.0, 100.0), 20.0, 1.0, "a");
        sim.entities
            .spawn_enemy(Archetype::Normal, Vec2::new(700.0, 500.0), 20.0, 1.0, "b");

        for i in 0..20 {
            sim.entities.projectiles.clear();
            let volley = fire_volley(&mut sim);
            let split_id = volley.split.expect("split shot with chance 1.0");
            let split = sim
                .entities
                .projectiles
                .iter()
                .find(|p| p.id == split_id)
                .unwrap();
            assert_eq!(split.variant, ProjectileVariant::Split, "iteration {i}");
            assert_ne!(split.motion, Motion::Homing { target: near });
        }
    }

    #[test]
    fn test_split_requires_two_enemies() {
        let mut sim = playing(PlayerStats {
            multi_shot_chance: 1.0,
            ..no_crit()
        });
        sim.entities
            .spawn_enemy(Archetype::Normal, Vec2::new(400.0, 200.0), 20.0, 1.0, "solo");
        assert!(fire_volley(&mut sim).split.is_none());
    }

    #[test]
    fn test_shockwave_pushes_nearby_only() {
        let center = Vec2::new(400.0, 300.0);
        let mut sim = playing(no_crit());
        sim.entities
            .spawn_enemy(Archetype::Boss, Vec2::new(400.0, 100.0), 20.0, 1.0, "near");
        sim.entities
            .spawn_enemy(Archetype::Normal, Vec2::new(400.0, 50.0), 20.0, 1.0, "edge");
        sim.entities.spawn_enemy(Archetype::Normal, center, 20.0, 1.0, "dead center");
        shockwave(&mut sim.entities.enemies, center);
        // Fixed push, independent of archetype
        assert_eq!(sim.entities.enemies[0].pos, Vec2::new(400.0, 60.0));
        assert_eq!(sim.entities.enemies[1].pos, Vec2::new(400.0, 50.0));
        assert_eq!(sim.entities.enemies[2].pos, center);
    }

    #[test]
    fn test_combo_counts_taps_in_window() {
        let mut sim = playing(no_crit());
        manual_tap(&mut sim, Vec2::ZERO, 0.0).unwrap();
        manual_tap(&mut sim, Vec2::ZERO, 500.0).unwrap();
        manual_tap(&mut sim, Vec2::ZERO, 1400.0).unwrap();
        assert_eq!(sim.state.combo, 3);
        manual_tap(&mut sim, Vec2::ZERO, 3000.0).unwrap();
        assert_eq!(sim.state.combo, 1);
        assert_eq!(sim.state.max_combo, 3);
        assert_eq!(sim.state.taps_this_level, 4);

        expire_combo(&mut sim, 3900.0);
        assert_eq!(sim.state.combo, 1);
        expire_combo(&mut sim, 4001.0);
        assert_eq!(sim.state.combo, 0);
    }

    #[test]
    fn test_auto_fire_cadence() {
        let mut sim = playing(no_crit());
        sim.settings.auto_fire = true;
        assert!(auto_fire_phase(&mut sim, 0.0).is_none(), "no target, no volley");
        sim.entities
            .spawn_enemy(Archetype::Normal, Vec2::new(400.0, 100.0), 20.0, 1.0, "x");
        assert!(auto_fire_phase(&mut sim, 100.0).is_some());
        assert!(auto_fire_phase(&mut sim, 1099.0).is_none());
        assert!(auto_fire_phase(&mut sim, 1100.0).is_some());
        assert_eq!(sim.entities.projectiles.len(), 2);
    }
}

//! Wave scheduling
//!
//! Spawns at most one enemy per tick, paced by the level's spawn interval,
//! until the level quota is reached.

use glam::Vec2;
use rand::Rng;

use super::effects::GameEvent;
use super::state::{Archetype, EntityId, Simulation};
use crate::consts::SPAWN_RADIUS_FACTOR;
use crate::settings::Viewport;
use crate::unit_from_angle;

/// Per-level spawn bookkeeping
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTracker {
    /// Enemies spawned this level
    pub spawned: u32,
    /// Simulation time of the most recent spawn this level
    pub last_spawn_ms: Option<f64>,
}

impl SpawnTracker {
    /// True when quota and interval both allow a spawn at `now_ms`
    pub fn is_due(&self, now_ms: f64, total: u32, interval_ms: f64) -> bool {
        if self.spawned >= total {
            return false;
        }
        match self.last_spawn_ms {
            Some(last) => now_ms - last >= interval_ms,
            None => true,
        }
    }

    pub fn record(&mut self, now_ms: f64) {
        self.spawned += 1;
        self.last_spawn_ms = Some(now_ms);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Archetype for a uniform draw `roll` in [0, 1)
///
/// Thresholds are checked in a fixed order: boss first, then the fixed
/// fast and tank bands.
pub fn archetype_for_roll(roll: f32, boss_chance: f32) -> Archetype {
    if roll < boss_chance {
        Archetype::Boss
    } else if roll < 0.25 {
        Archetype::Fast
    } else if roll < 0.45 {
        Archetype::Tank
    } else {
        Archetype::Normal
    }
}

/// Spawn point on the off-screen circle for a given angle
pub fn spawn_point(viewport: &Viewport, theta: f32) -> Vec2 {
    let center = super::state::viewport_center(viewport);
    let radius = viewport.width.max(viewport.height) * SPAWN_RADIUS_FACTOR;
    center + unit_from_angle(theta) * radius
}

/// Spawn phase: emits at most one enemy
pub fn spawn_phase(sim: &mut Simulation, now_ms: f64) -> Option<EntityId> {
    let wave = sim.wave()?;
    let (total, interval, base_hp, base_speed, boss_chance) = (
        wave.total_enemies,
        wave.spawn_interval_ms,
        wave.enemy_hp,
        wave.enemy_speed,
        wave.boss_chance,
    );
    if !sim.spawner.is_due(now_ms, total, interval) {
        return None;
    }

    let theta = sim.rng.random_range(0.0..std::f32::consts::TAU);
    let pos = spawn_point(&sim.settings.viewport, theta);
    let archetype = archetype_for_roll(sim.rng.random::<f32>(), boss_chance);
    let words = archetype.words();
    let word = words[sim.rng.random_range(0..words.len())];

    let id = sim
        .entities
        .spawn_enemy(archetype, pos, base_hp, base_speed, word);
    sim.spawner.record(now_ms);
    log::trace!(
        "Spawned {:?} #{} ({}/{}) at {:?}",
        archetype,
        id,
        sim.spawner.spawned,
        total,
        pos
    );
    sim.emit(GameEvent::EnemySpawned { id, archetype });
    Some(id)
}

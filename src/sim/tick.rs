//! Frame-driven simulation tick
//!
//! Advances the simulation by the time elapsed since the previous tick.
//! Phases run in a fixed order; only `Playing` does gameplay work.

use glam::Vec2;

use super::collision::{reach_phase, resolve_projectile_hits};
use super::combat::combat_phase;
use super::input::{auto_fire_phase, expire_combo};
use super::movement::{advance_enemies, advance_projectiles};
use super::spawn::spawn_phase;
use super::state::{GameStatus, Simulation};
use crate::upgrades::UpgradeId;

/// Input commands gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Manual taps at pointer positions (cosmetic only)
    pub taps: Vec<Vec2>,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Abandon the run
    pub give_up: bool,
    /// Upgrade pick while upgrading
    pub upgrade: Option<UpgradeId>,
}

impl TickInput {
    pub fn tap(pointer: Vec2) -> Self {
        Self {
            taps: vec![pointer],
            ..Default::default()
        }
    }
}

fn apply_input(sim: &mut Simulation, input: &TickInput, now_ms: f64) {
    if input.toggle_pause {
        if let Err(err) = sim.toggle_pause() {
            log::debug!("Ignored pause toggle: {err}");
        }
    }
    if input.give_up {
        if let Err(err) = sim.give_up() {
            log::debug!("Ignored give up: {err}");
        }
    }
    if let Some(id) = input.upgrade {
        if let Err(err) = sim.select_upgrade(id, now_ms) {
            log::debug!("Ignored upgrade pick: {err}");
        }
    }
    for &pointer in &input.taps {
        if let Err(err) = sim.tap(pointer, now_ms) {
            log::debug!("Ignored tap: {err}");
            break;
        }
    }
}

/// Advance the simulation to `now_ms`
pub fn tick(sim: &mut Simulation, input: &TickInput, now_ms: f64) {
    apply_input(sim, input, now_ms);

    sim.now_ms = now_ms;
    sim.effects.expire(now_ms);
    expire_combo(sim, now_ms);

    if sim.status != GameStatus::Playing {
        sim.clock.reset();
        return;
    }

    let dt = sim.clock.advance(now_ms) as f32;

    // Spawn
    spawn_phase(sim, now_ms);

    // Auto-fire
    if sim.settings.auto_fire {
        auto_fire_phase(sim, now_ms);
    }

    // Movement
    let center = sim.center();
    advance_enemies(&mut sim.entities.enemies, center, dt);
    let viewport = sim.settings.viewport;
    let entities = &mut sim.entities;
    let contacts = advance_projectiles(&mut entities.projectiles, &entities.enemies, &viewport, dt);

    // Projectile hits, then damage
    let hits = resolve_projectile_hits(&mut entities.projectiles, &entities.enemies, &contacts);
    combat_phase(sim, &hits, now_ms);

    // Enemies at the fish
    reach_phase(sim, now_ms);
    if sim.state.lives == 0 {
        sim.game_over();
        return;
    }

    // Win check
    let quota_met = sim
        .wave()
        .is_some_and(|wave| sim.spawner.spawned >= wave.total_enemies);
    if quota_met && sim.entities.enemies.is_empty() {
        sim.complete_level(now_ms);
    }
}

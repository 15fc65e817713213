//! Wooden Fish - a turret defense mini-game simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, combat, game flow)
//! - `waves`: Static per-level wave table
//! - `upgrades`: Static upgrade catalog and pure stat transforms
//! - `stats`: Upgradeable player attack parameters
//! - `history`: Per-level stats and end-of-run summary
//! - `settings`: JSON-backed simulation settings

pub mod error;
pub mod history;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod upgrades;
pub mod waves;

pub use error::{FlowError, SettingsError};
pub use history::{LevelStats, RunHistory, RunSummary};
pub use settings::Settings;
pub use stats::PlayerStats;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame length the speed constants are tuned against (ms)
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// A gap longer than this between ticks re-anchors the clock instead of catching up
    pub const MAX_TICK_GAP_MS: f64 = 1000.0;

    /// Starting player lives
    pub const BASE_LIVES: u32 = 3;

    /// Enemies closer than this to the center have reached the fish
    pub const CENTER_REACH_RADIUS: f32 = 90.0;
    /// Spawn circle radius as a fraction of the larger viewport dimension
    pub const SPAWN_RADIUS_FACTOR: f32 = 0.7;

    /// Homing projectiles hit when closer than this to their target
    pub const HOMING_HIT_RADIUS: f32 = 20.0;
    /// Ballistic projectiles hit when squared distance is below this (40px combined radius)
    pub const BALLISTIC_HIT_RADIUS_SQ: f32 = 1600.0;
    /// Ballistic projectiles are dropped this far past a viewport edge
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Targets inside the viewport grown by this margin get homing shots
    pub const VISIBLE_MARGIN: f32 = 50.0;

    /// Tap shockwave reach from center
    pub const SHOCKWAVE_RADIUS: f32 = 250.0;
    /// Tap shockwave push distance
    pub const SHOCKWAVE_PUSH: f32 = 40.0;

    /// Score for a regular kill
    pub const KILL_SCORE: u64 = 10;
    /// Score for a boss kill
    pub const BOSS_KILL_SCORE: u64 = 100;

    /// Taps further apart than this break the combo (ms)
    pub const COMBO_WINDOW_MS: f64 = 1000.0;

    /// Presentation timers (ms)
    pub const FLOATING_TEXT_MS: f64 = 800.0;
    pub const HIT_SPARK_MS: f64 = 300.0;
    pub const RIPPLE_MS: f64 = 500.0;
    pub const PLAYER_HIT_FLASH_MS: f64 = 100.0;
    pub const TAP_FLASH_MS: f64 = 50.0;
    /// Enemies render a hit flash for this long after being struck
    pub const ENEMY_FLASH_MS: f64 = 100.0;

    /// Number of upgrades offered between levels
    pub const UPGRADE_OFFER_COUNT: usize = 3;
}

/// Scale factor converting a per-reference-frame speed to this tick's displacement
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::REFERENCE_FRAME_MS
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Unit vector for an angle in radians
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_scale_reference() {
        assert!((frame_scale(16.0) - 1.0).abs() < f32::EPSILON);
        assert!((frame_scale(32.0) - 2.0).abs() < f32::EPSILON);
        assert_eq!(frame_scale(0.0), 0.0);
    }

    #[test]
    fn test_direction_to_zero_distance() {
        let p = Vec2::new(5.0, 5.0);
        assert!(direction_to(p, p).is_none());
        let d = direction_to(Vec2::ZERO, Vec2::new(0.0, 3.0)).unwrap();
        assert!((d - Vec2::Y).length() < 1e-6);
    }
}

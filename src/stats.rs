//! Upgradeable player attack parameters
//!
//! Frozen for the duration of a level; only an upgrade transform applied
//! between levels produces a new value.

use serde::{Deserialize, Serialize};

/// Player attack stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Damage per non-critical projectile
    pub attack_damage: f32,
    /// Auto-fire volleys per second
    pub attack_speed: f32,
    /// Projectile speed in px per reference frame
    pub projectile_speed: f32,
    /// Probability (0-1) a projectile is critical
    pub crit_chance: f32,
    /// Damage multiplier applied to critical projectiles
    pub crit_multiplier: f32,
    /// Probability (0-1) a volley adds a split shot
    pub multi_shot_chance: f32,
    /// Knockback distance in px applied per hit tick
    pub knockback: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            attack_damage: 10.0,
            attack_speed: 1.0,
            projectile_speed: 8.0,
            crit_chance: 0.05,
            crit_multiplier: 1.5,
            multi_shot_chance: 0.0,
            knockback: 0.0,
        }
    }
}

impl PlayerStats {
    /// Damage carried by a projectile, decided once at creation
    pub fn shot_damage(&self, crit: bool) -> f32 {
        if crit {
            self.attack_damage * self.crit_multiplier
        } else {
            self.attack_damage
        }
    }

    /// Milliseconds between auto-fire volleys (`None` when auto-fire is impossible)
    pub fn fire_interval_ms(&self) -> Option<f64> {
        if self.attack_speed > 0.0 {
            Some(1000.0 / self.attack_speed as f64)
        } else {
            None
        }
    }
}

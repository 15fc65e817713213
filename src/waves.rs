//! Static per-level wave table
//!
//! Levels are 1-based. Looking up a level past the end of the table clamps
//! to the last entry.

use serde::{Deserialize, Serialize};

/// Theme of a level (drives tap sound and fish skin in the presentation layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    Wood,
    Copper,
    Iron,
    Steel,
    Diamond,
}

impl Material {
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Wood => "Agarwood",
            Material::Copper => "Purple Copper",
            Material::Iron => "Dark Iron",
            Material::Steel => "Fine Steel",
            Material::Diamond => "Relic",
        }
    }
}

/// Immutable spawn parameters for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub material: Material,
    /// Enemies spawned over the whole level
    pub total_enemies: u32,
    /// Minimum time between spawns (ms)
    pub spawn_interval_ms: f64,
    /// Base speed in px per reference frame
    pub enemy_speed: f32,
    pub enemy_hp: f32,
    /// Probability (0-1) a spawn is a boss
    pub boss_chance: f32,
    /// Flavor text shown on level intro
    pub difficulty_text: String,
}

/// Ordered wave table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveTable {
    waves: Vec<WaveConfig>,
}

impl Default for WaveTable {
    fn default() -> Self {
        Self::new(default_waves())
    }
}

impl WaveTable {
    pub fn new(waves: Vec<WaveConfig>) -> Self {
        Self { waves }
    }

    /// Config for a 1-based level, clamped into the table
    ///
    /// Returns `None` only for an empty table, which settings validation rejects.
    pub fn get(&self, level: u32) -> Option<&WaveConfig> {
        let last = self.waves.len().checked_sub(1)?;
        let index = (level.max(1) as usize - 1).min(last);
        self.waves.get(index)
    }

    /// Number of configured levels
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// True when `level` is the last configured level (or beyond it)
    pub fn is_final(&self, level: u32) -> bool {
        level as usize >= self.waves.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaveConfig> {
        self.waves.iter()
    }
}

fn wave(
    material: Material,
    total_enemies: u32,
    spawn_interval_ms: f64,
    enemy_speed: f32,
    enemy_hp: f32,
    boss_chance: f32,
    text: &str,
) -> WaveConfig {
    WaveConfig {
        material,
        total_enemies,
        spawn_interval_ms,
        enemy_speed,
        enemy_hp,
        boss_chance,
        difficulty_text: text.to_string(),
    }
}

fn default_waves() -> Vec<WaveConfig> {
    vec![
        wave(Material::Wood, 20, 1500.0, 0.8, 20.0, 0.0, "First Stirrings"),
        wave(Material::Copper, 30, 1200.0, 1.0, 40.0, 0.05, "Thoughts Run Wild"),
        wave(Material::Iron, 40, 1000.0, 1.2, 80.0, 0.1, "Demons Dance"),
        wave(Material::Steel, 60, 800.0, 1.5, 150.0, 0.15, "Karma Piles Up"),
        wave(Material::Diamond, 100, 600.0, 1.8, 300.0, 0.2, "All Paths Are One"),
    ]
}

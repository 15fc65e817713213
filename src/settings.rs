//! Simulation settings
//!
//! Loaded from JSON. Every field has a default, so a settings file only
//! needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::BASE_LIVES;
use crate::error::SettingsError;
use crate::stats::PlayerStats;
use crate::waves::WaveTable;

/// Screen area the fish defends (px)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Screen size; the fish sits at its center
    pub viewport: Viewport,
    /// Player lives at run start
    pub lives: u32,
    /// Turret fires on its own at `attack_speed`
    pub auto_fire: bool,
    /// Stats at run start (restored on restart)
    pub initial_stats: PlayerStats,
    /// Per-level wave parameters
    pub waves: WaveTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            viewport: Viewport::default(),
            lives: BASE_LIVES,
            auto_fire: true,
            initial_stats: PlayerStats::default(),
            waves: WaveTable::default(),
        }
    }
}

impl Settings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    pub fn with_auto_fire(mut self, enabled: bool) -> Self {
        self.auto_fire = enabled;
        self
    }

    pub fn with_waves(mut self, waves: WaveTable) -> Self {
        self.waves = waves;
        self
    }

    pub fn with_initial_stats(mut self, stats: PlayerStats) -> Self {
        self.initial_stats = stats;
        self
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} levels, seed {})",
            path.display(),
            settings.waves.len(),
            settings.seed
        );
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Viewport { width, height } = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(SettingsError::InvalidViewport { width, height });
        }
        if self.waves.is_empty() {
            return Err(SettingsError::EmptyWaveTable);
        }
        for (i, wave) in self.waves.iter().enumerate() {
            let level = i + 1;
            if !(0.0..=1.0).contains(&wave.boss_chance) {
                return Err(SettingsError::InvalidWave {
                    level,
                    reason: "boss_chance must be within [0, 1]",
                });
            }
            if wave.spawn_interval_ms <= 0.0 {
                return Err(SettingsError::InvalidWave {
                    level,
                    reason: "spawn_interval_ms must be positive",
                });
            }
            if wave.enemy_hp <= 0.0 {
                return Err(SettingsError::InvalidWave {
                    level,
                    reason: "enemy_hp must be positive",
                });
            }
        }
        let stats = &self.initial_stats;
        if !(0.0..=1.0).contains(&stats.crit_chance) {
            return Err(SettingsError::InvalidStats("crit_chance must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&stats.multi_shot_chance) {
            return Err(SettingsError::InvalidStats(
                "multi_shot_chance must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

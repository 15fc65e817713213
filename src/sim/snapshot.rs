//! Read-only per-frame view for renderers and UI

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{FloatingText, HitSpark, Ripple};
use super::state::{Archetype, EntityId, GameStatus, ProjectileVariant, Simulation};
use crate::consts::ENEMY_FLASH_MS;
use crate::waves::Material;

/// HUD values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub level: u32,
    pub material: Option<Material>,
    pub difficulty_text: Option<String>,
    pub lives: u32,
    pub max_lives: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub score: u64,
    pub kills: u32,
    /// Enemies still to spawn this level
    pub remaining_spawns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub pos: Vec2,
    pub health_ratio: f32,
    pub archetype: Archetype,
    pub word: String,
    /// Hit within the last flash window
    pub flashing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub pos: Vec2,
    pub crit: bool,
    pub variant: ProjectileVariant,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub hud: Hud,
    pub center: Vec2,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub texts: Vec<FloatingText>,
    pub sparks: Vec<HitSpark>,
    pub ripples: Vec<Ripple>,
    pub fish_flashing: bool,
}

impl Simulation {
    /// Build a snapshot at the latest tick time
    pub fn snapshot(&self) -> Snapshot {
        let now = self.now_ms;
        let wave = self.wave();
        let state = &self.state;
        let hud = Hud {
            level: state.level,
            material: wave.map(|w| w.material),
            difficulty_text: wave.map(|w| w.difficulty_text.clone()),
            lives: state.lives,
            max_lives: state.max_lives,
            combo: state.combo,
            max_combo: state.max_combo,
            score: state.score,
            kills: state.kills_this_level,
            remaining_spawns: wave
                .map(|w| w.total_enemies.saturating_sub(self.spawner.spawned))
                .unwrap_or(0),
        };

        let enemies = self
            .entities
            .enemies
            .iter()
            .map(|e| EnemyView {
                id: e.id,
                pos: e.pos,
                health_ratio: e.health_ratio(),
                archetype: e.archetype,
                word: e.word.clone(),
                flashing: e.last_hit_ms.is_some_and(|t| now - t < ENEMY_FLASH_MS),
            })
            .collect();

        let projectiles = self
            .entities
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                id: p.id,
                pos: p.pos,
                crit: p.crit,
                variant: p.variant,
            })
            .collect();

        Snapshot {
            status: self.status,
            hud,
            center: self.center(),
            enemies,
            projectiles,
            texts: self.effects.texts.clone(),
            sparks: self.effects.sparks.clone(),
            ripples: self.effects.ripples.clone(),
            fish_flashing: self.effects.is_flashing(now),
        }
    }
}

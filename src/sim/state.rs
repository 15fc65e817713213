//! Game state and core simulation types
//!
//! [`Simulation`] is the single context the tick driver owns; every phase
//! borrows it mutably for the duration of its work.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{Effects, GameEvent};
use super::spawn::SpawnTracker;
use crate::history::RunHistory;
use crate::settings::{Settings, Viewport};
use crate::stats::PlayerStats;
use crate::upgrades::UpgradeId;
use crate::waves::WaveConfig;

/// Entity identifier (unique within a run)
pub type EntityId = u32;

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Before the first run
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Level cleared, waiting for an upgrade pick
    Upgrading,
    /// Final level cleared
    Victory,
    /// Lives exhausted or gave up
    GameOver,
}

/// Enemy category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Normal,
    Fast,
    Tank,
    Boss,
}

impl Archetype {
    pub fn hp_multiplier(self) -> f32 {
        match self {
            Archetype::Normal => 1.0,
            Archetype::Fast => 0.5,
            Archetype::Tank => 2.5,
            Archetype::Boss => 5.0,
        }
    }

    pub fn speed_multiplier(self) -> f32 {
        match self {
            Archetype::Normal => 1.0,
            Archetype::Fast => 1.4,
            Archetype::Tank => 0.6,
            Archetype::Boss => 0.5,
        }
    }

    /// Knockback resistance (lower resists more)
    pub fn knockback_multiplier(self) -> f32 {
        match self {
            Archetype::Normal => 1.0,
            Archetype::Fast => 1.2,
            Archetype::Tank => 0.5,
            Archetype::Boss => 0.2,
        }
    }

    pub fn kill_score(self) -> u64 {
        match self {
            Archetype::Boss => crate::consts::BOSS_KILL_SCORE,
            _ => crate::consts::KILL_SCORE,
        }
    }

    /// Flavor words drawn for the enemy label
    pub fn words(self) -> &'static [&'static str] {
        match self {
            Archetype::Normal => &[
                "Overtime", "Hair Loss", "Rat Race", "Insomnia", "Bad Luck", "Single",
                "Revisions", "Scapegoat", "Early Rise", "Commute", "Blind Date",
            ],
            Archetype::Fast => &[
                "Mosquito", "Spoiler", "No Wi-Fi", "Low Battery", "Forgot Keys", "Queue",
                "Traffic", "Lag", "Noise", "Pop-up", "Nothing On", "Broke",
            ],
            Archetype::Tank => &[
                "30-Year Mortgage", "Midlife Crisis", "KPI Review", "Downgrade",
                "Body Anxiety", "Social Fear", "Big Bill", "Deadline", "Office Politics",
                "Family Chores",
            ],
            Archetype::Boss => &[
                "Greed", "Wrath", "Delusion", "Pride", "Doubt", "Parting", "Longing",
                "Resentment",
            ],
        }
    }
}

/// An enemy converging on the fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub archetype: Archetype,
    pub hp: f32,
    pub max_hp: f32,
    /// Speed in px per reference frame
    pub speed: f32,
    /// Simulation time of the most recent hit (for flash display)
    pub last_hit_ms: Option<f64>,
    /// Flavor label
    pub word: String,
}

impl Enemy {
    pub fn health_ratio(&self) -> f32 {
        if self.max_hp > 0.0 {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_boss(&self) -> bool {
        self.archetype == Archetype::Boss
    }
}

/// Projectile flavor (affects presentation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileVariant {
    Normal,
    Split,
}

/// How a projectile travels, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Steers toward the live position of one enemy
    Homing { target: EntityId },
    /// Fixed velocity in px per reference frame
    Ballistic { velocity: Vec2 },
}

/// A projectile fired from the fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    /// Speed in px per reference frame
    pub speed: f32,
    pub damage: f32,
    pub crit: bool,
    pub variant: ProjectileVariant,
    pub motion: Motion,
}

/// Live enemies and projectiles for the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    /// Active enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Active projectiles in fire order
    pub projectiles: Vec<Projectile>,
    next_id: EntityId,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an enemy of the given archetype scaled from base stats
    pub fn spawn_enemy(
        &mut self,
        archetype: Archetype,
        pos: Vec2,
        base_hp: f32,
        base_speed: f32,
        word: impl Into<String>,
    ) -> EntityId {
        let id = self.next_entity_id();
        let hp = base_hp * archetype.hp_multiplier();
        self.enemies.push(Enemy {
            id,
            pos,
            archetype,
            hp,
            max_hp: hp,
            speed: base_speed * archetype.speed_multiplier(),
            last_hit_ms: None,
            word: word.into(),
        });
        id
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Drop all entities (ids keep counting up)
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

/// HUD-level game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current level (1-based)
    pub level: u32,
    /// Player lives
    pub lives: u32,
    pub max_lives: u32,
    /// Consecutive taps within the combo window
    pub combo: u32,
    /// Best combo this level
    pub max_combo: u32,
    pub score: u64,
    /// Simulation time the current level started
    pub level_start_ms: f64,
    pub kills_this_level: u32,
    pub taps_this_level: u32,
    pub damage_taken_this_level: u32,
    /// Simulation time of the last manual tap
    pub last_tap_ms: Option<f64>,
}

impl GameState {
    pub fn new(lives: u32) -> Self {
        Self {
            level: 1,
            lives,
            max_lives: lives,
            combo: 0,
            max_combo: 0,
            score: 0,
            level_start_ms: 0.0,
            kills_this_level: 0,
            taps_this_level: 0,
            damage_taken_this_level: 0,
            last_tap_ms: None,
        }
    }

    /// Reset per-level counters for a fresh level
    pub fn begin_level(&mut self, now_ms: f64) {
        self.level_start_ms = now_ms;
        self.kills_this_level = 0;
        self.taps_this_level = 0;
        self.damage_taken_this_level = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.last_tap_ms = None;
    }
}

/// Delta-time anchor for the frame driver
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Elapsed ms since the previous tick; 0 on the first tick after a reset or a long gap
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) if now_ms >= last && now_ms - last <= crate::consts::MAX_TICK_GAP_MS => {
                now_ms - last
            }
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the anchor so time spent outside play is not replayed
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) settings: Settings,
    pub(crate) rng: Pcg32,
    pub(crate) status: GameStatus,
    pub(crate) state: GameState,
    pub(crate) stats: PlayerStats,
    pub(crate) entities: EntityStore,
    pub(crate) spawner: SpawnTracker,
    pub(crate) clock: FrameClock,
    /// Simulation time of the next auto-fire volley
    pub(crate) next_volley_ms: Option<f64>,
    pub(crate) history: RunHistory,
    /// Upgrades on offer while `Upgrading`
    pub(crate) offers: Vec<UpgradeId>,
    pub(crate) effects: Effects,
    pub(crate) events: Vec<GameEvent>,
    /// Timestamp of the latest tick or input
    pub(crate) now_ms: f64,
}

impl Simulation {
    /// Create an idle simulation from validated settings
    pub fn new(settings: Settings) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        let state = GameState::new(settings.lives);
        let stats = settings.initial_stats;
        Self {
            settings,
            rng,
            status: GameStatus::Idle,
            state,
            stats,
            entities: EntityStore::new(),
            spawner: SpawnTracker::default(),
            clock: FrameClock::default(),
            next_volley_ms: None,
            history: RunHistory::new(),
            offers: Vec::new(),
            effects: Effects::default(),
            events: Vec::new(),
            now_ms: 0.0,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// Direct entity access for scripted setups
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    pub fn offers(&self) -> &[UpgradeId] {
        &self.offers
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Enemies spawned so far this level
    pub fn spawned_this_level(&self) -> u32 {
        self.spawner.spawned
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Screen center (the fish)
    pub fn center(&self) -> Vec2 {
        viewport_center(&self.settings.viewport)
    }

    /// Wave parameters for the current level
    pub fn wave(&self) -> Option<&WaveConfig> {
        self.settings.waves.get(self.state.level)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Center point of a viewport
pub fn viewport_center(viewport: &Viewport) -> Vec2 {
    Vec2::new(viewport.width / 2.0, viewport.height / 2.0)
}

//! Game flow state machine
//!
//! Idle → Playing ⇄ Paused, Playing → Upgrading → Playing/Victory, and
//! Playing/Paused → GameOver. Rejected operations leave the simulation
//! untouched.

use super::effects::GameEvent;
use super::spawn::SpawnTracker;
use super::state::{EntityStore, GameState, GameStatus, Simulation};
use crate::consts::UPGRADE_OFFER_COUNT;
use crate::error::FlowError;
use crate::history::LevelStats;
use crate::upgrades::{UpgradeId, sample_offers};

impl Simulation {
    fn set_status(&mut self, to: GameStatus) {
        let from = self.status;
        if from == to {
            return;
        }
        log::debug!("Status {from:?} -> {to:?}");
        self.status = to;
        self.emit(GameEvent::StatusChanged { from, to });
    }

    fn reject(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            status: self.status,
        }
    }

    /// Start a fresh run from level 1 with initial stats and full lives
    pub fn start(&mut self, now_ms: f64) -> Result<(), FlowError> {
        if !matches!(
            self.status,
            GameStatus::Idle | GameStatus::GameOver | GameStatus::Victory
        ) {
            return Err(self.reject("start"));
        }

        self.state = GameState::new(self.settings.lives);
        self.state.begin_level(now_ms);
        self.stats = self.settings.initial_stats;
        self.entities = EntityStore::new();
        self.spawner = SpawnTracker::default();
        self.clock.reset();
        self.next_volley_ms = None;
        self.history.clear();
        self.offers.clear();
        self.effects.clear();
        self.now_ms = now_ms;

        log::info!(
            "Run started (seed {}, {} levels)",
            self.settings.seed,
            self.settings.waves.len()
        );
        self.set_status(GameStatus::Playing);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), FlowError> {
        if self.status != GameStatus::Playing {
            return Err(self.reject("pause"));
        }
        self.set_status(GameStatus::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), FlowError> {
        if self.status != GameStatus::Paused {
            return Err(self.reject("resume"));
        }
        self.clock.reset();
        self.set_status(GameStatus::Playing);
        Ok(())
    }

    pub fn toggle_pause(&mut self) -> Result<(), FlowError> {
        match self.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            _ => Err(self.reject("toggle_pause")),
        }
    }

    /// Abandon the run
    pub fn give_up(&mut self) -> Result<(), FlowError> {
        if !matches!(self.status, GameStatus::Playing | GameStatus::Paused) {
            return Err(self.reject("give_up"));
        }
        log::info!("Gave up on level {}", self.state.level);
        self.set_status(GameStatus::GameOver);
        Ok(())
    }

    /// Handle a manual tap; see [`super::input::manual_tap`]
    pub fn tap(&mut self, pointer: glam::Vec2, now_ms: f64) -> Result<(), FlowError> {
        super::input::manual_tap(self, pointer, now_ms).map(|_| ())
    }

    /// Lives ran out during play
    pub(crate) fn game_over(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        log::info!(
            "Game over on level {} with score {}",
            self.state.level,
            self.state.score
        );
        self.set_status(GameStatus::GameOver);
    }

    /// Record the cleared level and offer upgrades
    pub(crate) fn complete_level(&mut self, now_ms: f64) {
        if self.status != GameStatus::Playing {
            return;
        }
        let state = &self.state;
        let stats = LevelStats {
            level: state.level,
            taps: state.taps_this_level,
            max_combo: state.max_combo,
            time_taken_s: ((now_ms - state.level_start_ms) / 1000.0).max(0.0),
            kills: state.kills_this_level,
            damage_taken: state.damage_taken_this_level,
        };
        log::info!(
            "Level {} cleared in {:.1}s ({} kills, rank {:?})",
            stats.level,
            stats.time_taken_s,
            stats.kills,
            stats.rank()
        );
        self.history.record(stats.clone());
        self.offers = sample_offers(&mut self.rng, UPGRADE_OFFER_COUNT);
        self.entities.projectiles.clear();
        self.emit(GameEvent::LevelCleared(stats));
        self.set_status(GameStatus::Upgrading);
    }

    /// Apply an offered upgrade and continue to the next level (or win)
    pub fn select_upgrade(&mut self, id: UpgradeId, now_ms: f64) -> Result<(), FlowError> {
        if self.status != GameStatus::Upgrading {
            return Err(self.reject("select_upgrade"));
        }
        if !self.offers.contains(&id) {
            return Err(FlowError::UpgradeNotOffered(id));
        }

        self.stats = id.apply(self.stats);
        self.offers.clear();
        log::info!("Upgrade applied: {}", id.option().name);
        self.emit(GameEvent::UpgradeApplied(id));

        if self.settings.waves.is_final(self.state.level) {
            log::info!("Victory with score {}", self.state.score);
            self.set_status(GameStatus::Victory);
            return Ok(());
        }

        self.state.level += 1;
        self.state.begin_level(now_ms);
        self.spawner.reset();
        self.entities.clear();
        self.next_volley_ms = None;
        self.clock.reset();
        self.now_ms = now_ms;
        log::info!("Level {} begins", self.state.level);
        self.set_status(GameStatus::Playing);
        Ok(())
    }
}

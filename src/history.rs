//! Run history
//!
//! One [`LevelStats`] record per cleared level, aggregated into a
//! [`RunSummary`] for the end-of-run screen.

use serde::{Deserialize, Serialize};

/// Level titles by level (clamped to the last)
const LEVEL_TITLES: [&str; 5] = [
    "Worldly Ties",
    "Finding the Way",
    "Worries Fade",
    "Six Senses Pure",
    "Great Awakening",
];

/// Snapshot of one cleared level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    pub level: u32,
    pub taps: u32,
    pub max_combo: u32,
    /// Seconds from level start to clear
    pub time_taken_s: f64,
    pub kills: u32,
    /// Lives lost during the level
    pub damage_taken: u32,
}

/// Letter grade for a cleared level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LevelRank {
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

impl LevelStats {
    /// Manual taps per second over the level
    pub fn taps_per_second(&self) -> f64 {
        // Guard against instant clears
        let time = if self.time_taken_s > 0.0 {
            self.time_taken_s
        } else {
            1.0
        };
        self.taps as f64 / time
    }

    /// Grade from tap rate and best combo
    pub fn rank(&self) -> LevelRank {
        let cps = self.taps_per_second();
        let mut points = 0;
        points += if cps > 10.0 {
            5
        } else if cps > 8.0 {
            4
        } else if cps > 6.0 {
            3
        } else if cps > 4.0 {
            1
        } else {
            0
        };
        points += match self.max_combo {
            c if c > 80 => 5,
            c if c > 50 => 4,
            c if c > 30 => 2,
            c if c > 15 => 1,
            _ => 0,
        };

        match points {
            p if p >= 9 => LevelRank::SSS,
            p if p >= 7 => LevelRank::SS,
            p if p >= 6 => LevelRank::S,
            p if p >= 4 => LevelRank::A,
            p if p >= 2 => LevelRank::B,
            _ => LevelRank::C,
        }
    }

    pub fn title(&self) -> &'static str {
        let index = (self.level.max(1) as usize - 1).min(LEVEL_TITLES.len() - 1);
        LEVEL_TITLES[index]
    }
}

/// End-of-run title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunTitle {
    /// Fast tapping with long combos
    VictoriousBuddha,
    BoundlessMerit,
    Enlightened,
    StillWater,
}

impl RunTitle {
    pub fn description(&self) -> &'static str {
        match self {
            RunTitle::VictoriousBuddha => "Above and below the heavens, worries are ash!",
            RunTitle::BoundlessMerit => "Your golden light fills the universe.",
            RunTitle::Enlightened => "A clear heart, not a stray thought left.",
            RunTitle::StillWater => "Plain and simple is the truth.",
        }
    }
}

/// Aggregate over every cleared level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub levels_cleared: usize,
    pub total_time_s: f64,
    pub total_taps: u32,
    pub total_kills: u32,
    pub total_damage_taken: u32,
    pub max_combo: u32,
    pub taps_per_second: f64,
    pub title: RunTitle,
}

/// Per-level records for the current run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    pub levels: Vec<LevelStats>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn record(&mut self, stats: LevelStats) {
        self.levels.push(stats);
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    pub fn last(&self) -> Option<&LevelStats> {
        self.levels.last()
    }

    pub fn summary(&self) -> RunSummary {
        let total_time_s: f64 = self.levels.iter().map(|l| l.time_taken_s).sum();
        let total_taps: u32 = self.levels.iter().map(|l| l.taps).sum();
        let total_kills: u32 = self.levels.iter().map(|l| l.kills).sum();
        let total_damage_taken: u32 = self.levels.iter().map(|l| l.damage_taken).sum();
        let max_combo = self.levels.iter().map(|l| l.max_combo).max().unwrap_or(0);
        let taps_per_second = if total_time_s > 0.0 {
            total_taps as f64 / total_time_s
        } else {
            0.0
        };

        let title = if taps_per_second > 9.0 && max_combo > 100 {
            RunTitle::VictoriousBuddha
        } else if taps_per_second > 7.0 && max_combo > 60 {
            RunTitle::BoundlessMerit
        } else if taps_per_second > 5.0 {
            RunTitle::Enlightened
        } else {
            RunTitle::StillWater
        };

        RunSummary {
            levels_cleared: self.levels.len(),
            total_time_s,
            total_taps,
            total_kills,
            total_damage_taken,
            max_combo,
            taps_per_second,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: u32, taps: u32, max_combo: u32, time: f64) -> LevelStats {
        LevelStats {
            level,
            taps,
            max_combo,
            time_taken_s: time,
            kills: 20,
            damage_taken: 1,
        }
    }

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(level(1, 0, 0, 10.0).rank(), LevelRank::C);
        assert_eq!(level(1, 50, 20, 10.0).rank(), LevelRank::B);
        assert_eq!(level(1, 110, 90, 10.0).rank(), LevelRank::SSS);
        assert_eq!(level(1, 90, 40, 10.0).rank(), LevelRank::S);
    }

    #[test]
    fn test_zero_time_does_not_divide_by_zero() {
        assert_eq!(level(1, 5, 0, 0.0).taps_per_second(), 5.0);
    }

    #[test]
    fn test_title_clamps() {
        assert_eq!(level(1, 0, 0, 1.0).title(), "Worldly Ties");
        assert_eq!(level(9, 0, 0, 1.0).title(), "Great Awakening");
    }

    #[test]
    fn test_summary_totals() {
        let mut history = RunHistory::new();
        assert_eq!(history.summary().title, RunTitle::StillWater);
        history.record(level(1, 600, 120, 60.0));
        history.record(level(2, 400, 70, 40.0));
        let summary = history.summary();
        assert_eq!(summary.levels_cleared, 2);
        assert_eq!(summary.total_taps, 1000);
        assert_eq!(summary.total_kills, 40);
        assert_eq!(summary.total_damage_taken, 2);
        assert_eq!(summary.max_combo, 120);
        assert!((summary.taps_per_second - 10.0).abs() < 1e-9);
        assert_eq!(summary.title, RunTitle::VictoriousBuddha);
    }
}

//! Error types for settings loading and game flow operations

use thiserror::Error;

use crate::sim::GameStatus;
use crate::upgrades::UpgradeId;

/// Failure to load, save or validate [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("wave table is empty")]
    EmptyWaveTable,
    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
    #[error("wave {level}: {reason}")]
    InvalidWave { level: usize, reason: &'static str },
    #[error("player stats: {0}")]
    InvalidStats(&'static str),
}

/// A game flow operation that is not allowed in the current status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("cannot {action} while {status:?}")]
    InvalidTransition {
        action: &'static str,
        status: GameStatus,
    },
    #[error("upgrade {0:?} was not offered")]
    UpgradeNotOffered(UpgradeId),
}

//! Presentation feed
//!
//! Short-lived visual effects with fire-once expiry, plus the discrete event
//! queue consumed by UI collaborators. Nothing in here feeds back into combat.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Archetype, EntityId, GameStatus};
use crate::consts::{FLOATING_TEXT_MS, HIT_SPARK_MS, RIPPLE_MS};
use crate::history::LevelStats;
use crate::upgrades::UpgradeId;

/// Color class of a floating text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTone {
    Damage,
    Crit,
    Kill,
    PlayerHit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    pub tone: TextTone,
    pub scale: f32,
    /// Tilt in degrees
    pub rotation: f32,
    pub expires_at_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitSpark {
    pub id: u32,
    pub pos: Vec2,
    pub crit: bool,
    pub expires_at_ms: f64,
}

/// Cosmetic tap ripple at the pointer position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub id: u32,
    pub pos: Vec2,
    pub expires_at_ms: f64,
}

/// Discrete UI events, drained by the caller after each tick or input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StatusChanged { from: GameStatus, to: GameStatus },
    EnemySpawned { id: EntityId, archetype: Archetype },
    FloatingText(FloatingText),
    HitSpark(HitSpark),
    Ripple(Ripple),
    EnemyKilled { id: EntityId, archetype: Archetype, pos: Vec2 },
    ScoreChanged { delta: u64, total: u64 },
    PlayerHit { lives_lost: u32, lives_left: u32 },
    LevelCleared(LevelStats),
    UpgradeApplied(UpgradeId),
}

/// Live presentation effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub texts: Vec<FloatingText>,
    pub sparks: Vec<HitSpark>,
    pub ripples: Vec<Ripple>,
    /// The fish flashes until this time
    pub flash_until_ms: f64,
    next_id: u32,
}

impl Effects {
    fn next_effect_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }

    pub fn spawn_text(
        &mut self,
        now_ms: f64,
        pos: Vec2,
        text: impl Into<String>,
        tone: TextTone,
        scale: f32,
    ) -> FloatingText {
        let id = self.next_effect_id();
        // Hash jitter so the tilt looks hand-placed without touching the sim RNG
        let hash = id.wrapping_mul(2654435761);
        let rotation = ((hash % 1000) as f32 / 1000.0 - 0.5) * 25.0;
        let text = FloatingText {
            id,
            pos,
            text: text.into(),
            tone,
            scale,
            rotation,
            expires_at_ms: now_ms + FLOATING_TEXT_MS,
        };
        self.texts.push(text.clone());
        text
    }

    pub fn spawn_spark(&mut self, now_ms: f64, pos: Vec2, crit: bool) -> HitSpark {
        let spark = HitSpark {
            id: self.next_effect_id(),
            pos,
            crit,
            expires_at_ms: now_ms + HIT_SPARK_MS,
        };
        self.sparks.push(spark.clone());
        spark
    }

    pub fn spawn_ripple(&mut self, now_ms: f64, pos: Vec2) -> Ripple {
        let ripple = Ripple {
            id: self.next_effect_id(),
            pos,
            expires_at_ms: now_ms + RIPPLE_MS,
        };
        self.ripples.push(ripple.clone());
        ripple
    }

    /// Flash the fish for `duration_ms`, extending any running flash
    pub fn flash(&mut self, now_ms: f64, duration_ms: f64) {
        self.flash_until_ms = self.flash_until_ms.max(now_ms + duration_ms);
    }

    pub fn is_flashing(&self, now_ms: f64) -> bool {
        now_ms < self.flash_until_ms
    }

    /// Drop every effect whose timer has run out
    pub fn expire(&mut self, now_ms: f64) {
        self.texts.retain(|t| t.expires_at_ms > now_ms);
        self.sparks.retain(|s| s.expires_at_ms > now_ms);
        self.ripples.retain(|r| r.expires_at_ms > now_ms);
    }

    pub fn clear(&mut self) {
        self.texts.clear();
        self.sparks.clear();
        self.ripples.clear();
        self.flash_until_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_expire_independently() {
        let mut fx = Effects::default();
        fx.spawn_text(0.0, Vec2::ZERO, "-10", TextTone::Damage, 1.0);
        fx.spawn_spark(0.0, Vec2::ZERO, false);
        fx.spawn_ripple(0.0, Vec2::ZERO);

        fx.expire(299.0);
        assert_eq!((fx.texts.len(), fx.sparks.len(), fx.ripples.len()), (1, 1, 1));
        fx.expire(300.0);
        assert_eq!((fx.texts.len(), fx.sparks.len(), fx.ripples.len()), (1, 0, 1));
        fx.expire(500.0);
        assert_eq!((fx.texts.len(), fx.ripples.len()), (1, 0));
        fx.expire(800.0);
        assert!(fx.texts.is_empty());
    }

    #[test]
    fn test_flash_window() {
        let mut fx = Effects::default();
        fx.flash(1000.0, 100.0);
        fx.flash(1010.0, 50.0);
        assert!(fx.is_flashing(1099.0));
        assert!(!fx.is_flashing(1100.0));
    }

    #[test]
    fn test_text_rotation_bounded() {
        let mut fx = Effects::default();
        for _ in 0..100 {
            let t = fx.spawn_text(0.0, Vec2::ZERO, "x", TextTone::Kill, 2.2);
            assert!(t.rotation.abs() <= 12.5);
        }
    }
}

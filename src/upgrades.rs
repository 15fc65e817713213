//! Upgrade catalog
//!
//! Catalog entries are plain data; the stat transform for each entry is a
//! pure function selected by [`UpgradeId`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stats::PlayerStats;

/// Stable identifier of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeId {
    DamageUp,
    SpeedUp,
    CritUp,
    MultiShotUp,
    KnockbackUp,
    ProjectileSpeedUp,
}

/// Upgrade rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Catalog entry shown on the upgrade screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeOption {
    pub id: UpgradeId,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
}

/// Every upgrade in the game
pub const CATALOG: [UpgradeOption; 6] = [
    UpgradeOption {
        id: UpgradeId::DamageUp,
        name: "Boundless Dharma",
        description: "Base damage +50%",
        rarity: Rarity::Common,
    },
    UpgradeOption {
        id: UpgradeId::SpeedUp,
        name: "Swift Mind",
        description: "Attack speed +20%",
        rarity: Rarity::Common,
    },
    UpgradeOption {
        id: UpgradeId::CritUp,
        name: "Wrathful Vajra",
        description: "Crit chance +10%",
        rarity: Rarity::Rare,
    },
    UpgradeOption {
        id: UpgradeId::MultiShotUp,
        name: "Thousand Hands",
        description: "+20% chance of a split shot",
        rarity: Rarity::Epic,
    },
    UpgradeOption {
        id: UpgradeId::KnockbackUp,
        name: "Lion's Roar",
        description: "Knockback distance increased",
        rarity: Rarity::Rare,
    },
    UpgradeOption {
        id: UpgradeId::ProjectileSpeedUp,
        name: "Great Vehicle",
        description: "Projectile speed +50%",
        rarity: Rarity::Common,
    },
];

impl UpgradeId {
    /// Catalog entry for this id
    pub fn option(self) -> &'static UpgradeOption {
        // CATALOG is declared in enum order
        &CATALOG[self as usize]
    }

    /// Pure stat transform
    pub fn apply(self, stats: PlayerStats) -> PlayerStats {
        match self {
            UpgradeId::DamageUp => PlayerStats {
                attack_damage: (stats.attack_damage * 1.5).floor(),
                ..stats
            },
            UpgradeId::SpeedUp => PlayerStats {
                attack_speed: stats.attack_speed * 1.2,
                ..stats
            },
            UpgradeId::CritUp => PlayerStats {
                crit_chance: (stats.crit_chance + 0.1).min(1.0),
                ..stats
            },
            UpgradeId::MultiShotUp => PlayerStats {
                multi_shot_chance: (stats.multi_shot_chance + 0.2).min(1.0),
                ..stats
            },
            UpgradeId::KnockbackUp => PlayerStats {
                knockback: stats.knockback + 20.0,
                ..stats
            },
            UpgradeId::ProjectileSpeedUp => PlayerStats {
                projectile_speed: stats.projectile_speed * 1.5,
                ..stats
            },
        }
    }
}

/// Draw `count` distinct upgrades from the catalog
pub fn sample_offers<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<UpgradeId> {
    let count = count.min(CATALOG.len());
    rand::seq::index::sample(rng, CATALOG.len(), count)
        .into_iter()
        .map(|i| CATALOG[i].id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_catalog_order_matches_ids() {
        for entry in &CATALOG {
            assert_eq!(entry.id.option().id, entry.id);
        }
    }

    #[test]
    fn test_damage_up_floors() {
        let stats = PlayerStats {
            attack_damage: 15.0,
            ..Default::default()
        };
        assert_eq!(UpgradeId::DamageUp.apply(stats).attack_damage, 22.0);
    }

    #[test]
    fn test_chances_cap_at_one() {
        let mut stats = PlayerStats {
            crit_chance: 0.95,
            multi_shot_chance: 0.9,
            ..Default::default()
        };
        stats = UpgradeId::CritUp.apply(stats);
        stats = UpgradeId::MultiShotUp.apply(stats);
        assert_eq!(stats.crit_chance, 1.0);
        assert_eq!(stats.multi_shot_chance, 1.0);
    }

    #[test]
    fn test_apply_touches_one_field() {
        let base = PlayerStats::default();
        let after = UpgradeId::KnockbackUp.apply(base);
        assert_eq!(after.knockback, 20.0);
        assert_eq!(
            PlayerStats {
                knockback: base.knockback,
                ..after
            },
            base
        );
    }

    #[test]
    fn test_sample_offers_distinct() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let offers = sample_offers(&mut rng, 3);
            assert_eq!(offers.len(), 3);
            assert_ne!(offers[0], offers[1]);
            assert_ne!(offers[0], offers[2]);
            assert_ne!(offers[1], offers[2]);
        }
        assert_eq!(sample_offers(&mut rng, 10).len(), CATALOG.len());
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time only advances through `tick(now_ms)`
//! - Seeded RNG only
//! - Stable iteration order (spawn order for enemies, fire order for projectiles)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod effects;
pub mod flow;
pub mod input;
pub mod movement;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effects::{Effects, FloatingText, GameEvent, HitSpark, Ripple, TextTone};
pub use input::Volley;
pub use snapshot::{EnemyView, Hud, ProjectileView, Snapshot};
pub use state::{
    Archetype, Enemy, EntityId, EntityStore, GameState, GameStatus, Motion, Projectile,
    ProjectileVariant, Simulation,
};
pub use tick::{TickInput, tick};

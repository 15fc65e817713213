//! Kinematic integration
//!
//! Speeds are expressed per 16ms reference frame and scaled by the tick's
//! elapsed time.

use glam::Vec2;

use super::state::{Enemy, EntityId, Motion, Projectile};
use crate::consts::{CENTER_REACH_RADIUS, HOMING_HIT_RADIUS, OFFSCREEN_MARGIN};
use crate::settings::Viewport;
use crate::{direction_to, frame_scale};

/// Move every enemy toward `center`; enemies inside the reach radius hold still
pub fn advance_enemies(enemies: &mut [Enemy], center: Vec2, dt_ms: f32) {
    let scale = frame_scale(dt_ms);
    for enemy in enemies.iter_mut() {
        if enemy.pos.distance(center) < CENTER_REACH_RADIUS {
            continue;
        }
        if let Some(dir) = direction_to(enemy.pos, center) {
            enemy.pos += dir * enemy.speed * scale;
        }
    }
}

/// True once a point is further than the margin past any viewport edge
pub fn is_out_of_bounds(pos: Vec2, viewport: &Viewport) -> bool {
    pos.x < -OFFSCREEN_MARGIN
        || pos.x > viewport.width + OFFSCREEN_MARGIN
        || pos.y < -OFFSCREEN_MARGIN
        || pos.y > viewport.height + OFFSCREEN_MARGIN
}

/// Why a projectile left play during movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// Homing target no longer exists
    Fizzled,
    /// Ballistic shot flew off screen
    OutOfBounds,
}

/// Outcome of a projectile step that keeps the projectile in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    /// Homing shot started the tick within hit range of its target and did not move
    Contact(EntityId),
}

/// Advance one projectile; `Err` means it must be removed without effect
///
/// Homing contact is judged on the distance before moving, so a shot that
/// closes in this tick only lands on the next one.
pub fn step_projectile(
    projectile: &mut Projectile,
    enemies: &[Enemy],
    viewport: &Viewport,
    dt_ms: f32,
) -> Result<Step, Discard> {
    let scale = frame_scale(dt_ms);
    match projectile.motion {
        Motion::Homing { target } => {
            let Some(enemy) = enemies.iter().find(|e| e.id == target) else {
                return Err(Discard::Fizzled);
            };
            let dist = projectile.pos.distance(enemy.pos);
            if dist < HOMING_HIT_RADIUS {
                return Ok(Step::Contact(target));
            }
            if let Some(dir) = direction_to(projectile.pos, enemy.pos) {
                let step = (projectile.speed * scale).min(dist);
                projectile.pos += dir * step;
            }
            Ok(Step::Moved)
        }
        Motion::Ballistic { velocity } => {
            projectile.pos += velocity * scale;
            if is_out_of_bounds(projectile.pos, viewport) {
                Err(Discard::OutOfBounds)
            } else {
                Ok(Step::Moved)
            }
        }
    }
}

/// Advance all projectiles, dropping fizzled and off-screen ones
///
/// Returns the ids of homing projectiles in contact with their target.
pub fn advance_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &[Enemy],
    viewport: &Viewport,
    dt_ms: f32,
) -> Vec<EntityId> {
    let mut contacts = Vec::new();
    projectiles.retain_mut(|p| match step_projectile(p, enemies, viewport, dt_ms) {
        Ok(Step::Moved) => true,
        Ok(Step::Contact(_)) => {
            contacts.push(p.id);
            true
        }
        Err(reason) => {
            log::trace!("Projectile #{} discarded: {:?}", p.id, reason);
            false
        }
    });
    contacts
}

//! Active spell cast record.
//!
//! Casts live in a map on the engine keyed by id, not as ECS entities:
//! they reference a target entity and carry their own clock, so keeping
//! them out of the world avoids self-referential component queries.

use glam::DVec2;
use hecs::Entity;

use hollowmark_core::enums::ActorKind;

/// One telegraphed blast in progress.
///
/// `anchor` is the blast center, captured from the target's bounds at
/// cast start and never updated. The hit test at resolution compares
/// the target's live bounds center against this frozen anchor, so the
/// target can escape by moving away during the telegraph.
#[derive(Debug, Clone)]
pub struct SpellCast {
    pub id: u32,
    pub target: Entity,
    pub target_kind: ActorKind,
    /// Frozen blast center.
    pub anchor: DVec2,
    /// Telegraph marker position, fixed at cast start.
    pub reticle_position: DVec2,
    /// Breathing scale applied to the marker, updated each tick.
    pub reticle_scale: f64,
    /// Seconds since the telegraph began.
    pub elapsed_secs: f64,
}

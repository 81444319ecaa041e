//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Transition rules live in `hollowmark-combat`; orchestration in systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::ActorKind;

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks the boss entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boss;

/// A minor ranged enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archer {
    /// Stable id, assigned sequentially at spawn.
    pub archer_id: u32,
    /// One-shot-kill latch. Once set, further hits are ignored.
    pub dead: bool,
    /// Spawn position, restored on reset.
    pub start_position: DVec2,
}

/// Damageable-actor tag, resolved once at spawn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combatant {
    pub kind: ActorKind,
}

/// Health pool for the player and the boss.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    /// Player-only: damage is ignored while set.
    pub invulnerable: bool,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self {
            current: max,
            max,
            invulnerable: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// Per-archer engagement timing state.
///
/// `engaged_since` is set the instant the player first enters range and
/// cleared the instant they exit; the wind-up is measured from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngagementClock {
    /// When the current engagement began, if the player is in range.
    pub engaged_since: Option<f64>,
    /// When the last shot was fired (backdated at spawn/reset so cooldown
    /// never blocks the first post-wind-up shot).
    pub last_shot_secs: f64,
}

/// Pending arrow launch: the delayed continuation between an archer's fire
/// decision and the arrow spawning. Removed on archer death (cancellation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PendingShot {
    pub resolve_at_secs: f64,
}

/// An arrow in flight. Direction is fixed at launch and never re-aimed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arrow {
    pub arrow_id: u32,
    pub direction: DVec2,
    pub speed: f64,
    /// Seconds since launch; self-expires past the lifetime.
    pub age_secs: f64,
}

/// Player guard state. A raised guard fully negates arrow damage but the
/// arrow is still consumed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Guard {
    pub active: bool,
}

/// In-progress melee swing on the player. The strike connects at
/// `hit_at_secs`; the swing (and re-trigger gate) ends at `done_at_secs`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeleeSwing {
    pub hit_at_secs: f64,
    pub done_at_secs: f64,
    pub hit_applied: bool,
}

/// Idle-movement state for the boss: amble between random nearby
/// destinations, pausing on arrival, never straying far from the spawn
/// point. Disabled until the driver enables it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wander {
    pub enabled: bool,
    /// Spawn position; destinations are clamped to a radius around it.
    pub origin: DVec2,
    /// Current destination, if one has been picked.
    pub destination: Option<DVec2>,
    /// Earliest time a new destination may be picked (arrival pause).
    pub next_pick_at_secs: f64,
}

/// A collectible coin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coin {
    pub coin_id: u32,
    pub value: u32,
    pub collected: bool,
}

//! Driver commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Reference to a damageable actor, resolved to an entity by the engine.
/// Stale references (dead/despawned actors) are tolerated as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actor")]
pub enum ActorRef {
    Player,
    Boss,
    Archer { archer_id: u32 },
}

/// All driver-issued actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Player control ---
    /// Move the player (input/physics are external; the driver supplies
    /// resolved positions).
    SetPlayerPosition { position: DVec2 },
    /// Raise or lower the player's guard.
    SetGuarding { guarding: bool },
    /// Start a melee swing. Ignored while a swing is in progress.
    MeleeAttack,

    // --- Boss behavior (scripted externally) ---
    /// Enable or disable the boss's idle wander.
    SetBossWander { enabled: bool },
    /// Begin a telegraphed spell blast against a single captured target.
    CastSpell { target: ActorRef },
    /// Summon archer reinforcements on a ring around the boss.
    SummonReinforcements { count: u32 },

    // --- Session control ---
    /// Restart the session. Ignored until the end screen has unlocked it.
    Restart,
}

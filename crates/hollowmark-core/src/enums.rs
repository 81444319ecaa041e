//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Kind of damageable actor. Resolved once at entity creation; damage
/// dispatch matches on this instead of probing components per hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// The player: integer-lives semantics, may be invulnerable.
    Player,
    /// The boss: float health pool.
    Boss,
    /// A minor enemy: one-shot-kill latch.
    Archer,
}

/// Observable archer engagement phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementPhase {
    /// Target out of range; no wind-up in progress.
    #[default]
    Idle,
    /// Target in range, initial delay not yet satisfied.
    WindingUp,
    /// Initial delay satisfied; firing is gated only by cooldown.
    Armed,
}

/// Session outcome. Transitions at most once out of `InProgress`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Systems run, time advances.
    #[default]
    Active,
    /// End screen shown; the simulation clock is frozen until restart.
    Frozen,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

//! Archer engagement state machine.
//!
//! Pure function that computes the next clock state and fire decision from
//! the current clock, tuning profile, target distance, and clock time.
//! No ECS dependency — operates on plain data.

use hollowmark_core::components::{Archer, EngagementClock};
use hollowmark_core::constants::*;
use hollowmark_core::enums::EngagementPhase;
use hollowmark_core::types::Position;

/// Tuning parameters for a ranged attacker.
#[derive(Debug, Clone, Copy)]
pub struct ArcherProfile {
    /// Engagement range (meters).
    pub range: f64,
    /// Wind-up after the target first enters range (seconds).
    pub initial_delay_secs: f64,
    /// Minimum time between fire decisions (seconds).
    pub cooldown_secs: f64,
    /// Delay between the fire decision and the arrow launching (seconds).
    pub shoot_delay_secs: f64,
    /// Arrow flight speed (m/s).
    pub arrow_speed: f64,
}

impl ArcherProfile {
    /// The standard archer loadout.
    pub fn standard() -> Self {
        Self {
            range: ARCHER_RANGE,
            initial_delay_secs: ARCHER_INITIAL_DELAY_SECS,
            cooldown_secs: ARCHER_COOLDOWN_SECS,
            shoot_delay_secs: ARCHER_SHOOT_DELAY_SECS,
            arrow_speed: ARROW_SPEED,
        }
    }
}

/// Output of one engagement evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EngagementUpdate {
    pub clock: EngagementClock,
    pub phase: EngagementPhase,
    /// True exactly on the tick a fire decision is made. The clock's
    /// `last_shot_secs` is already advanced to `now` in that case.
    pub fire: bool,
}

/// A fresh clock for spawn or reset: no engagement in progress, and the
/// last-shot time backdated a full cooldown so only the wind-up gates the
/// first shot.
pub fn fresh_clock(now: f64, profile: &ArcherProfile) -> EngagementClock {
    EngagementClock {
        engaged_since: None,
        last_shot_secs: now - profile.cooldown_secs,
    }
}

/// Evaluate the engagement state machine for one tick.
///
/// Leaving range at any point clears the wind-up; re-entering always
/// re-incurs the full initial delay. Firing requires both the wind-up and
/// the cooldown to be satisfied, and stamps `last_shot_secs` at decision
/// time so a slow resolution cannot cause overlapping fires.
pub fn evaluate(
    clock: &EngagementClock,
    profile: &ArcherProfile,
    distance: f64,
    now: f64,
) -> EngagementUpdate {
    if distance > profile.range {
        return EngagementUpdate {
            clock: EngagementClock {
                engaged_since: None,
                last_shot_secs: clock.last_shot_secs,
            },
            phase: EngagementPhase::Idle,
            fire: false,
        };
    }

    let engaged_since = clock.engaged_since.unwrap_or(now);
    let wound_up = now - engaged_since >= profile.initial_delay_secs;
    let cooled_down = now - clock.last_shot_secs >= profile.cooldown_secs;

    if wound_up && cooled_down {
        return EngagementUpdate {
            clock: EngagementClock {
                engaged_since: Some(engaged_since),
                last_shot_secs: now,
            },
            phase: EngagementPhase::Armed,
            fire: true,
        };
    }

    EngagementUpdate {
        clock: EngagementClock {
            engaged_since: Some(engaged_since),
            last_shot_secs: clock.last_shot_secs,
        },
        phase: if wound_up {
            EngagementPhase::Armed
        } else {
            EngagementPhase::WindingUp
        },
        fire: false,
    }
}

/// Restore an archer to its spawn state: death latch cleared, back at
/// its starting post, clock fresh. Idempotent.
pub fn reset_archer(
    archer: &mut Archer,
    position: &mut Position,
    clock: &mut EngagementClock,
    now: f64,
    profile: &ArcherProfile,
) {
    archer.dead = false;
    position.0 = archer.start_position;
    *clock = fresh_clock(now, profile);
}

/// Observable phase without advancing the clock (for snapshots).
pub fn observable_phase(clock: &EngagementClock, profile: &ArcherProfile, now: f64) -> EngagementPhase {
    match clock.engaged_since {
        None => EngagementPhase::Idle,
        Some(since) if now - since >= profile.initial_delay_secs => EngagementPhase::Armed,
        Some(_) => EngagementPhase::WindingUp,
    }
}

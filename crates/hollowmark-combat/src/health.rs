//! Health/damage state machine.
//!
//! Operates on the plain `Health` component. Death is a latched transition:
//! the `Died` outcome is produced exactly on the tick health reaches zero
//! and never again until an explicit reset.

use glam::DVec2;

use hollowmark_core::components::Health;

/// Result of a damage application attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// No effect: already dead, invulnerable, or zero effective damage.
    Ignored,
    /// Health was reduced but the actor survived.
    Damaged,
    /// Health reached zero on this application.
    Died,
}

impl DamageOutcome {
    /// Whether the pool was actually mutated.
    pub fn applied(&self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Apply damage, clamping into `[0, max]`. Negative amounts are treated
/// as zero, never as healing.
pub fn apply_damage(health: &mut Health, amount: f64) -> DamageOutcome {
    if health.is_dead() || health.invulnerable {
        return DamageOutcome::Ignored;
    }

    let applied = amount.max(0.0);
    if applied <= 0.0 {
        return DamageOutcome::Ignored;
    }

    health.current = (health.current - applied).clamp(0.0, health.max);
    if health.is_dead() {
        DamageOutcome::Died
    } else {
        DamageOutcome::Damaged
    }
}

/// Apply damage only if `entity_pos` is within `range` of `attacker_pos`.
/// Returns `None` when out of range so callers can distinguish a miss
/// from an ignored hit (e.g. to decide attacker rewards).
pub fn apply_damage_if_in_range(
    health: &mut Health,
    entity_pos: DVec2,
    attacker_pos: DVec2,
    range: f64,
    amount: f64,
) -> Option<DamageOutcome> {
    if entity_pos.distance(attacker_pos) > range {
        return None;
    }
    Some(apply_damage(health, amount))
}

/// Heal upward, clamped to max. Dead actors cannot be healed.
/// Returns whether the pool changed.
pub fn heal(health: &mut Health, amount: f64) -> bool {
    if health.is_dead() {
        return false;
    }
    let applied = amount.max(0.0);
    if applied <= 0.0 {
        return false;
    }
    let before = health.current;
    health.current = (health.current + applied).clamp(0.0, health.max);
    health.current > before
}

/// Restore to full and clear invulnerability. Idempotent.
pub fn reset(health: &mut Health) {
    health.invulnerable = false;
    health.current = health.max;
}

//! Telegraphed blast system: advances telegraphs, aborts casts whose
//! target became invalid, and resolves expired casts.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hollowmark_combat::health::{apply_damage, DamageOutcome};
use hollowmark_core::components::{Archer, Health, PendingShot};
use hollowmark_core::constants::*;
use hollowmark_core::enums::ActorKind;
use hollowmark_core::events::{EffectKind, EffectRequest, GameEvent};
use hollowmark_core::types::{Bounds, Position};

use crate::cast::SpellCast;

/// Advance every active cast by one tick.
///
/// Casts are stored in a BTreeMap and visited in id order so the rng
/// draws at resolution are reproducible across runs.
pub fn run(
    world: &mut World,
    casts: &mut BTreeMap<u32, SpellCast>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) {
    let mut finished: Vec<u32> = Vec::new();

    for (&id, cast) in casts.iter_mut() {
        cast.elapsed_secs += DT;

        // A target that died or despawned mid-telegraph abandons the cast.
        let Some(live_center) = live_target_center(world, cast) else {
            events.push(GameEvent::SpellAborted { cast_id: id });
            effects.push(EffectRequest {
                kind: EffectKind::TelegraphRemoved { cast_id: id },
                position: cast.reticle_position,
            });
            finished.push(id);
            continue;
        };

        cast.reticle_scale =
            1.0 + SPELL_PULSE_AMOUNT * (TAU * SPELL_PULSE_SPEED_HZ * cast.elapsed_secs).sin();

        if cast.elapsed_secs < SPELL_TELEGRAPH_SECS {
            continue;
        }
        finished.push(id);
        resolve(world, cast, live_center, rng, events, effects);
    }

    for id in finished {
        casts.remove(&id);
    }
}

/// Live bounds center of the cast's target, or None once the target is
/// dead or gone.
fn live_target_center(world: &World, cast: &SpellCast) -> Option<DVec2> {
    match cast.target_kind {
        ActorKind::Player | ActorKind::Boss => {
            let health = world.get::<&Health>(cast.target).ok()?;
            if health.is_dead() {
                return None;
            }
        }
        ActorKind::Archer => {
            let archer = world.get::<&Archer>(cast.target).ok()?;
            if archer.dead {
                return None;
            }
        }
    }
    let pos = world.get::<&Position>(cast.target).ok()?;
    let bounds = world.get::<&Bounds>(cast.target).ok()?;
    Some(bounds.center(&pos))
}

/// Resolve an expired cast: spawn the explosion ring at the frozen
/// anchor, then run the escape test against the target's live center.
/// The blast damages only the captured target; bystanders inside the
/// radius are untouched.
fn resolve(
    world: &mut World,
    cast: &SpellCast,
    live_center: DVec2,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) {
    effects.push(EffectRequest {
        kind: EffectKind::TelegraphRemoved { cast_id: cast.id },
        position: cast.reticle_position,
    });

    // Explosions appear whether or not the target escaped.
    let base_angle: f64 = rng.gen_range(0.0..TAU);
    for i in 0..SPELL_EXPLOSION_COUNT {
        let angle = base_angle
            + i as f64 * TAU / SPELL_EXPLOSION_COUNT as f64
            + rng.gen_range(-SPELL_EXPLOSION_ANGLE_JITTER..SPELL_EXPLOSION_ANGLE_JITTER);
        let radius = SPELL_EXPLOSION_RING_RADIUS
            + rng.gen_range(-SPELL_EXPLOSION_RADIAL_JITTER..SPELL_EXPLOSION_RADIAL_JITTER);
        effects.push(EffectRequest {
            kind: EffectKind::Explosion,
            position: cast.anchor + radius * DVec2::new(angle.cos(), angle.sin()),
        });
    }

    let hit = live_center.distance(cast.anchor) <= SPELL_RADIUS + SPELL_RADIUS_EPSILON;
    if hit {
        dispatch_damage(world, cast, events, effects);
    }
    events.push(GameEvent::SpellResolved {
        cast_id: cast.id,
        hit,
    });
}

/// Apply the blast to the captured target, by actor kind. The guard does
/// not help here; only escaping the radius does.
fn dispatch_damage(
    world: &mut World,
    cast: &SpellCast,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) {
    let position = world
        .get::<&Position>(cast.target)
        .map(|p| p.0)
        .unwrap_or(cast.anchor);

    match cast.target_kind {
        ActorKind::Player | ActorKind::Boss => {
            let amount = if cast.target_kind == ActorKind::Player {
                SPELL_PLAYER_DAMAGE
            } else {
                SPELL_BOSS_DAMAGE
            };
            let Ok(mut health) = world.get::<&mut Health>(cast.target) else {
                return;
            };
            let outcome = apply_damage(&mut health, amount);
            if outcome.applied() {
                events.push(GameEvent::HealthChanged {
                    actor: cast.target_kind,
                    current: health.current,
                    max: health.max,
                });
            }
            if outcome == DamageOutcome::Died {
                events.push(match cast.target_kind {
                    ActorKind::Player => GameEvent::PlayerDied,
                    _ => GameEvent::BossDied,
                });
                effects.push(EffectRequest {
                    kind: EffectKind::DeathSmoke,
                    position,
                });
            }
        }
        ActorKind::Archer => {
            let archer_id = {
                let Ok(mut archer) = world.get::<&mut Archer>(cast.target) else {
                    return;
                };
                archer.dead = true;
                archer.archer_id
            };
            let _ = world.remove_one::<PendingShot>(cast.target);
            events.push(GameEvent::ArcherDied { archer_id });
            effects.push(EffectRequest {
                kind: EffectKind::DeathSmoke,
                position,
            });
        }
    }
}

//! Arrow flight system: integrates motion, runs the player hit test,
//! and expires arrows past their lifetime.

use glam::DVec2;
use hecs::{Entity, World};

use hollowmark_combat::health::{apply_damage, DamageOutcome};
use hollowmark_core::components::{Arrow, Guard, Health, Player};
use hollowmark_core::constants::*;
use hollowmark_core::enums::ActorKind;
use hollowmark_core::events::{EffectKind, EffectRequest, GameEvent};
use hollowmark_core::types::{Bounds, Position};

/// Advance every arrow by one tick and resolve player hits.
///
/// A raised guard consumes the arrow without damage. Arrows only ever
/// hit the player; they pass through everything else.
pub fn run(
    world: &mut World,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let player = world
        .query::<(&Player, &Position, &Bounds)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, bounds))| (entity, *pos, *bounds));

    let mut hits: Vec<u32> = Vec::new();
    for (entity, (arrow, pos)) in world.query_mut::<(&mut Arrow, &mut Position)>() {
        pos.0 += arrow.direction * arrow.speed * DT;
        arrow.age_secs += DT;

        if let Some((_, player_pos, bounds)) = player {
            if arrow_hits(pos.0, &player_pos, &bounds) {
                hits.push(arrow.arrow_id);
                despawn_buffer.push(entity);
                continue;
            }
        }
        if arrow.age_secs > ARROW_LIFETIME_SECS {
            despawn_buffer.push(entity);
        }
    }

    if let Some((player_entity, player_pos, _)) = player {
        for arrow_id in hits {
            resolve_hit(world, player_entity, player_pos, arrow_id, events, effects);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn arrow_hits(arrow_pos: DVec2, player_pos: &Position, bounds: &Bounds) -> bool {
    bounds.contains(player_pos, arrow_pos)
        || arrow_pos.distance(bounds.center(player_pos)) <= ARROW_HIT_RADIUS
}

/// Apply one arrow impact. Health is re-read per impact so two arrows
/// landing on the same tick cannot double-report a death.
fn resolve_hit(
    world: &mut World,
    player_entity: Entity,
    player_pos: Position,
    arrow_id: u32,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) {
    let guarding = world
        .get::<&Guard>(player_entity)
        .map(|g| g.active)
        .unwrap_or(false);

    let Ok(mut health) = world.get::<&mut Health>(player_entity) else {
        return;
    };
    if health.is_dead() {
        // The arrow is spent on the corpse, silently.
        return;
    }
    if guarding {
        events.push(GameEvent::ArrowBlocked { arrow_id });
        return;
    }

    let outcome = apply_damage(&mut health, ARROW_DAMAGE);
    if outcome.applied() {
        events.push(GameEvent::HealthChanged {
            actor: ActorKind::Player,
            current: health.current,
            max: health.max,
        });
    }
    if outcome == DamageOutcome::Died {
        events.push(GameEvent::PlayerDied);
        effects.push(EffectRequest {
            kind: EffectKind::DeathSmoke,
            position: player_pos.0,
        });
    }
}

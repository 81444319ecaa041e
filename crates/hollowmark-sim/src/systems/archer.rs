//! Archer engagement system: drives the wind-up/cooldown state machine
//! and resolves delayed shots into arrows.

use glam::DVec2;
use hecs::{Entity, World};

use hollowmark_combat::engagement::{evaluate, ArcherProfile};
use hollowmark_core::components::{Archer, Arrow, EngagementClock, Health, PendingShot, Player};
use hollowmark_core::events::GameEvent;
use hollowmark_core::types::Position;

/// Run the engagement state machine for every live archer, then resolve
/// any pending shots whose launch delay has elapsed.
pub fn run(
    world: &mut World,
    profile: &ArcherProfile,
    now: f64,
    next_arrow_id: &mut u32,
    events: &mut Vec<GameEvent>,
) {
    let target = live_player_position(world);

    // Fire decisions. A decision schedules a PendingShot; the arrow does
    // not exist until the shoot delay elapses.
    let mut scheduled: Vec<Entity> = Vec::new();
    for (entity, (archer, pos, clock)) in
        world.query_mut::<(&Archer, &Position, &mut EngagementClock)>()
    {
        if archer.dead {
            continue;
        }
        let distance = match target {
            Some(t) => pos.0.distance(t),
            None => f64::INFINITY,
        };
        let update = evaluate(clock, profile, distance, now);
        *clock = update.clock;
        if update.fire {
            scheduled.push(entity);
        }
    }
    for entity in scheduled {
        let _ = world.insert_one(
            entity,
            PendingShot {
                resolve_at_secs: now + profile.shoot_delay_secs,
            },
        );
    }

    // Shot resolution. Conditions are re-validated at launch time: an
    // archer that died, or a player that left range or died during the
    // delay, drops the shot without an arrow.
    let mut resolved: Vec<Entity> = Vec::new();
    let mut launches: Vec<(u32, DVec2, DVec2)> = Vec::new();
    for (entity, (archer, pos, shot)) in world.query::<(&Archer, &Position, &PendingShot)>().iter()
    {
        if now < shot.resolve_at_secs {
            continue;
        }
        resolved.push(entity);
        if archer.dead {
            continue;
        }
        let Some(target) = target else { continue };
        if pos.0.distance(target) > profile.range {
            continue;
        }
        // Aim at the player's position at launch time, not decision time.
        launches.push((archer.archer_id, pos.0, aim_direction(pos.0, target)));
    }
    for entity in resolved {
        let _ = world.remove_one::<PendingShot>(entity);
    }
    for (archer_id, origin, direction) in launches {
        let arrow_id = *next_arrow_id;
        *next_arrow_id += 1;
        world.spawn((
            Arrow {
                arrow_id,
                direction,
                speed: profile.arrow_speed,
                age_secs: 0.0,
            },
            Position(origin),
        ));
        events.push(GameEvent::ArrowFired { archer_id });
    }
}

/// Position of the player if alive. Dead or absent players disengage
/// every archer.
fn live_player_position(world: &World) -> Option<DVec2> {
    world
        .query::<(&Player, &Position, &Health)>()
        .iter()
        .next()
        .and_then(|(_, (_, pos, health))| (!health.is_dead()).then_some(pos.0))
}

fn aim_direction(origin: DVec2, target: DVec2) -> DVec2 {
    let delta = target - origin;
    if delta.length_squared() > 0.0 {
        delta.normalize()
    } else {
        DVec2::Y
    }
}

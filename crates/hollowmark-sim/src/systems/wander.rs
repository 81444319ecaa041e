//! Boss wander system: ambles between random nearby destinations while
//! enabled, never straying past a fixed radius around the spawn point.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use hollowmark_core::components::Wander;
use hollowmark_core::constants::*;
use hollowmark_core::types::Position;

/// Advance every wandering entity by one tick. Arriving at a destination
/// starts a short pause before the next one is picked.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, now: f64) {
    for (_entity, (wander, pos)) in world.query_mut::<(&mut Wander, &mut Position)>() {
        if !wander.enabled || now < wander.next_pick_at_secs {
            continue;
        }

        let destination = match wander.destination {
            Some(d) => d,
            None => {
                let d = pick_destination(wander, pos.0, rng);
                wander.destination = Some(d);
                d
            }
        };

        let delta = destination - pos.0;
        let step = BOSS_WANDER_SPEED * DT;
        if delta.length() <= step + BOSS_WANDER_ARRIVE_DISTANCE {
            pos.0 = destination;
            wander.destination = None;
            wander.next_pick_at_secs = now + BOSS_WANDER_PAUSE_SECS;
        } else {
            pos.0 += delta.normalize() * step;
        }
    }
}

/// Pick a short random leg from the current position, clamped back onto
/// the wander radius around the origin when it would stray outside.
fn pick_destination(wander: &Wander, from: DVec2, rng: &mut ChaCha8Rng) -> DVec2 {
    let angle: f64 = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(BOSS_WANDER_DISTANCE_MIN..BOSS_WANDER_DISTANCE_MAX);
    let candidate = from + distance * DVec2::new(angle.cos(), angle.sin());

    let offset = candidate - wander.origin;
    if offset.length() > BOSS_WANDER_MAX_RADIUS {
        wander.origin + offset.normalize() * BOSS_WANDER_MAX_RADIUS
    } else {
        candidate
    }
}

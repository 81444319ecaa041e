//! Entity spawn factories for setting up the session world.
//!
//! Creates the player, boss, archers, and coins with appropriate
//! component bundles.

use glam::DVec2;
use hecs::World;

use hollowmark_combat::engagement::{fresh_clock, ArcherProfile};
use hollowmark_core::components::*;
use hollowmark_core::constants::*;
use hollowmark_core::enums::ActorKind;
use hollowmark_core::types::{Bounds, Position};

/// Set up the default session world: player at the origin, the boss to
/// the east, three archer posts out of engagement range, three coins
/// near the player.
pub fn setup_session(
    world: &mut World,
    next_archer_id: &mut u32,
    next_coin_id: &mut u32,
    now: f64,
    profile: &ArcherProfile,
) {
    spawn_player(world);
    spawn_boss(world);

    for post in [
        DVec2::new(10.0, 5.0),
        DVec2::new(14.0, -3.0),
        DVec2::new(18.0, 2.0),
    ] {
        spawn_archer(world, next_archer_id, post, now, profile);
    }

    for spot in [
        DVec2::new(1.5, 0.5),
        DVec2::new(-2.0, 1.0),
        DVec2::new(3.0, -1.0),
    ] {
        spawn_coin(world, next_coin_id, spot);
    }
}

/// Spawn the player at the origin with full lives and a lowered guard.
pub fn spawn_player(world: &mut World) -> hecs::Entity {
    world.spawn((
        Player,
        Position::new(0.0, 0.0),
        Bounds {
            center_offset: DVec2::new(0.0, 0.5),
            half_extents: DVec2::new(0.35, 0.5),
        },
        Combatant {
            kind: ActorKind::Player,
        },
        Health::new(PLAYER_MAX_LIVES),
        Guard::default(),
    ))
}

/// Spawn the boss at its arena position with full health. Wandering is
/// off until the driver enables it.
pub fn spawn_boss(world: &mut World) -> hecs::Entity {
    let post = DVec2::new(8.0, 0.0);
    world.spawn((
        Boss,
        Position(post),
        Bounds {
            center_offset: DVec2::new(0.0, 0.9),
            half_extents: DVec2::new(0.8, 0.9),
        },
        Combatant {
            kind: ActorKind::Boss,
        },
        Health::new(BOSS_MAX_HEALTH),
        Wander {
            enabled: false,
            origin: post,
            destination: None,
            next_pick_at_secs: 0.0,
        },
    ))
}

/// Spawn a single archer at `post` with a fresh engagement clock.
/// The clock's cooldown is backdated so only the wind-up gates the
/// first shot.
pub fn spawn_archer(
    world: &mut World,
    next_archer_id: &mut u32,
    post: DVec2,
    now: f64,
    profile: &ArcherProfile,
) -> hecs::Entity {
    let archer_id = *next_archer_id;
    *next_archer_id += 1;

    world.spawn((
        Archer {
            archer_id,
            dead: false,
            start_position: post,
        },
        Position(post),
        Bounds {
            center_offset: DVec2::new(0.0, 0.45),
            half_extents: DVec2::new(0.3, 0.45),
        },
        Combatant {
            kind: ActorKind::Archer,
        },
        fresh_clock(now, profile),
    ))
}

/// Spawn a single coin.
pub fn spawn_coin(world: &mut World, next_coin_id: &mut u32, spot: DVec2) -> hecs::Entity {
    let coin_id = *next_coin_id;
    *next_coin_id += 1;

    world.spawn((
        Coin {
            coin_id,
            value: COIN_VALUE,
            collected: false,
        },
        Position(spot),
    ))
}

/// Count uncollected coins (used to size the session win condition at
/// session start).
pub fn count_coins(world: &World) -> u32 {
    world
        .query::<&Coin>()
        .iter()
        .filter(|(_, coin)| !coin.collected)
        .count() as u32
}

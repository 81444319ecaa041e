//! Snapshot system: queries the ECS world and builds a complete
//! GameStateSnapshot.
//!
//! This system is read-only, it never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use hollowmark_combat::engagement::{observable_phase, ArcherProfile};
use hollowmark_core::components::*;
use hollowmark_core::constants::SPELL_TELEGRAPH_SECS;
use hollowmark_core::enums::{EngagementPhase, GamePhase};
use hollowmark_core::events::{Alert, EffectRequest, GameEvent};
use hollowmark_core::state::*;
use hollowmark_core::types::{Position, SimTime};

use crate::cast::SpellCast;
use crate::session::SessionState;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    session: &SessionState,
    casts: &BTreeMap<u32, SpellCast>,
    profile: &ArcherProfile,
    events: Vec<GameEvent>,
    effects: Vec<EffectRequest>,
    alerts: Vec<Alert>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        session: build_session(session),
        player: build_player(world),
        boss: build_boss(world),
        archers: build_archers(world, profile, time.elapsed_secs),
        arrows: build_arrows(world),
        coins: build_coins(world),
        casts: build_casts(casts),
        events,
        effects,
        alerts,
    }
}

fn build_session(session: &SessionState) -> SessionView {
    SessionView {
        total_coins: session.total_coins,
        collected: session.collected,
        remaining: session.remaining(),
        outcome: session.outcome,
        restart_unlocked: session.restart_unlocked,
        end_screen_visible: session.end_screen_visible,
    }
}

fn build_player(world: &World) -> PlayerView {
    world
        .query::<(&Player, &Position, &Health, &Guard)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, health, guard))| PlayerView {
            position: pos.0,
            lives: health.current,
            max_lives: health.max,
            invulnerable: health.invulnerable,
            guarding: guard.active,
            attacking: world.get::<&MeleeSwing>(entity).is_ok(),
            dead: health.is_dead(),
        })
        .unwrap_or_default()
}

/// Absent once the boss has been destroyed and despawned.
fn build_boss(world: &World) -> Option<BossView> {
    world
        .query::<(&Boss, &Position, &Health)>()
        .iter()
        .next()
        .map(|(_, (_, pos, health))| BossView {
            position: pos.0,
            health: health.current,
            max_health: health.max,
        })
}

fn build_archers(world: &World, profile: &ArcherProfile, now: f64) -> Vec<ArcherView> {
    let mut archers: Vec<ArcherView> = world
        .query::<(&Archer, &Position, &EngagementClock)>()
        .iter()
        .map(|(_, (archer, pos, clock))| ArcherView {
            archer_id: archer.archer_id,
            position: pos.0,
            phase: if archer.dead {
                EngagementPhase::Idle
            } else {
                observable_phase(clock, profile, now)
            },
            dead: archer.dead,
        })
        .collect();

    archers.sort_by_key(|a| a.archer_id);
    archers
}

fn build_arrows(world: &World) -> Vec<ArrowView> {
    let mut arrows: Vec<ArrowView> = world
        .query::<(&Arrow, &Position)>()
        .iter()
        .map(|(_, (arrow, pos))| ArrowView {
            arrow_id: arrow.arrow_id,
            position: pos.0,
            direction: arrow.direction,
        })
        .collect();

    arrows.sort_by_key(|a| a.arrow_id);
    arrows
}

fn build_coins(world: &World) -> Vec<CoinView> {
    let mut coins: Vec<CoinView> = world
        .query::<(&Coin, &Position)>()
        .iter()
        .map(|(_, (coin, pos))| CoinView {
            coin_id: coin.coin_id,
            position: pos.0,
            collected: coin.collected,
        })
        .collect();

    coins.sort_by_key(|c| c.coin_id);
    coins
}

fn build_casts(casts: &BTreeMap<u32, SpellCast>) -> Vec<CastView> {
    casts
        .values()
        .map(|cast| CastView {
            cast_id: cast.id,
            anchor: cast.anchor,
            reticle_position: cast.reticle_position,
            reticle_scale: cast.reticle_scale,
            remaining_secs: (SPELL_TELEGRAPH_SECS - cast.elapsed_secs).max(0.0),
        })
        .collect()
}

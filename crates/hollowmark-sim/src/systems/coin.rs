//! Coin pickup system.

use hecs::World;

use hollowmark_core::components::{Coin, Health, Player};
use hollowmark_core::constants::COIN_PICKUP_RADIUS;
use hollowmark_core::enums::Outcome;
use hollowmark_core::events::{EffectKind, EffectRequest, GameEvent};
use hollowmark_core::types::Position;

use crate::session::SessionState;

/// Collect coins the live player overlaps. Collected coins stay in the
/// world with their flag set so the view can keep rendering the slot.
/// Pickups stop once the session outcome is terminal, even though the
/// simulation keeps running through the reveal window.
pub fn run(
    world: &mut World,
    session: &mut SessionState,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) {
    if session.outcome != Outcome::InProgress {
        return;
    }

    let Some(player_pos) = world
        .query::<(&Player, &Position, &Health)>()
        .iter()
        .next()
        .and_then(|(_, (_, pos, health))| (!health.is_dead()).then_some(pos.0))
    else {
        return;
    };

    for (_entity, (coin, pos)) in world.query_mut::<(&mut Coin, &Position)>() {
        if coin.collected || player_pos.distance(pos.0) > COIN_PICKUP_RADIUS {
            continue;
        }
        coin.collected = true;
        let remaining = session.note_coin();
        events.push(GameEvent::CoinCollected {
            coin_id: coin.coin_id,
            value: coin.value,
            remaining,
        });
        effects.push(EffectRequest {
            kind: EffectKind::CoinSparkle,
            position: pos.0,
        });
    }
}

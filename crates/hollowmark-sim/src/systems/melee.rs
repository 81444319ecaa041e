//! Melee swing system: connects the strike partway through the swing
//! and clears the swing when it completes.

use glam::DVec2;
use hecs::{Entity, World};

use hollowmark_combat::health::{apply_damage, heal, DamageOutcome};
use hollowmark_core::components::{Archer, Boss, Health, MeleeSwing, PendingShot, Player};
use hollowmark_core::constants::*;
use hollowmark_core::enums::ActorKind;
use hollowmark_core::events::{EffectKind, EffectRequest, GameEvent};
use hollowmark_core::types::Position;

/// Advance the player's swing, if any. The strike connects exactly once
/// per swing, at `hit_at_secs`; the swing component is removed at
/// `done_at_secs`, which re-opens the attack command.
pub fn run(world: &mut World, now: f64, events: &mut Vec<GameEvent>, effects: &mut Vec<EffectRequest>) {
    let Some((player_entity, player_pos)) = world
        .query::<(&Player, &Position, &MeleeSwing)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, _))| (entity, pos.0))
    else {
        return;
    };

    let mut strike = false;
    let mut done = false;
    if let Ok(mut swing) = world.get::<&mut MeleeSwing>(player_entity) {
        if !swing.hit_applied && now >= swing.hit_at_secs {
            swing.hit_applied = true;
            strike = true;
        }
        if now >= swing.done_at_secs {
            done = true;
        }
    }

    if strike {
        connect_strike(world, player_entity, player_pos, events, effects);
    }
    if done {
        let _ = world.remove_one::<MeleeSwing>(player_entity);
    }
}

/// Apply the strike: one-shot every live archer in range, chip the boss.
/// Each archer kill restores a life.
fn connect_strike(
    world: &mut World,
    player_entity: Entity,
    player_pos: DVec2,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<EffectRequest>,
) {
    let mut kills: Vec<Entity> = Vec::new();
    for (entity, (archer, pos)) in world.query_mut::<(&mut Archer, &Position)>() {
        if archer.dead || player_pos.distance(pos.0) > MELEE_RANGE {
            continue;
        }
        archer.dead = true;
        kills.push(entity);
        events.push(GameEvent::ArcherDied {
            archer_id: archer.archer_id,
        });
        effects.push(EffectRequest {
            kind: EffectKind::DeathSmoke,
            position: pos.0,
        });
    }
    for entity in &kills {
        // A dying archer's queued shot never launches.
        let _ = world.remove_one::<PendingShot>(*entity);
    }

    if !kills.is_empty() {
        if let Ok(mut health) = world.get::<&mut Health>(player_entity) {
            if heal(&mut health, MELEE_KILL_REWARD * kills.len() as f64) {
                events.push(GameEvent::HealthChanged {
                    actor: ActorKind::Player,
                    current: health.current,
                    max: health.max,
                });
            }
        }
    }

    let boss = world
        .query::<(&Boss, &Position)>()
        .iter()
        .next()
        .map(|(entity, (_, pos))| (entity, pos.0));
    if let Some((boss_entity, boss_pos)) = boss {
        if player_pos.distance(boss_pos) <= MELEE_RANGE {
            if let Ok(mut health) = world.get::<&mut Health>(boss_entity) {
                let outcome = apply_damage(&mut health, MELEE_BOSS_DAMAGE);
                if outcome.applied() {
                    events.push(GameEvent::HealthChanged {
                        actor: ActorKind::Boss,
                        current: health.current,
                        max: health.max,
                    });
                }
                if outcome == DamageOutcome::Died {
                    events.push(GameEvent::BossDied);
                    effects.push(EffectRequest {
                        kind: EffectKind::DeathSmoke,
                        position: boss_pos,
                    });
                }
            }
        }
    }
}

//! Tests for the simulation engine: session flow, archer pipeline,
//! telegraphed blasts, and determinism.

use glam::DVec2;

use hollowmark_core::commands::{ActorRef, PlayerCommand};
use hollowmark_core::enums::{GamePhase, Outcome};
use hollowmark_core::events::{EffectKind, EffectRequest, GameEvent};
use hollowmark_core::state::GameStateSnapshot;

use crate::engine::{SimConfig, SimulationEngine};

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

/// Everything observable over a run of ticks.
#[derive(Default)]
struct Trace {
    events: Vec<GameEvent>,
    effects: Vec<EffectRequest>,
    last: GameStateSnapshot,
}

impl Trace {
    fn extend(&mut self, engine: &mut SimulationEngine, ticks: u64) {
        for _ in 0..ticks {
            let snapshot = engine.tick();
            self.events.extend(snapshot.events.iter().cloned());
            self.effects.extend(snapshot.effects.iter().cloned());
            self.last = snapshot;
        }
    }

    fn count(&self, matcher: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matcher(e)).count()
    }

    fn effect_count(&self, matcher: impl Fn(&EffectKind) -> bool) -> usize {
        self.effects.iter().filter(|e| matcher(&e.kind)).count()
    }
}

fn move_player(engine: &mut SimulationEngine, x: f64, y: f64) {
    engine.queue_command(PlayerCommand::SetPlayerPosition {
        position: DVec2::new(x, y),
    });
}

// ---- Session setup ----

#[test]
fn test_initial_snapshot() {
    let mut engine = engine();
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Active);
    assert_eq!(snapshot.session.outcome, Outcome::InProgress);
    assert_eq!(snapshot.session.total_coins, 3);
    assert_eq!(snapshot.session.collected, 0);
    assert_eq!(snapshot.player.lives, 3.0);
    assert!(!snapshot.player.dead);
    assert!(!snapshot.player.invulnerable);

    let boss = snapshot.boss.expect("boss should be alive at start");
    assert_eq!(boss.health, 100.0);

    assert_eq!(snapshot.archers.len(), 3);
    assert!(snapshot.archers.iter().all(|a| !a.dead));
    assert_eq!(snapshot.coins.len(), 3);
    assert!(snapshot.arrows.is_empty());
    assert!(snapshot.casts.is_empty());
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 12345 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 12345 });

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(PlayerCommand::SummonReinforcements { count: 5 });
        engine.queue_command(PlayerCommand::CastSpell {
            target: ActorRef::Player,
        });
        move_player(engine, 9.5, 5.0);
    }

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 111 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 222 });

    // The summon angles are the first rng draws, so the reinforcement
    // positions diverge immediately.
    engine_a.queue_command(PlayerCommand::SummonReinforcements { count: 3 });
    engine_b.queue_command(PlayerCommand::SummonReinforcements { count: 3 });

    let snap_a = engine_a.tick();
    let snap_b = engine_b.tick();

    let json_a = serde_json::to_string(&snap_a.archers).unwrap();
    let json_b = serde_json::to_string(&snap_b.archers).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should place the ring differently");
}

// ---- Win path ----

#[test]
fn test_win_by_coins_reveals_end_screen() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 30);
    move_player(&mut engine, -2.0, 1.0);
    trace.extend(&mut engine, 30);
    move_player(&mut engine, 3.0, -1.0);
    trace.extend(&mut engine, 5);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::CoinCollected { .. })), 3);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::GameWon)), 1);
    assert_eq!(trace.last.session.outcome, Outcome::Won);
    assert!(trace.last.player.invulnerable);
    assert!(!trace.last.session.end_screen_visible, "reveal should be delayed");
    assert!(!trace.last.session.restart_unlocked);
    assert_eq!(trace.last.phase, GamePhase::Active);

    // 1.5s reveal delay at 30Hz is 45 ticks.
    trace.extend(&mut engine, 60);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::EndScreenShown)), 1);
    assert!(trace.last.session.end_screen_visible);
    assert!(trace.last.session.restart_unlocked);
    assert_eq!(trace.last.phase, GamePhase::Frozen);
}

#[test]
fn test_winner_is_invulnerable() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 10);
    move_player(&mut engine, -2.0, 1.0);
    trace.extend(&mut engine, 10);
    move_player(&mut engine, 3.0, -1.0);
    trace.extend(&mut engine, 2);
    assert_eq!(trace.last.session.outcome, Outcome::Won);

    // A blast landing during the reveal delay does nothing.
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Player,
    });
    trace.extend(&mut engine, 30);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellResolved { hit: true, .. })), 1);
    assert_eq!(trace.last.player.lives, 3.0);
    assert!(!trace.last.player.dead);
}

// ---- Lose path ----

#[test]
fn test_player_death_loses_session() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Three blasts on a player who never moves.
    for _ in 0..3 {
        engine.queue_command(PlayerCommand::CastSpell {
            target: ActorRef::Player,
        });
        trace.extend(&mut engine, 40);
    }

    assert_eq!(trace.count(|e| matches!(e, GameEvent::PlayerDied)), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::GameLost)), 1);
    assert_eq!(trace.last.session.outcome, Outcome::Lost);
    assert!(trace.last.player.dead);
    assert_eq!(trace.last.player.lives, 0.0);

    // A cast against the corpse is dropped before it starts.
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Player,
    });
    trace.extend(&mut engine, 60);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellCastStarted { .. })), 3);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::PlayerDied)), 1);

    assert_eq!(trace.last.phase, GamePhase::Frozen);
    assert!(trace.last.session.restart_unlocked);
    assert_eq!(trace.last.session.outcome, Outcome::Lost);
}

// ---- Telegraphed blasts ----

#[test]
fn test_blast_spares_bystanders_inside_radius() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // 20 archers crowd a ring of radius 3, so the target has close
    // neighbors standing inside the explosion.
    engine.queue_command(PlayerCommand::SummonReinforcements { count: 20 });
    trace.extend(&mut engine, 1);
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Archer { archer_id: 3 },
    });
    trace.extend(&mut engine, 40);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellResolved { hit: true, .. })), 1);
    assert_eq!(
        trace.count(|e| matches!(e, GameEvent::ArcherDied { archer_id: 3 })),
        1
    );
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArcherDied { .. })), 1);

    let dead: Vec<u32> = trace
        .last
        .archers
        .iter()
        .filter(|a| a.dead)
        .map(|a| a.archer_id)
        .collect();
    assert_eq!(dead, vec![3]);
}

#[test]
fn test_blast_aborts_when_target_dies_mid_telegraph() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Stand next to the first archer post and swing; the strike lands at
    // 0.3s, well inside the 0.75s telegraph.
    move_player(&mut engine, 9.3, 5.0);
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Archer { archer_id: 0 },
    });
    engine.queue_command(PlayerCommand::MeleeAttack);
    trace.extend(&mut engine, 40);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArcherDied { archer_id: 0 })), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellAborted { .. })), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellResolved { .. })), 0);
    assert_eq!(
        trace.effect_count(|k| matches!(k, EffectKind::TelegraphRemoved { .. })),
        1
    );
    assert!(trace.last.casts.is_empty());
}

#[test]
fn test_blast_escape_spawns_effects_without_damage() {
    let mut engine = engine();
    let mut trace = Trace::default();

    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Player,
    });
    trace.extend(&mut engine, 5);
    // Step well off the frozen anchor before the telegraph expires.
    move_player(&mut engine, 0.0, 10.0);
    trace.extend(&mut engine, 40);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellResolved { hit: false, .. })), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::HealthChanged { .. })), 0);
    assert_eq!(trace.effect_count(|k| matches!(k, EffectKind::Explosion)), 3);
    assert_eq!(trace.last.player.lives, 3.0);
}

#[test]
fn test_blast_hit_costs_a_life() {
    let mut engine = engine();
    let mut trace = Trace::default();

    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Player,
    });
    trace.extend(&mut engine, 40);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::SpellResolved { hit: true, .. })), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::HealthChanged { .. })), 1);
    assert_eq!(trace.last.player.lives, 2.0);
    assert_eq!(trace.effect_count(|k| matches!(k, EffectKind::Explosion)), 3);
}

#[test]
fn test_cast_at_dead_target_is_dropped() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 9.3, 5.0);
    engine.queue_command(PlayerCommand::MeleeAttack);
    trace.extend(&mut engine, 20);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArcherDied { archer_id: 0 })), 1);

    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Archer { archer_id: 0 },
    });
    let snapshot = engine.tick();
    assert!(snapshot.casts.is_empty());
    assert!(snapshot
        .alerts
        .iter()
        .any(|a| a.message.contains("target invalid")));
}

// ---- Archer pipeline ----

#[test]
fn test_archer_fires_after_windup_then_on_cooldown() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 9.5, 5.0);
    engine.queue_command(PlayerCommand::SetGuarding { guarding: true });

    // Wind-up is 10s; shots land at ~10.3s, ~12.3s, ~14.3s.
    trace.extend(&mut engine, 290);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArrowFired { .. })), 0);

    trace.extend(&mut engine, 175);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArrowFired { archer_id: 0 })), 3);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArrowBlocked { .. })), 3);
    assert_eq!(trace.last.player.lives, 3.0, "guard should absorb every arrow");
}

#[test]
fn test_leaving_range_restarts_windup() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 9.5, 5.0);
    engine.queue_command(PlayerCommand::SetGuarding { guarding: true });
    trace.extend(&mut engine, 270); // 9s of wind-up

    move_player(&mut engine, 50.0, 50.0);
    trace.extend(&mut engine, 15);
    move_player(&mut engine, 9.5, 5.0);

    // Back in range at ~9.5s. The full 10s delay applies again, so
    // nothing fires before ~19.5s.
    trace.extend(&mut engine, 295);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArrowFired { .. })), 0);

    trace.extend(&mut engine, 40);
    assert!(trace.count(|e| matches!(e, GameEvent::ArrowFired { .. })) >= 1);
}

#[test]
fn test_pending_shot_dies_with_its_archer() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Stand in melee range of the first archer through its wind-up.
    move_player(&mut engine, 9.3, 5.0);
    trace.extend(&mut engine, 296);

    // The fire decision lands at 10.0s; this swing connects at ~10.17s,
    // between the decision and the 10.3s launch.
    engine.queue_command(PlayerCommand::MeleeAttack);
    trace.extend(&mut engine, 60);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArcherDied { archer_id: 0 })), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArrowFired { .. })), 0);
    assert!(trace.last.arrows.is_empty());
    assert_eq!(trace.last.player.lives, 3.0);
}

#[test]
fn test_arrow_expires_when_it_misses() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Engage from the edge of archer range so the arrow has a long
    // flight, then step aside the moment it launches.
    move_player(&mut engine, 5.5, 5.0);
    let mut fired_at: Option<u64> = None;
    for _ in 0..340 {
        let snapshot = engine.tick();
        let fired = snapshot
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ArrowFired { .. }));
        trace.events.extend(snapshot.events.iter().cloned());
        trace.last = snapshot;
        if fired {
            fired_at = Some(trace.last.time.tick);
            move_player(&mut engine, 5.5, -40.0);
            break;
        }
    }
    assert!(fired_at.is_some(), "archer should have fired within 340 ticks");
    assert!(!trace.last.arrows.is_empty());

    // Lifetime is 5s; the stray arrow self-expires.
    trace.extend(&mut engine, 160);
    assert!(trace.last.arrows.is_empty());
    assert_eq!(trace.count(|e| matches!(e, GameEvent::HealthChanged { .. })), 0);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArrowBlocked { .. })), 0);
    assert_eq!(trace.last.player.lives, 3.0);
}

// ---- Melee ----

#[test]
fn test_melee_chips_boss_once_per_swing() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 7.2, 0.0);
    // The second command is dropped: a swing is already in progress.
    engine.queue_command(PlayerCommand::MeleeAttack);
    engine.queue_command(PlayerCommand::MeleeAttack);
    trace.extend(&mut engine, 5);
    assert!(trace.last.player.attacking);

    trace.extend(&mut engine, 25);
    assert!(!trace.last.player.attacking);
    let boss = trace.last.boss.as_ref().expect("boss alive");
    assert_eq!(boss.health, 99.0);
}

#[test]
fn test_melee_kill_restores_a_life() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Go down a life first so the reward is visible under the cap.
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Player,
    });
    trace.extend(&mut engine, 40);
    assert_eq!(trace.last.player.lives, 2.0);

    move_player(&mut engine, 9.3, 5.0);
    engine.queue_command(PlayerCommand::MeleeAttack);
    trace.extend(&mut engine, 30);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::ArcherDied { .. })), 1);
    assert_eq!(trace.last.player.lives, 3.0);
}

#[test]
fn test_coin_pickup_ignored_after_terminal_outcome() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Ten blasts at the boss end the session while every coin is still
    // on the ground.
    for _ in 0..10 {
        engine.queue_command(PlayerCommand::CastSpell {
            target: ActorRef::Boss,
        });
        trace.extend(&mut engine, 30);
    }
    assert_eq!(trace.count(|e| matches!(e, GameEvent::GameWon)), 1);
    assert_eq!(trace.last.session.outcome, Outcome::Won);
    assert_eq!(trace.last.session.collected, 0);

    // Walking onto a coin during the reveal window changes nothing.
    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 10);
    assert_eq!(trace.last.phase, GamePhase::Active, "still inside the reveal window");
    assert_eq!(trace.count(|e| matches!(e, GameEvent::CoinCollected { .. })), 0);
    assert_eq!(trace.last.session.collected, 0);
    assert!(trace.last.coins.iter().all(|c| !c.collected));
}

#[test]
fn test_boss_death_after_loss_keeps_the_loss() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Chip the boss down to its last sliver, then let three blasts
    // finish the player.
    for _ in 0..9 {
        engine.queue_command(PlayerCommand::CastSpell {
            target: ActorRef::Boss,
        });
        trace.extend(&mut engine, 30);
    }
    for _ in 0..3 {
        engine.queue_command(PlayerCommand::CastSpell {
            target: ActorRef::Player,
        });
        trace.extend(&mut engine, 40);
    }
    assert_eq!(trace.last.session.outcome, Outcome::Lost);

    // A boss death landing during the reveal window cannot flip the
    // latched outcome.
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Boss,
    });
    trace.extend(&mut engine, 60);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::BossDied)), 1);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::GameWon)), 0);
    assert_eq!(trace.count(|e| matches!(e, GameEvent::GameLost)), 1);
    assert_eq!(trace.last.session.outcome, Outcome::Lost);
    assert!(trace.last.boss.is_none());
    assert_eq!(trace.last.phase, GamePhase::Frozen);
}

// ---- Boss movement ----

#[test]
fn test_boss_wander_stays_near_its_post() {
    let mut engine = engine();
    let start = DVec2::new(8.0, 0.0);

    // Wander is off until the driver enables it.
    let mut trace = Trace::default();
    trace.extend(&mut engine, 30);
    assert_eq!(trace.last.boss.as_ref().expect("boss alive").position, start);

    engine.queue_command(PlayerCommand::SetBossWander { enabled: true });
    let mut max_distance: f64 = 0.0;
    for _ in 0..600 {
        let snapshot = engine.tick();
        let pos = snapshot.boss.as_ref().expect("boss alive").position;
        max_distance = max_distance.max(pos.distance(start));
    }
    assert!(max_distance > 0.1, "boss should leave its post while wandering");
    assert!(
        max_distance <= 4.0 + 1e-9,
        "wander strayed {max_distance} from the post"
    );
}

// ---- Summons ----

#[test]
fn test_summon_places_ring_around_boss() {
    let mut engine = engine();
    let mut trace = Trace::default();

    engine.queue_command(PlayerCommand::SummonReinforcements { count: 4 });
    trace.extend(&mut engine, 1);

    assert_eq!(trace.last.archers.len(), 7);
    assert_eq!(trace.effect_count(|k| matches!(k, EffectKind::SpawnSmoke)), 4);

    let boss_pos = trace.last.boss.as_ref().expect("boss alive").position;
    for archer in trace.last.archers.iter().filter(|a| a.archer_id >= 3) {
        let distance = archer.position.distance(boss_pos);
        assert!(
            (distance - 3.0).abs() < 1e-9,
            "summoned archer {} off the ring: {distance}",
            archer.archer_id
        );
    }
}

// ---- Coins ----

#[test]
fn test_coin_collects_once() {
    let mut engine = engine();
    let mut trace = Trace::default();

    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 30);

    assert_eq!(trace.count(|e| matches!(e, GameEvent::CoinCollected { .. })), 1);
    assert_eq!(
        trace.count(|e| matches!(e, GameEvent::CoinCollected { remaining: 2, .. })),
        1
    );
    assert_eq!(trace.effect_count(|k| matches!(k, EffectKind::CoinSparkle)), 1);
    assert_eq!(trace.last.session.collected, 1);
    assert!(trace.last.coins.iter().any(|c| c.coin_id == 0 && c.collected));
}

// ---- Restart ----

#[test]
fn test_restart_locked_before_end_screen() {
    let mut engine = engine();
    engine.queue_command(PlayerCommand::Restart);
    let snapshot = engine.tick();

    assert!(snapshot.alerts.iter().any(|a| a.message.contains("restart")));
    assert_eq!(snapshot.session.outcome, Outcome::InProgress);
    assert_eq!(snapshot.session.collected, 0);
    assert_eq!(snapshot.archers.len(), 3);
}

#[test]
fn test_restart_rebuilds_the_session() {
    let mut engine = engine();
    let mut trace = Trace::default();

    // Take a hit, chip the boss, then win on coins.
    engine.queue_command(PlayerCommand::CastSpell {
        target: ActorRef::Player,
    });
    trace.extend(&mut engine, 40);
    move_player(&mut engine, 7.2, 0.0);
    engine.queue_command(PlayerCommand::MeleeAttack);
    trace.extend(&mut engine, 30);
    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 10);
    move_player(&mut engine, -2.0, 1.0);
    trace.extend(&mut engine, 10);
    move_player(&mut engine, 3.0, -1.0);
    trace.extend(&mut engine, 60);
    assert!(trace.last.session.restart_unlocked);

    engine.queue_command(PlayerCommand::Restart);
    let snapshot = engine.tick();

    assert_eq!(snapshot.phase, GamePhase::Active);
    assert_eq!(snapshot.session.outcome, Outcome::InProgress);
    assert_eq!(snapshot.session.collected, 0);
    assert_eq!(snapshot.session.total_coins, 3);
    assert!(!snapshot.session.restart_unlocked);
    assert!(!snapshot.session.end_screen_visible);
    assert_eq!(snapshot.time.tick, 1);
    assert_eq!(snapshot.player.lives, 3.0);
    assert!(!snapshot.player.invulnerable);
    assert_eq!(snapshot.player.position, DVec2::ZERO);
    assert_eq!(snapshot.boss.as_ref().expect("boss respawned").health, 100.0);
    assert_eq!(snapshot.archers.len(), 3);
    assert!(snapshot.coins.iter().all(|c| !c.collected));
    assert!(snapshot.casts.is_empty());
    assert!(snapshot.alerts.iter().any(|a| a.message.contains("restarted")));
}

#[test]
fn test_restart_drops_bus_subscribers() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut engine = engine();
    let seen = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&seen);
    engine.subscribe(move |_| *sink.borrow_mut() += 1);

    let mut trace = Trace::default();
    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 10);
    move_player(&mut engine, -2.0, 1.0);
    trace.extend(&mut engine, 10);
    move_player(&mut engine, 3.0, -1.0);
    trace.extend(&mut engine, 60);
    assert!(*seen.borrow() > 0, "subscriber should have seen events");
    assert_eq!(engine.subscriber_count(), 1);

    engine.queue_command(PlayerCommand::Restart);
    engine.tick();
    assert_eq!(engine.subscriber_count(), 0);

    let before = *seen.borrow();
    move_player(&mut engine, 1.5, 0.5);
    trace.extend(&mut engine, 10);
    assert_eq!(*seen.borrow(), before, "stale handler must not fire after restart");
}

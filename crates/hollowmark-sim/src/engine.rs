//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes driver commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};
use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hollowmark_combat::engagement::ArcherProfile;
use hollowmark_core::commands::{ActorRef, PlayerCommand};
use hollowmark_core::components::{Archer, Boss, Guard, Health, MeleeSwing, Player, Wander};
use hollowmark_core::constants::*;
use hollowmark_core::enums::{ActorKind, AlertLevel, GamePhase, Outcome};
use hollowmark_core::events::{Alert, EffectKind, EffectRequest, EventBus, GameEvent, SubscriberId};
use hollowmark_core::state::GameStateSnapshot;
use hollowmark_core::types::{Bounds, Position, SimTime};

use crate::cast::SpellCast;
use crate::session::SessionState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    profile: ArcherProfile,
    session: SessionState,
    casts: BTreeMap<u32, SpellCast>,
    next_archer_id: u32,
    next_arrow_id: u32,
    next_coin_id: u32,
    next_cast_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    effects: Vec<EffectRequest>,
    alerts: Vec<Alert>,
    bus: EventBus,
}

impl SimulationEngine {
    /// Create a new engine with the default session world already set up.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        let profile = ArcherProfile::standard();
        let mut next_archer_id = 0;
        let mut next_coin_id = 0;
        world_setup::setup_session(&mut world, &mut next_archer_id, &mut next_coin_id, 0.0, &profile);
        let session = SessionState::new(world_setup::count_coins(&world));

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            profile,
            session,
            casts: BTreeMap::new(),
            next_archer_id,
            next_arrow_id: 0,
            next_coin_id,
            next_cast_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            effects: Vec::new(),
            alerts: Vec::new(),
            bus: EventBus::new(),
        }
    }

    /// Queue a driver command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.apply_outcomes();
            self.time.advance();
        }

        // The end screen countdown runs on the wall tick, independent of
        // anything happening in the world.
        if self.session.advance_reveal(DT) {
            self.phase = GamePhase::Frozen;
            self.events.push(GameEvent::EndScreenShown);
            self.alert(AlertLevel::Info, "end screen revealed; restart unlocked");
        }

        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.bus.publish(event);
        }

        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.session,
            &self.casts,
            &self.profile,
            events,
            std::mem::take(&mut self.effects),
            std::mem::take(&mut self.alerts),
        )
    }

    /// Subscribe to domain events. Handlers fire once per event, after
    /// the tick that produced it. The whole bus is dropped at restart.
    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriberId {
        self.bus.subscribe(handler)
    }

    /// Remove a previously registered handler.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get a read-only reference to the active casts.
    #[cfg(test)]
    pub fn casts(&self) -> &BTreeMap<u32, SpellCast> {
        &self.casts
    }

    /// Number of live bus subscribers.
    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single driver command. Everything except `Restart` is
    /// dropped while the simulation is frozen.
    fn handle_command(&mut self, command: PlayerCommand) {
        if self.phase == GamePhase::Frozen && !matches!(command, PlayerCommand::Restart) {
            return;
        }

        match command {
            PlayerCommand::SetPlayerPosition { position } => {
                for (_entity, (_, pos, health)) in
                    self.world.query_mut::<(&Player, &mut Position, &Health)>()
                {
                    if !health.is_dead() {
                        pos.0 = position;
                    }
                }
            }
            PlayerCommand::SetGuarding { guarding } => {
                for (_entity, (_, guard, health)) in
                    self.world.query_mut::<(&Player, &mut Guard, &Health)>()
                {
                    if !health.is_dead() {
                        guard.active = guarding;
                    }
                }
            }
            PlayerCommand::MeleeAttack => self.start_melee(),
            PlayerCommand::SetBossWander { enabled } => {
                for (_entity, (_, wander)) in self.world.query_mut::<(&Boss, &mut Wander)>() {
                    wander.enabled = enabled;
                }
            }
            PlayerCommand::CastSpell { target } => self.start_cast(target),
            PlayerCommand::SummonReinforcements { count } => self.summon(count),
            PlayerCommand::Restart => self.restart(),
        }
    }

    /// Begin a melee swing unless one is already in progress or the
    /// player is dead.
    fn start_melee(&mut self) {
        let player = self
            .world
            .query::<(&Player, &Health)>()
            .iter()
            .next()
            .map(|(entity, (_, health))| (entity, health.is_dead()));
        let Some((entity, dead)) = player else { return };
        if dead || self.world.get::<&MeleeSwing>(entity).is_ok() {
            return;
        }

        let now = self.time.elapsed_secs;
        let _ = self.world.insert_one(
            entity,
            MeleeSwing {
                hit_at_secs: now + MELEE_HIT_DELAY_SECS,
                done_at_secs: now + MELEE_DURATION_SECS,
                hit_applied: false,
            },
        );
    }

    /// Begin a telegraphed blast against a single captured target.
    /// The blast center is frozen here; only the escape test at
    /// resolution reads the target again.
    fn start_cast(&mut self, target: ActorRef) {
        let Some((entity, kind)) = self.resolve_target(target) else {
            self.alert(AlertLevel::Warning, "spell target invalid; cast dropped");
            return;
        };

        let pos = self.world.get::<&Position>(entity).map(|p| *p).ok();
        let Some(pos) = pos else {
            self.alert(AlertLevel::Warning, "spell target invalid; cast dropped");
            return;
        };
        let bounds = self.world.get::<&Bounds>(entity).map(|b| *b).ok();

        let (anchor, reticle_position) = match bounds {
            Some(bounds) => {
                let anchor = bounds.center(&pos);
                // The marker floats above the target's head, except for
                // the player, whose marker sits on the body itself.
                let reticle = if kind == ActorKind::Player {
                    anchor
                } else {
                    DVec2::new(anchor.x, bounds.top(&pos) + RETICLE_EXTRA_Y_OFFSET)
                };
                (anchor, reticle)
            }
            None => (pos.0, pos.0 + DVec2::new(0.0, RETICLE_FALLBACK_Y_OFFSET)),
        };

        let cast_id = self.next_cast_id;
        self.next_cast_id += 1;
        self.casts.insert(
            cast_id,
            SpellCast {
                id: cast_id,
                target: entity,
                target_kind: kind,
                anchor,
                reticle_position,
                reticle_scale: 1.0,
                elapsed_secs: 0.0,
            },
        );
        self.events.push(GameEvent::SpellCastStarted { cast_id });
        self.effects.push(EffectRequest {
            kind: EffectKind::TelegraphMarker { cast_id },
            position: reticle_position,
        });
    }

    /// Resolve an actor reference to a live entity. Stale references
    /// produce None and the caller drops the command.
    fn resolve_target(&self, target: ActorRef) -> Option<(hecs::Entity, ActorKind)> {
        match target {
            ActorRef::Player => self
                .world
                .query::<(&Player, &Health)>()
                .iter()
                .next()
                .and_then(|(entity, (_, health))| {
                    (!health.is_dead()).then_some((entity, ActorKind::Player))
                }),
            ActorRef::Boss => self
                .world
                .query::<(&Boss, &Health)>()
                .iter()
                .next()
                .and_then(|(entity, (_, health))| {
                    (!health.is_dead()).then_some((entity, ActorKind::Boss))
                }),
            ActorRef::Archer { archer_id } => self
                .world
                .query::<&Archer>()
                .iter()
                .find(|(_, archer)| archer.archer_id == archer_id && !archer.dead)
                .map(|(entity, _)| (entity, ActorKind::Archer)),
        }
    }

    /// Spawn reinforcement archers at random angles on a ring around
    /// the boss.
    fn summon(&mut self, count: u32) {
        let boss_pos = self
            .world
            .query::<(&Boss, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| pos.0);
        let Some(boss_pos) = boss_pos else {
            self.alert(AlertLevel::Warning, "no boss to summon for; command dropped");
            return;
        };

        let now = self.time.elapsed_secs;
        for _ in 0..count {
            let angle: f64 = self.rng.gen_range(0.0..TAU);
            let post = boss_pos + SUMMON_RING_RADIUS * DVec2::new(angle.cos(), angle.sin());
            world_setup::spawn_archer(
                &mut self.world,
                &mut self.next_archer_id,
                post,
                now,
                &self.profile,
            );
            self.effects.push(EffectRequest {
                kind: EffectKind::SpawnSmoke,
                position: post,
            });
        }
    }

    /// Tear down and rebuild the session wholesale. Gated on the end
    /// screen having unlocked restart.
    fn restart(&mut self) {
        if !self.session.restart_unlocked {
            self.alert(AlertLevel::Info, "restart locked until the end screen");
            return;
        }

        self.world = World::new();
        self.casts.clear();
        self.bus.clear();
        self.despawn_buffer.clear();
        self.events.clear();
        self.effects.clear();
        self.alerts.clear();
        self.next_archer_id = 0;
        self.next_arrow_id = 0;
        self.next_coin_id = 0;
        self.next_cast_id = 0;
        self.time = SimTime::default();
        self.phase = GamePhase::Active;

        world_setup::setup_session(
            &mut self.world,
            &mut self.next_archer_id,
            &mut self.next_coin_id,
            0.0,
            &self.profile,
        );
        self.session = SessionState::new(world_setup::count_coins(&self.world));
        self.alert(AlertLevel::Info, "session restarted");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        // 1. Boss wander
        systems::wander::run(&mut self.world, &mut self.rng, now);
        // 2. Archer engagement + shot resolution
        systems::archer::run(
            &mut self.world,
            &self.profile,
            now,
            &mut self.next_arrow_id,
            &mut self.events,
        );
        // 3. Arrow flight + player hit test
        systems::arrow::run(
            &mut self.world,
            &mut self.events,
            &mut self.effects,
            &mut self.despawn_buffer,
        );
        // 4. Melee swing
        systems::melee::run(&mut self.world, now, &mut self.events, &mut self.effects);
        // 5. Telegraphed blasts
        systems::spell::run(
            &mut self.world,
            &mut self.casts,
            &mut self.rng,
            &mut self.events,
            &mut self.effects,
        );
        // 6. Coin pickup
        systems::coin::run(
            &mut self.world,
            &mut self.session,
            &mut self.events,
            &mut self.effects,
        );
        // 7. Cleanup (dead boss)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    /// Fold this tick's events into the session outcome. A defeat and a
    /// victory landing on the same tick resolve as a defeat.
    fn apply_outcomes(&mut self) {
        if self.session.outcome != Outcome::InProgress {
            return;
        }

        let mut won = false;
        let mut lost = false;
        for event in &self.events {
            match event {
                GameEvent::PlayerDied => lost = true,
                GameEvent::BossDied => won = true,
                GameEvent::CoinCollected { .. } => won |= self.session.all_coins_collected(),
                _ => {}
            }
        }

        if lost {
            self.session.finish(Outcome::Lost);
            self.events.push(GameEvent::GameLost);
            self.alert(AlertLevel::Critical, "player defeated");
        } else if won {
            self.session.finish(Outcome::Won);
            // Nothing can hurt the winner while the end screen pends.
            for (_entity, (_, health)) in self.world.query_mut::<(&Player, &mut Health)>() {
                health.invulnerable = true;
            }
            self.events.push(GameEvent::GameWon);
            self.alert(AlertLevel::Info, "victory");
        }
    }

    fn alert(&mut self, level: AlertLevel, message: &str) {
        self.alerts.push(Alert {
            level,
            message: message.to_string(),
            tick: self.time.tick,
        });
    }
}

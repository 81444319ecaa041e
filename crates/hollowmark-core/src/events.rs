//! Domain events, presentation effect requests, and the notification bus.
//!
//! Events are published on the process-scoped `EventBus` and also carried
//! in each tick's snapshot so presentation layers can consume either feed.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{ActorKind, AlertLevel};

/// Domain events emitted by the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An actor's health pool changed.
    HealthChanged {
        actor: ActorKind,
        current: f64,
        max: f64,
    },
    /// The player ran out of lives. Fired exactly once per life.
    PlayerDied,
    /// The boss's health reached zero. Fired exactly once.
    BossDied,
    /// An archer was killed.
    ArcherDied { archer_id: u32 },
    /// A coin was collected.
    CoinCollected {
        coin_id: u32,
        value: u32,
        remaining: u32,
    },
    /// An archer launched an arrow.
    ArrowFired { archer_id: u32 },
    /// An arrow was consumed by the player's guard without damage.
    ArrowBlocked { arrow_id: u32 },
    /// A spell cast entered its telegraph.
    SpellCastStarted { cast_id: u32 },
    /// A spell cast resolved; `hit` is false when the target escaped.
    SpellResolved { cast_id: u32, hit: bool },
    /// A spell cast was abandoned because its target became invalid.
    SpellAborted { cast_id: u32 },
    /// The session reached a terminal outcome.
    GameWon,
    GameLost,
    /// The end screen became visible and restart unlocked.
    EndScreenShown,
}

/// Kind of visual effect requested by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Smoke puff on death.
    DeathSmoke,
    /// Smoke puff on spawn/summon (same animation, object stays alive).
    SpawnSmoke,
    /// Telegraph marker appears for a cast.
    TelegraphMarker { cast_id: u32 },
    /// Telegraph marker for a cast is removed.
    TelegraphRemoved { cast_id: u32 },
    /// Explosion burst.
    Explosion,
    /// Coin pickup sparkle.
    CoinSparkle,
}

/// Fire-and-forget visual effect request. The effect auto-expires on the
/// presentation side; the core never waits on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: DVec2,
}

/// Diagnostic alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}

/// Handle returned by `EventBus::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Process-scoped publish/subscribe registry for domain events.
///
/// Publishing with zero subscribers is not an error. The bus is cleared
/// wholesale at session restart so stale handlers never fire.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(&GameEvent)>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; returns a handle for unsubscribing.
    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if the handle was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    /// Drop all subscribers (session teardown).
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

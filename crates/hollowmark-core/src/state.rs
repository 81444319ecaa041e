//! Game state snapshot — the complete visible state produced each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, EffectRequest, GameEvent};
use crate::types::SimTime;

/// Complete game state produced by the engine after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub session: SessionView,
    pub player: PlayerView,
    pub boss: Option<BossView>,
    pub archers: Vec<ArcherView>,
    pub arrows: Vec<ArrowView>,
    pub coins: Vec<CoinView>,
    pub casts: Vec<CastView>,
    pub events: Vec<GameEvent>,
    pub effects: Vec<EffectRequest>,
    pub alerts: Vec<Alert>,
}

/// Session progress and outcome for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub total_coins: u32,
    pub collected: u32,
    pub remaining: u32,
    pub outcome: Outcome,
    pub restart_unlocked: bool,
    pub end_screen_visible: bool,
}

/// Player status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub lives: f64,
    pub max_lives: f64,
    pub invulnerable: bool,
    pub guarding: bool,
    pub attacking: bool,
    pub dead: bool,
}

/// Boss status for display. Absent once the boss has been destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub position: DVec2,
    pub health: f64,
    pub max_health: f64,
}

/// Archer status for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcherView {
    pub archer_id: u32,
    pub position: DVec2,
    pub phase: EngagementPhase,
    pub dead: bool,
}

/// Arrow in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrowView {
    pub arrow_id: u32,
    pub position: DVec2,
    pub direction: DVec2,
}

/// Coin status for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinView {
    pub coin_id: u32,
    pub position: DVec2,
    pub collected: bool,
}

/// Active spell cast, for telegraph rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastView {
    pub cast_id: u32,
    /// Fixed blast center captured at cast start.
    pub anchor: DVec2,
    pub reticle_position: DVec2,
    /// Breathing scale factor applied to the marker this tick.
    pub reticle_scale: f64,
    pub remaining_secs: f64,
}

//! Session bookkeeping: coin progress, outcome latch, end screen reveal.

use hollowmark_core::constants::END_SCREEN_DELAY_SECS;
use hollowmark_core::enums::Outcome;

/// Session-scoped state that lives outside the ECS world.
///
/// The outcome transitions out of `InProgress` at most once per session.
/// Reaching a terminal outcome starts the end screen countdown; the
/// simulation keeps running until the countdown fires.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Coins present at session start.
    pub total_coins: u32,
    /// Coins collected so far.
    pub collected: u32,
    pub outcome: Outcome,
    /// Countdown to the end screen reveal; `Some` only after a terminal
    /// outcome, `None` again once the reveal has fired.
    pub reveal_remaining_secs: Option<f64>,
    pub restart_unlocked: bool,
    pub end_screen_visible: bool,
}

impl SessionState {
    pub fn new(total_coins: u32) -> Self {
        Self {
            total_coins,
            collected: 0,
            outcome: Outcome::InProgress,
            reveal_remaining_secs: None,
            restart_unlocked: false,
            end_screen_visible: false,
        }
    }

    /// Coins still uncollected.
    pub fn remaining(&self) -> u32 {
        self.total_coins.saturating_sub(self.collected)
    }

    /// Record one coin collected and return the new remaining count.
    pub fn note_coin(&mut self) -> u32 {
        self.collected += 1;
        self.remaining()
    }

    /// Whether the coin win condition is satisfied. A session that started
    /// with zero coins never wins this way.
    pub fn all_coins_collected(&self) -> bool {
        self.total_coins > 0 && self.collected >= self.total_coins
    }

    /// Latch a terminal outcome and start the reveal countdown.
    /// No-op if the session already finished.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.outcome != Outcome::InProgress || outcome == Outcome::InProgress {
            return false;
        }
        self.outcome = outcome;
        self.reveal_remaining_secs = Some(END_SCREEN_DELAY_SECS);
        true
    }

    /// Advance the reveal countdown. Returns true exactly once, on the
    /// tick the countdown crosses zero; the end screen becomes visible
    /// and restart unlocks at that moment.
    pub fn advance_reveal(&mut self, dt: f64) -> bool {
        let Some(remaining) = self.reveal_remaining_secs else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.reveal_remaining_secs = Some(remaining);
            return false;
        }
        self.reveal_remaining_secs = None;
        self.end_screen_visible = true;
        self.restart_unlocked = true;
        true
    }
}

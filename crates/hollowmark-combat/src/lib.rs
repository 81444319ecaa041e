//! Combat rules for HOLLOWMARK.
//!
//! Pure transition functions over plain data: the health/damage state
//! machine and the archer engagement state machine. No ECS dependency —
//! systems in the sim crate apply these to world state.

pub mod engagement;
pub mod health;

pub use hollowmark_core as core;

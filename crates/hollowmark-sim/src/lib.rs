//! Simulation engine for HOLLOWMARK.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the driver.

pub mod cast;
pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use hollowmark_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;

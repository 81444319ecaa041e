//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; anything that must survive a tick
//! lives in components or on the engine.

pub mod archer;
pub mod arrow;
pub mod cleanup;
pub mod coin;
pub mod melee;
pub mod snapshot;
pub mod spell;
pub mod wander;

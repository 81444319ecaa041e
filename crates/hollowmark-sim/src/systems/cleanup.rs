//! Cleanup system: removes entities in a terminal state.
//!
//! Dead archers are deliberately kept in the world (their dead latch
//! gates further hits and the view shows the corpse); the boss entity
//! is removed outright so later casts against it abort.

use hecs::{Entity, World};

use hollowmark_core::components::{Boss, Health};

/// Despawn the boss once its health pool is empty.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_boss, health)) in world.query_mut::<(&Boss, &Health)>() {
        if health.is_dead() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

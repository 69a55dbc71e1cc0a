//! Deferred despawn of dead, spent, and consumed entities. Runs last in the
//! tick so no other system ever observes a half-removed entity.

use hecs::{Entity, World};

use skirmish_core::components::{Health, Mine, Pickup, PlayerTag, Projectile};

/// Collect and despawn everything flagged for removal this tick. The buffer
/// is reused across ticks to avoid churn.
pub fn run(world: &mut World, buffer: &mut Vec<Entity>) {
    buffer.clear();

    for (entity, health) in world.query::<&Health>().without::<&PlayerTag>().iter() {
        if health.hp <= 0.0 {
            buffer.push(entity);
        }
    }
    for (entity, proj) in world.query::<&Projectile>().iter() {
        if proj.spent {
            buffer.push(entity);
        }
    }
    for (entity, mine) in world.query::<&Mine>().iter() {
        if mine.detonated {
            buffer.push(entity);
        }
    }
    for (entity, pickup) in world.query::<&Pickup>().iter() {
        if pickup.collected || pickup.expired {
            buffer.push(entity);
        }
    }

    for entity in buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

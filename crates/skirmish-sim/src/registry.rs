//! Spatial queries over the entity world.
//!
//! The hecs `World` is the sole owner of all entity collections; systems
//! hold ids only and query through these helpers.

use hecs::{Entity, World};

use skirmish_core::components::{Boss, Enemy, Health};
use skirmish_core::types::Position;

/// Nearest living enemy to `origin` within `max_range`, if any.
pub fn nearest_enemy(world: &World, origin: Position, max_range: f64) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position, f64)> = None;
    let mut query = world.query::<(&Enemy, &Position, &Health)>();
    for (entity, (_enemy, pos, health)) in query.iter() {
        if health.hp <= 0.0 {
            continue;
        }
        let dist = origin.distance_to(pos);
        if dist > max_range {
            continue;
        }
        if best.map_or(true, |(_, _, d)| dist < d) {
            best = Some((entity, *pos, dist));
        }
    }
    best.map(|(entity, pos, _)| (entity, pos))
}

/// All living enemies whose center lies within `radius` of `center`.
pub fn enemies_in_radius(world: &World, center: Position, radius: f64) -> Vec<(Entity, Position)> {
    let mut hits = Vec::new();
    let mut query = world.query::<(&Enemy, &Position, &Health)>();
    for (entity, (_enemy, pos, health)) in query.iter() {
        if health.hp > 0.0 && center.distance_to(pos) <= radius {
            hits.push((entity, *pos));
        }
    }
    hits
}

/// Is any boss still alive? Freezes the wave timer and ordinary spawning.
pub fn boss_alive(world: &World) -> bool {
    let mut query = world.query::<(&Boss, &Health)>();
    query.iter().any(|(_, (_, health))| health.hp > 0.0)
}

/// Count of living enemies (bosses included).
pub fn live_enemy_count(world: &World) -> usize {
    let mut query = world.query::<(&Enemy, &Health)>();
    query.iter().filter(|(_, (_, h))| h.hp > 0.0).count()
}

//! Enemy seek movement and boss ranged attacks.

use hecs::{Entity, World};

use skirmish_core::components::{EnemyCombat, Health, RangedAttacker};
use skirmish_core::constants::DT;
use skirmish_core::types::{Position, Velocity};

use crate::world_setup;

/// Move every living enemy straight toward the player and fire any ready
/// boss ranged attacks. Phasing is render-only; phasing enemies move and
/// collide like the rest.
pub fn run(world: &mut World, player: Entity, now: f64) {
    let player_pos = match world.get::<&Position>(player) {
        Ok(pos) => *pos,
        Err(_) => return,
    };

    for (_, (pos, vel, combat, health)) in
        world.query_mut::<(&mut Position, &mut Velocity, &EnemyCombat, &Health)>()
    {
        if health.hp <= 0.0 {
            continue;
        }
        vel.0 = pos.direction_to(&player_pos) * combat.speed;
        pos.0 += vel.0 * DT;
    }

    // Ranged bosses, two phases to keep the world borrow clean.
    let mut volleys: Vec<(Position, f64)> = Vec::new();
    for (_, (pos, ranged, health)) in
        world.query_mut::<(&Position, &mut RangedAttacker, &Health)>()
    {
        if health.hp <= 0.0 {
            continue;
        }
        if now - ranged.last_fired >= ranged.fire_interval {
            ranged.last_fired = now;
            volleys.push((*pos, ranged.projectile_damage));
        }
    }
    for (origin, damage) in volleys {
        let dir = origin.direction_to(&player_pos);
        if dir == glam::DVec2::ZERO {
            continue;
        }
        world_setup::spawn_enemy_projectile(world, origin, dir, damage);
    }
}

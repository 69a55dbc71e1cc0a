//! Projectile flight: integration, grenade deceleration, and expiry flags.

use hecs::World;

use skirmish_core::components::{Grenade, Projectile};
use skirmish_core::constants::{
    ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH, DT, PROJECTILE_BOUNDS_MARGIN,
};
use skirmish_core::types::{Position, Velocity};

/// Integrate all projectiles and flag expiries. Arrived grenades are flagged
/// for detonation; the collision system performs the explosion so grenade
/// expiry and direct hits share one code path.
pub fn run(world: &mut World) {
    for (_, (pos, vel, proj, grenade)) in world
        .query_mut::<(&mut Position, &mut Velocity, &mut Projectile, Option<&mut Grenade>)>()
    {
        if proj.spent {
            continue;
        }

        if let Some(grenade) = &grenade {
            // Ease from full speed at 70% of range down to 10% at arrival.
            let fraction = (proj.travelled / grenade.range).clamp(0.0, 1.0);
            let factor = if fraction > 0.7 {
                1.0 - 0.9 * (fraction - 0.7) / 0.3
            } else {
                1.0
            };
            let dir = vel.0.normalize_or_zero();
            vel.0 = dir * proj.base_speed * factor;
        }

        let step = vel.0 * DT;
        pos.0 += step;
        proj.travelled += step.length();

        let out_x = ARENA_HALF_WIDTH + PROJECTILE_BOUNDS_MARGIN;
        let out_y = ARENA_HALF_HEIGHT + PROJECTILE_BOUNDS_MARGIN;
        if pos.0.x.abs() > out_x || pos.0.y.abs() > out_y {
            proj.spent = true;
            continue;
        }

        if let Some(grenade) = grenade {
            if proj.travelled >= grenade.range {
                grenade.explode_on_expire = true;
            }
        } else if let Some(max) = proj.max_distance {
            if proj.travelled > max {
                proj.spent = true;
            }
        }
    }
}

//! Player movement and regeneration.

use glam::DVec2;
use hecs::{Entity, World};

use skirmish_core::components::{Health, RectBody};
use skirmish_core::constants::{ARENA_HALF_HEIGHT, ARENA_HALF_WIDTH, PLAYER_BASE_SPEED};
use skirmish_core::stats::PlayerStats;
use skirmish_core::types::{Position, SimTime, Velocity};

/// Move the player by the current input vector and apply regen. The player
/// is clamped inside the arena; enemies and projectiles are not.
pub fn run(world: &mut World, player: Entity, move_input: DVec2, time: &SimTime) {
    let dt = time.dt();

    let Ok(mut query) = world.query_one::<(
        &mut Position,
        &mut Velocity,
        &mut Health,
        &PlayerStats,
        &RectBody,
    )>(player) else {
        return;
    };
    let Some((pos, vel, health, stats, body)) = query.get() else {
        return;
    };

    let speed = PLAYER_BASE_SPEED * stats.move_speed_mult;
    vel.0 = move_input * speed;
    pos.0 += vel.0 * dt;

    let max_x = ARENA_HALF_WIDTH - body.half_width;
    let max_y = ARENA_HALF_HEIGHT - body.half_height;
    pos.0.x = pos.0.x.clamp(-max_x, max_x);
    pos.0.y = pos.0.y.clamp(-max_y, max_y);

    if stats.regen > 0.0 && health.hp > 0.0 {
        health.hp = (health.hp + stats.regen * dt).min(health.max);
    }
}

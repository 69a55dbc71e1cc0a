//! Mine arming and trigger resolution.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::Mine;
use skirmish_core::events::GameEvent;
use skirmish_core::stats::PlayerStats;
use skirmish_core::types::Position;

use crate::registry;
use crate::score::ScoreState;
use crate::systems::collision::{self, PendingExplosion};

/// Arm mines past their delay and detonate armed mines on first enemy
/// contact. Detonations run through the same explosion/death machinery as
/// projectile blasts.
pub fn run(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    now: f64,
) {
    let stats = match world.get::<&PlayerStats>(player) {
        Ok(stats) => (*stats).clone(),
        Err(_) => return,
    };

    let mut armed_mines: Vec<(Entity, Position, f64)> = Vec::new();
    for (entity, (pos, mine)) in world.query_mut::<(&Position, &mut Mine)>() {
        if mine.detonated {
            continue;
        }
        if !mine.armed && now >= mine.armed_at {
            mine.armed = true;
        }
        if mine.armed {
            armed_mines.push((entity, *pos, mine.trigger_radius));
        }
    }

    let mut explosions: VecDeque<PendingExplosion> = VecDeque::new();
    for (entity, pos, trigger_radius) in armed_mines {
        if registry::enemies_in_radius(world, pos, trigger_radius).is_empty() {
            continue;
        }
        let Ok(mut mine) = world.get::<&mut Mine>(entity) else {
            continue;
        };
        mine.detonated = true;
        explosions.push_back(PendingExplosion {
            center: pos,
            radius: mine.blast_radius * stats.explosion_radius_mult,
            damage: mine.damage * stats.damage_mult,
            style: skirmish_core::enums::ExplosionStyle::MineBlast,
        });
    }

    if !explosions.is_empty() {
        let mut deaths = VecDeque::new();
        collision::process_worklists(
            world,
            rng,
            events,
            score,
            &stats,
            now,
            &mut deaths,
            &mut explosions,
        );
    }
}

//! Pickup lifetime, magnet attraction, and collection.

use hecs::{Entity, World};

use skirmish_core::components::{Health, Pickup};
use skirmish_core::constants::{DT, PICKUP_COLLECT_RADIUS, PICKUP_MAGNET_SPEED};
use skirmish_core::enums::PickupKind;
use skirmish_core::events::GameEvent;
use skirmish_core::stats::PlayerStats;
use skirmish_core::types::Position;

use crate::score::ScoreState;

/// Age out expired pickups, home attracted ones toward the player, and
/// collect on contact. Attraction is sticky: once inside the pickup range a
/// pickup homes until collected, even if the player moves away.
pub fn run(
    world: &mut World,
    player: Entity,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    now: f64,
) {
    let (player_pos, pickup_range, gold_mult) = {
        let Ok(mut query) = world.query_one::<(&Position, &PlayerStats)>(player) else {
            return;
        };
        let Some((pos, stats)) = query.get() else {
            return;
        };
        (*pos, stats.pickup_range, stats.gold_mult)
    };

    let mut collected: Vec<(PickupKind, f64)> = Vec::new();
    for (_, (pos, pickup)) in world.query_mut::<(&mut Position, &mut Pickup)>() {
        if pickup.collected || pickup.expired {
            continue;
        }
        if let Some(expires_at) = pickup.expires_at {
            if now >= expires_at {
                pickup.expired = true;
                continue;
            }
        }

        let dist = pos.distance_to(&player_pos);
        if !pickup.attracted && dist <= pickup_range {
            pickup.attracted = true;
        }
        if pickup.attracted {
            pos.0 += pos.direction_to(&player_pos) * PICKUP_MAGNET_SPEED * DT;
        }
        if pos.distance_to(&player_pos) <= PICKUP_COLLECT_RADIUS {
            pickup.collected = true;
            collected.push((pickup.kind, pickup.value));
        }
    }

    for (kind, value) in collected {
        match kind {
            PickupKind::Gold => score.gold += value * gold_mult,
            PickupKind::Health => {
                if let Ok(mut health) = world.get::<&mut Health>(player) {
                    if health.hp > 0.0 {
                        health.hp = (health.hp + value).min(health.max);
                    }
                }
            }
        }
        events.push(GameEvent::PickupCollected { kind });
    }
}

//! Snapshot construction: the read-only view handed out after each tick.

use hecs::{Entity, World};

use skirmish_core::components::{
    Body, Boss, EnemyCombat, EnemyKind, Health, Invincibility, Mine, Phasing, Pickup, Projectile,
    RectBody,
};
use skirmish_core::constants::PICKUP_SHRINK_SECS;
use skirmish_core::enums::GamePhase;
use skirmish_core::events::GameEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Position, SimTime};
use skirmish_core::weapons::Loadout;

use crate::registry;
use crate::score::ScoreState;
use crate::systems::wave_spawner::WaveState;

/// Build the full snapshot for the tick that just ran.
pub fn build(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    wave: &WaveState,
    player: Option<Entity>,
    events: Vec<GameEvent>,
    score: &ScoreState,
) -> GameStateSnapshot {
    let now = time.elapsed_secs;

    let player_view = player.and_then(|entity| {
        let mut query = world
            .query_one::<(&Position, &RectBody, &Health, &Invincibility, &Loadout)>(entity)
            .ok()?;
        let (pos, body, health, inv, loadout) = query.get()?;
        Some(PlayerView {
            position: *pos,
            half_width: body.half_width,
            half_height: body.half_height,
            hp: health.hp,
            max_hp: health.max,
            invincible: now < inv.until,
            weapons: loadout
                .weapons
                .iter()
                .map(|w| WeaponView {
                    kind: w.kind,
                    level: w.level,
                })
                .collect(),
        })
    });

    let mut enemies = Vec::new();
    {
        let mut query = world.query::<(
            &EnemyCombat,
            &Position,
            &Body,
            &Health,
            Option<&EnemyKind>,
            Option<&Boss>,
            Option<&Phasing>,
        )>();
        for (_, (_, pos, body, health, kind, boss, phasing)) in query.iter() {
            if health.hp <= 0.0 {
                continue;
            }
            enemies.push(EnemyView {
                position: *pos,
                radius: body.radius,
                hp: health.hp,
                max_hp: health.max,
                archetype: kind.map(|k| k.archetype),
                is_boss: boss.is_some(),
                boss_archetype: boss.map(|b| b.archetype),
                phasing: phasing.is_some(),
            });
        }
    }

    let mut projectiles = Vec::new();
    {
        let mut query = world.query::<(&Position, &Body, &Projectile)>();
        for (_, (pos, body, proj)) in query.iter() {
            if proj.spent {
                continue;
            }
            projectiles.push(ProjectileView {
                position: *pos,
                radius: body.radius,
                style: proj.style,
                faction: proj.faction,
            });
        }
    }

    let mut deployables = Vec::new();
    {
        let mut query = world.query::<(&Position, &Body, &Mine)>();
        for (_, (pos, body, mine)) in query.iter() {
            if mine.detonated {
                continue;
            }
            deployables.push(DeployableView {
                position: *pos,
                radius: body.radius,
                armed: mine.armed,
            });
        }
    }

    let mut pickups = Vec::new();
    {
        let mut query = world.query::<(&Position, &Pickup)>();
        for (_, (pos, pickup)) in query.iter() {
            if pickup.collected || pickup.expired {
                continue;
            }
            let scale = match pickup.expires_at {
                Some(expires_at) => {
                    ((expires_at - now) / PICKUP_SHRINK_SECS).clamp(0.0, 1.0)
                }
                None => 1.0,
            };
            pickups.push(PickupView {
                position: *pos,
                kind: pickup.kind,
                value: pickup.value,
                scale,
            });
        }
    }

    GameStateSnapshot {
        time: *time,
        phase,
        wave: WaveView {
            number: wave.number,
            active: wave.active,
            time_remaining: wave.time_remaining,
            boss_alive: registry::boss_alive(world),
        },
        player: player_view,
        enemies,
        projectiles,
        deployables,
        pickups,
        events,
        score: score.view(),
    }
}

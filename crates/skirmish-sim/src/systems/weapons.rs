//! Weapon cooldowns, auto-aim targeting, and firing.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::enums::WeaponCategory;
use skirmish_core::events::GameEvent;
use skirmish_core::geometry::spread_offsets;
use skirmish_core::stats::PlayerStats;
use skirmish_core::types::Position;
use skirmish_core::weapons::{self, Loadout, WeaponInstance};

use crate::registry;
use crate::world_setup;

/// One projectile to spawn after targeting resolves.
struct Shot {
    weapon: WeaponInstance,
    dir: DVec2,
    damage: f64,
}

/// Fire every ready weapon. Targeting is pure nearest-enemy auto-aim; a
/// standard weapon with no enemy in range holds its shot (cooldown keeps
/// running from the last actual shot), while mines are placed regardless.
pub fn run(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let (origin, stats, weapon_list) = {
        let Ok(pos) = world.get::<&Position>(player) else {
            return;
        };
        let Ok(stats) = world.get::<&PlayerStats>(player) else {
            return;
        };
        let Ok(loadout) = world.get::<&Loadout>(player) else {
            return;
        };
        (*pos, (*stats).clone(), loadout.weapons.clone())
    };

    let mut shots: Vec<Shot> = Vec::new();
    let mut mines: Vec<WeaponInstance> = Vec::new();
    let mut fired_slots: Vec<usize> = Vec::new();

    for (slot, weapon) in weapon_list.iter().enumerate() {
        if !weapon.can_fire(now, stats.attack_speed_mult) {
            continue;
        }
        let cfg = weapons::config(weapon.kind);

        if cfg.category == WeaponCategory::Mine {
            fired_slots.push(slot);
            mines.push(weapon.clone());
            events.push(GameEvent::WeaponFired { kind: weapon.kind });
            continue;
        }

        let range = cfg.range * stats.attack_range_mult;
        let Some((_target, target_pos)) = registry::nearest_enemy(world, origin, range) else {
            continue;
        };
        let aim = origin.direction_to(&target_pos);
        let aim = if aim == DVec2::ZERO { DVec2::X } else { aim };
        let base_angle = aim.y.atan2(aim.x);

        let count = cfg.bullet_count + stats.extra_projectiles + weapon.extra_projectiles;
        let offsets = if count > 1 {
            spread_offsets(count, cfg.spread)
        } else if cfg.spread > 0.0 {
            // Single bullet with spread: one uniform jitter within the arc.
            vec![rng.gen_range(-cfg.spread / 2.0..cfg.spread / 2.0)]
        } else {
            vec![0.0]
        };

        for offset in offsets {
            let mut damage = weapon.damage();
            if rng.gen::<f64>() < stats.crit_chance {
                damage *= stats.crit_damage;
            }
            shots.push(Shot {
                weapon: weapon.clone(),
                dir: DVec2::from_angle(base_angle + offset),
                damage,
            });
        }
        fired_slots.push(slot);
        events.push(GameEvent::WeaponFired { kind: weapon.kind });
    }

    if let Ok(mut loadout) = world.get::<&mut Loadout>(player) {
        for &slot in &fired_slots {
            loadout.weapons[slot].mark_fired(now);
        }
    }

    for shot in &shots {
        world_setup::spawn_projectile(world, &shot.weapon, &stats, origin, shot.dir, shot.damage);
    }
    for mine in &mines {
        world_setup::spawn_mine(world, mine, origin, now);
    }
}

//! Collision and damage resolution: contact damage, projectile hits, chain
//! lightning, explosions, and death effects.
//!
//! Deaths and explosions interact (a bomber dying inside a blast chains
//! another blast), so both are drained from worklists within the same tick
//! until quiescent.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{
    Body, Boss, Chain, EnemyCombat, EnemyKind, ExplodeOnDeath, Explosive, Grenade, Health,
    Invincibility, Pierce, Projectile, RectBody, SplitOnDeath,
};
use skirmish_core::constants::*;
use skirmish_core::enums::{ExplosionStyle, Faction, PickupKind};
use skirmish_core::events::GameEvent;
use skirmish_core::geometry;
use skirmish_core::stats::{mitigated_damage, PlayerStats};
use skirmish_core::types::{Position, Velocity};

use crate::registry;
use crate::score::ScoreState;
use crate::world_setup;

/// An area detonation waiting to be resolved. `damage` and `radius` are
/// final (multipliers already applied by whoever queued it).
pub(crate) struct PendingExplosion {
    pub center: Position,
    pub radius: f64,
    pub damage: f64,
    pub style: ExplosionStyle,
}

/// Point-in-time copy of one living enemy, taken before projectile
/// resolution so hit scanning never aliases the world borrow.
#[derive(Clone, Copy)]
struct EnemySnap {
    entity: Entity,
    pos: Position,
    radius: f64,
}

/// A damage application deferred until projectile scanning is done.
struct HitIntent {
    enemy: Entity,
    damage: f64,
    knockback: DVec2,
}

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

    let mut deaths: VecDeque<Entity> = VecDeque::new();
    let mut explosions: VecDeque<PendingExplosion> = VecDeque::new();

    resolve_player_contacts(world, player, rng, events, &stats, &mut deaths, now);
    resolve_enemy_projectiles(world, player, rng, events, &stats, now);
    resolve_player_projectiles(world, player, &stats, &mut deaths, &mut explosions);

    process_worklists(
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

/// Center and half-extents of the player rectangle.
fn player_rect(world: &World, player: Entity) -> Option<(Position, DVec2)> {
    let mut query = world.query_one::<(&Position, &RectBody)>(player).ok()?;
    let (pos, body) = query.get()?;
    Some((*pos, DVec2::new(body.half_width, body.half_height)))
}

/// Player↔enemy body contact. Dodge is rolled before anything else; a
/// dodged hit has no side effects at all. Thorns can kill.
fn resolve_player_contacts(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    stats: &PlayerStats,
    deaths: &mut VecDeque<Entity>,
    now: f64,
) {
    let Some((player_pos, half)) = player_rect(world, player) else {
        return;
    };

    let mut contacts: Vec<(Entity, f64)> = Vec::new();
    {
        let mut query = world.query::<(&EnemyCombat, &Position, &Body, &Health, Option<&Boss>)>();
        for (entity, (combat, pos, body, health, boss)) in query.iter() {
            if health.hp <= 0.0 {
                continue;
            }
            if !geometry::circle_rect_overlap(*pos, body.radius, player_pos, half) {
                continue;
            }
            let raw = combat.damage * if boss.is_some() { BOSS_CONTACT_MULT } else { 1.0 };
            contacts.push((entity, raw));
        }
    }

    for (enemy, raw) in contacts {
        if !apply_player_hit(world, player, rng, events, stats, raw, now) {
            continue;
        }
        if stats.thorns > 0.0 && damage_enemy(world, enemy, stats.thorns) {
            deaths.push_back(enemy);
        }
    }
}

/// Enemy projectiles against the player's rectangle. A projectile is
/// consumed on contact even when the hit lands during invincibility.
fn resolve_enemy_projectiles(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    stats: &PlayerStats,
    now: f64,
) {
    let Some((player_pos, half)) = player_rect(world, player) else {
        return;
    };

    let mut hits: Vec<f64> = Vec::new();
    for (_, (pos, body, proj)) in world.query_mut::<(&Position, &Body, &mut Projectile)>() {
        if proj.faction != Faction::Enemy || proj.spent {
            continue;
        }
        if geometry::circle_rect_overlap(*pos, body.radius, player_pos, half) {
            proj.spent = true;
            hits.push(proj.damage);
        }
    }

    for raw in hits {
        apply_player_hit(world, player, rng, events, stats, raw, now);
    }
}

/// Route one raw hit through invincibility, dodge, and armor. Returns true
/// when the hit actually landed.
fn apply_player_hit(
    world: &mut World,
    player: Entity,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    stats: &PlayerStats,
    raw: f64,
    now: f64,
) -> bool {
    let invincible = world
        .get::<&Invincibility>(player)
        .map(|inv| now < inv.until)
        .unwrap_or(false);
    if invincible {
        return false;
    }
    if stats.dodge > 0.0 && rng.gen::<f64>() < stats.dodge {
        events.push(GameEvent::PlayerDodged);
        return false;
    }

    let damage = mitigated_damage(raw, stats.armor);
    match world.get::<&mut Health>(player) {
        Ok(mut health) if health.hp > 0.0 => {
            health.hp = (health.hp - damage).max(0.0);
        }
        _ => return false,
    }
    if let Ok(mut inv) = world.get::<&mut Invincibility>(player) {
        inv.until = now + INVINCIBILITY_SECS;
    }
    events.push(GameEvent::PlayerHit { damage });
    true
}

/// Player projectiles against enemies: direct hits, pierce bookkeeping,
/// chain cascade starts, explosive detonation, and grenade arrival.
fn resolve_player_projectiles(
    world: &mut World,
    player: Entity,
    stats: &PlayerStats,
    deaths: &mut VecDeque<Entity>,
    explosions: &mut VecDeque<PendingExplosion>,
) {
    let snapshot: Vec<EnemySnap> = {
        let mut query = world.query::<(&EnemyCombat, &Position, &Body, &Health)>();
        query
            .iter()
            .filter(|(_, (_, _, _, health))| health.hp > 0.0)
            .map(|(entity, (_, pos, body, _))| EnemySnap {
                entity,
                pos: *pos,
                radius: body.radius,
            })
            .collect()
    };

    let mut intents: Vec<HitIntent> = Vec::new();
    let mut chains: Vec<(Position, f64, u32, Entity)> = Vec::new();

    for (_, (pos, vel, body, proj, pierce, chain, explosive, grenade)) in world.query_mut::<(
        &Position,
        &Velocity,
        &Body,
        &mut Projectile,
        Option<&mut Pierce>,
        Option<&Chain>,
        Option<&Explosive>,
        Option<&Grenade>,
    )>() {
        if proj.faction != Faction::Player || proj.spent {
            continue;
        }

        // Arrived grenade: detonate in place instead of hitting anything.
        if let (Some(grenade), Some(explosive)) = (&grenade, &explosive) {
            if grenade.explode_on_expire {
                proj.spent = true;
                explosions.push_back(PendingExplosion {
                    center: *pos,
                    radius: explosive.radius * stats.explosion_radius_mult,
                    damage: proj.damage * stats.damage_mult,
                    style: explosive.style,
                });
                continue;
            }
        }

        let mut pierce = pierce;
        let dir = vel.0.normalize_or_zero();

        for snap in &snapshot {
            if let Some(p) = &pierce {
                if p.hit.contains(&snap.entity.to_bits().get()) {
                    continue;
                }
            }
            if !geometry::circles_overlap(*pos, body.radius, snap.pos, snap.radius) {
                continue;
            }

            if let Some(explosive) = &explosive {
                proj.spent = true;
                explosions.push_back(PendingExplosion {
                    center: *pos,
                    radius: explosive.radius * stats.explosion_radius_mult,
                    damage: proj.damage * stats.damage_mult,
                    style: explosive.style,
                });
                break;
            }

            let damage = proj.damage * stats.damage_mult;
            intents.push(HitIntent {
                enemy: snap.entity,
                damage,
                knockback: dir * KNOCKBACK_BASE * stats.knockback * proj.knockback_mult,
            });
            if let Some(chain) = &chain {
                chains.push((snap.pos, damage, chain.count, snap.entity));
            }

            match &mut pierce {
                Some(p) if p.remaining > 0 => {
                    p.remaining -= 1;
                    p.hit.push(snap.entity.to_bits().get());
                    // Budget left: keep scanning for more targets this tick.
                }
                _ => {
                    proj.spent = true;
                    break;
                }
            }
        }
    }

    // Chain cascades work off the same snapshot: nearest not-yet-chained
    // enemy within hop range, damage decaying per hop.
    for (start_pos, base_damage, count, first) in chains {
        let mut visited = vec![first.to_bits().get()];
        let mut link_pos = start_pos;
        let mut damage = base_damage;
        for _ in 0..count {
            let next = snapshot
                .iter()
                .filter(|s| !visited.contains(&s.entity.to_bits().get()))
                .map(|s| (s, link_pos.distance_to(&s.pos)))
                .filter(|(_, d)| *d <= CHAIN_RANGE)
                .min_by(|(_, a), (_, b)| a.total_cmp(b));
            let Some((snap, _)) = next else { break };
            damage *= CHAIN_FALLOFF;
            visited.push(snap.entity.to_bits().get());
            intents.push(HitIntent {
                enemy: snap.entity,
                damage,
                knockback: DVec2::ZERO,
            });
            link_pos = snap.pos;
        }
    }

    let mut dealt = 0.0;
    for intent in intents {
        dealt += intent.damage;
        if intent.knockback != DVec2::ZERO {
            if let Ok(mut pos) = world.get::<&mut Position>(intent.enemy) {
                pos.0 += intent.knockback;
            }
        }
        if damage_enemy(world, intent.enemy, intent.damage) {
            deaths.push_back(intent.enemy);
        }
    }

    if stats.lifesteal > 0.0 && dealt > 0.0 {
        if let Ok(mut health) = world.get::<&mut Health>(player) {
            if health.hp > 0.0 {
                health.hp = (health.hp + dealt * stats.lifesteal).min(health.max);
            }
        }
    }
}

/// Subtract HP, clamping at zero. Returns true exactly once per enemy: on
/// the tick its HP crosses from positive to zero.
pub(crate) fn damage_enemy(world: &mut World, enemy: Entity, amount: f64) -> bool {
    let Ok(mut health) = world.get::<&mut Health>(enemy) else {
        return false;
    };
    if health.hp <= 0.0 {
        return false;
    }
    health.hp = (health.hp - amount).max(0.0);
    health.hp <= 0.0
}

/// Drain the death and explosion worklists until both are empty. Each death
/// may queue an explosion (bombers) and each explosion may queue deaths.
#[allow(clippy::too_many_arguments)]
pub(crate) fn process_worklists(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    stats: &PlayerStats,
    now: f64,
    deaths: &mut VecDeque<Entity>,
    explosions: &mut VecDeque<PendingExplosion>,
) {
    loop {
        if let Some(enemy) = deaths.pop_front() {
            handle_death(world, rng, events, score, stats, now, enemy, explosions);
        } else if let Some(explosion) = explosions.pop_front() {
            resolve_explosion(world, rng, events, explosion, deaths);
        } else {
            break;
        }
    }
}

/// Death effects: event, score, drops, death explosion, splitting.
#[allow(clippy::too_many_arguments)]
fn handle_death(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
    stats: &PlayerStats,
    now: f64,
    enemy: Entity,
    explosions: &mut VecDeque<PendingExplosion>,
) {
    let Ok(combat) = world.get::<&EnemyCombat>(enemy).map(|c| *c) else {
        return;
    };
    let Ok(pos) = world.get::<&Position>(enemy).map(|p| *p) else {
        return;
    };
    let boss = world.get::<&Boss>(enemy).map(|b| *b).ok();
    let kind = world.get::<&EnemyKind>(enemy).map(|k| *k).ok();

    match (boss, kind) {
        (Some(boss), _) => events.push(GameEvent::BossDefeated {
            archetype: boss.archetype,
        }),
        (None, Some(kind)) => events.push(GameEvent::EnemyDied {
            archetype: kind.archetype,
        }),
        (None, None) => {}
    }
    score.kills += 1;
    score.award_xp(combat.xp * stats.xp_mult, events);

    if boss.is_some() {
        world_setup::spawn_pickup(world, pos, PickupKind::Gold, combat.gold as f64, now);
        let bags = rng.gen_range(6..=8);
        for _ in 0..bags {
            let offset = DVec2::new(
                rng.gen_range(-BOSS_GOLD_SCATTER..BOSS_GOLD_SCATTER),
                rng.gen_range(-BOSS_GOLD_SCATTER..BOSS_GOLD_SCATTER),
            );
            world_setup::spawn_pickup(
                world,
                Position(pos.0 + offset),
                PickupKind::Gold,
                BOSS_SMALL_BAG_VALUE as f64,
                now,
            );
        }
    } else {
        let offset = DVec2::new(rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0));
        world_setup::spawn_pickup(
            world,
            Position(pos.0 + offset),
            PickupKind::Gold,
            combat.gold as f64,
            now,
        );
    }

    let health_chance = HEALTH_DROP_BASE_CHANCE + stats.luck * HEALTH_DROP_LUCK_FACTOR;
    if rng.gen::<f64>() < health_chance {
        world_setup::spawn_pickup(world, pos, PickupKind::Health, HEALTH_PICKUP_VALUE, now);
    }

    if let Ok(bomb) = world.get::<&ExplodeOnDeath>(enemy).map(|b| *b) {
        explosions.push_back(PendingExplosion {
            center: pos,
            radius: bomb.radius,
            damage: bomb.damage,
            style: ExplosionStyle::Death,
        });
    }

    let split = world.get::<&SplitOnDeath>(enemy).map(|s| *s).ok();
    if let (Some(split), Some(kind)) = (split, kind) {
        let max_hp = world.get::<&Health>(enemy).map(|h| h.max).unwrap_or(0.0);
        for i in 0..split.count {
            let angle = TAU * i as f64 / split.count as f64;
            let spawn_pos = Position(pos.0 + DVec2::from_angle(angle) * 16.0);
            world_setup::spawn_split_enemy(
                world,
                kind.archetype,
                spawn_pos,
                max_hp * 0.4,
                combat.damage * 0.6,
            );
        }
    }
}

/// One area detonation: full damage to every enemy whose center lies within
/// the radius, no falloff. Banana blasts also scatter aimless mini shards.
fn resolve_explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    explosion: PendingExplosion,
    deaths: &mut VecDeque<Entity>,
) {
    events.push(GameEvent::Explosion {
        style: explosion.style,
    });

    let targets = registry::enemies_in_radius(world, explosion.center, explosion.radius);
    for (enemy, _) in targets {
        if damage_enemy(world, enemy, explosion.damage) {
            deaths.push_back(enemy);
        }
    }

    if explosion.style == ExplosionStyle::Banana {
        let base = rng.gen_range(0.0..TAU);
        for i in 0..BANANA_SHARD_COUNT {
            let angle = base + TAU * i as f64 / BANANA_SHARD_COUNT as f64;
            world_setup::spawn_shard(
                world,
                explosion.center,
                DVec2::from_angle(angle),
                explosion.damage * BANANA_SHARD_DAMAGE_FACTOR,
            );
        }
    }
}

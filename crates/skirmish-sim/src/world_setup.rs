//! Entity spawn factories translating the static configuration tables into
//! component bundles.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enemies;
use skirmish_core::enums::*;
use skirmish_core::stats::PlayerStats;
use skirmish_core::types::{Position, Velocity};
use skirmish_core::weapons::{self, Loadout, WeaponInstance};

/// Spawn the player at the arena center with default stats and no weapons.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        PlayerTag,
        Position::new(0.0, 0.0),
        Velocity::default(),
        RectBody {
            half_width: PLAYER_HALF_WIDTH,
            half_height: PLAYER_HALF_HEIGHT,
        },
        Health {
            hp: PLAYER_MAX_HP,
            max: PLAYER_MAX_HP,
        },
        PlayerStats::default(),
        Loadout::default(),
        Invincibility::default(),
    ))
}

/// A random position just outside the arena edge.
fn edge_position(rng: &mut ChaCha8Rng) -> Position {
    let w = ARENA_HALF_WIDTH + ENEMY_SPAWN_MARGIN;
    let h = ARENA_HALF_HEIGHT + ENEMY_SPAWN_MARGIN;
    match rng.gen_range(0..4u8) {
        0 => Position::new(rng.gen_range(-w..w), -h),
        1 => Position::new(rng.gen_range(-w..w), h),
        2 => Position::new(-w, rng.gen_range(-h..h)),
        _ => Position::new(w, rng.gen_range(-h..h)),
    }
}

/// Spawn a regular enemy at a random arena edge, scaled for the wave.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    archetype: EnemyArchetype,
    wave: u32,
) -> Entity {
    let position = edge_position(rng);
    spawn_enemy_at(world, archetype, position, wave)
}

/// Spawn a regular enemy at an explicit position, scaled for the wave.
pub fn spawn_enemy_at(
    world: &mut World,
    archetype: EnemyArchetype,
    position: Position,
    wave: u32,
) -> Entity {
    let cfg = enemies::config(archetype);
    let scale = enemies::wave_scale(wave);

    let entity = world.spawn((
        Enemy,
        EnemyKind { archetype },
        position,
        Velocity::default(),
        Body { radius: cfg.radius },
        Health {
            hp: cfg.hp * scale,
            max: cfg.hp * scale,
        },
        EnemyCombat {
            damage: cfg.damage * scale,
            speed: cfg.speed,
            xp: cfg.xp,
            gold: cfg.gold,
        },
    ));

    if cfg.phasing {
        let _ = world.insert_one(entity, Phasing);
    }
    if let Some((radius, damage)) = cfg.explode_on_death {
        let _ = world.insert_one(
            entity,
            ExplodeOnDeath {
                radius,
                damage: damage * scale,
            },
        );
    }
    if cfg.split_count > 0 {
        let _ = world.insert_one(
            entity,
            SplitOnDeath {
                count: cfg.split_count,
            },
        );
    }
    entity
}

/// Spawn a smaller copy of a splitting enemy at the parent's death point.
/// Splits never split again.
pub fn spawn_split_enemy(
    world: &mut World,
    archetype: EnemyArchetype,
    position: Position,
    hp: f64,
    damage: f64,
) -> Entity {
    let cfg = enemies::config(archetype);
    world.spawn((
        Enemy,
        EnemyKind { archetype },
        position,
        Velocity::default(),
        Body {
            radius: cfg.radius * 0.6,
        },
        Health { hp, max: hp },
        EnemyCombat {
            damage,
            speed: cfg.speed * 1.2,
            xp: cfg.xp * 0.5,
            gold: 1,
        },
    ))
}

/// Spawn a boss at a random arena edge. Boss HP/damage compound the
/// cycle-linear factors with the shared exponential wave curve.
pub fn spawn_boss(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    archetype: BossArchetype,
    wave: u32,
    cycle: u32,
    now: f64,
) -> Entity {
    let cfg = enemies::boss_config(archetype);
    let scale = enemies::wave_scale(wave);
    let hp = cfg.hp * enemies::boss_hp_mult(cycle) * scale;
    let damage = cfg.damage * enemies::boss_damage_mult(cycle) * scale;

    let entity = world.spawn((
        Enemy,
        edge_position(rng),
        Velocity::default(),
        Body { radius: cfg.radius },
        Health { hp, max: hp },
        EnemyCombat {
            damage,
            speed: cfg.speed,
            xp: cfg.xp,
            gold: cfg.gold,
        },
        Boss { archetype, cycle },
    ));

    if let Some((fire_interval, projectile_damage)) = cfg.ranged {
        let _ = world.insert_one(
            entity,
            RangedAttacker {
                fire_interval,
                last_fired: now,
                projectile_damage: projectile_damage * enemies::boss_damage_mult(cycle) * scale,
            },
        );
    }
    entity
}

/// Spawn one player projectile. `damage` already includes any crit roll;
/// the player's damage multiplier is applied at hit time.
pub fn spawn_projectile(
    world: &mut World,
    weapon: &WeaponInstance,
    stats: &PlayerStats,
    origin: Position,
    dir: DVec2,
    damage: f64,
) -> Entity {
    let cfg = weapons::config(weapon.kind);

    let entity = world.spawn((
        origin,
        Velocity(dir * cfg.speed),
        Body { radius: cfg.radius },
        Projectile {
            faction: Faction::Player,
            damage,
            knockback_mult: cfg.knockback_mult,
            style: cfg.style,
            base_speed: cfg.speed,
            travelled: 0.0,
            max_distance: cfg.max_distance,
            spent: false,
        },
    ));

    let pierce_total = cfg.pierce + stats.extra_pierce;
    if pierce_total > 0 {
        let _ = world.insert_one(
            entity,
            Pierce {
                remaining: pierce_total,
                hit: Vec::new(),
            },
        );
    }
    if cfg.chain > 0 {
        let _ = world.insert_one(entity, Chain { count: cfg.chain });
    }
    if let Some(style) = cfg.explosion_style {
        let _ = world.insert_one(
            entity,
            Explosive {
                radius: weapon.blast_radius(),
                style,
            },
        );
    }
    if cfg.category == WeaponCategory::Grenade {
        let _ = world.insert_one(
            entity,
            Grenade {
                range: cfg.grenade_range,
                explode_on_expire: false,
            },
        );
    }
    entity
}

/// Spawn one aimed mini shard from a banana detonation.
pub fn spawn_shard(world: &mut World, origin: Position, dir: DVec2, damage: f64) -> Entity {
    world.spawn((
        origin,
        Velocity(dir * BANANA_SHARD_SPEED),
        Body { radius: 3.0 },
        Projectile {
            faction: Faction::Player,
            damage,
            knockback_mult: 0.3,
            style: ProjectileStyle::Shard,
            base_speed: BANANA_SHARD_SPEED,
            travelled: 0.0,
            max_distance: Some(BANANA_SHARD_MAX_DISTANCE),
            spent: false,
        },
    ))
}

/// Spawn a boss ranged projectile aimed at the player.
pub fn spawn_enemy_projectile(
    world: &mut World,
    origin: Position,
    dir: DVec2,
    damage: f64,
) -> Entity {
    world.spawn((
        origin,
        Velocity(dir * BOSS_PROJECTILE_SPEED),
        Body {
            radius: BOSS_PROJECTILE_RADIUS,
        },
        Projectile {
            faction: Faction::Enemy,
            damage,
            knockback_mult: 0.0,
            style: ProjectileStyle::Bolt,
            base_speed: BOSS_PROJECTILE_SPEED,
            travelled: 0.0,
            max_distance: None,
            spent: false,
        },
    ))
}

/// Place an unarmed mine at the firing position. Bypasses projectile
/// creation entirely; arms after the configured delay.
pub fn spawn_mine(world: &mut World, weapon: &WeaponInstance, origin: Position, now: f64) -> Entity {
    let cfg = weapons::config(weapon.kind);
    world.spawn((
        origin,
        Body { radius: cfg.radius },
        Mine {
            armed_at: now + MINE_ARM_DELAY,
            armed: false,
            trigger_radius: MINE_TRIGGER_RADIUS,
            damage: weapon.damage(),
            blast_radius: weapon.blast_radius(),
            detonated: false,
        },
    ))
}

/// Drop a pickup with the standard lifetime.
pub fn spawn_pickup(
    world: &mut World,
    position: Position,
    kind: PickupKind,
    value: f64,
    now: f64,
) -> Entity {
    world.spawn((
        position,
        Pickup {
            kind,
            value,
            expires_at: Some(now + PICKUP_LIFETIME),
            attracted: false,
            collected: false,
            expired: false,
        },
    ))
}

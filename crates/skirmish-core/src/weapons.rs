//! Static weapon configuration table and per-instance runtime state.

use serde::{Deserialize, Serialize};

use crate::enums::{ExplosionStyle, ProjectileStyle, WeaponCategory, WeaponKind};

/// Static configuration for a weapon type. One entry per [`WeaponKind`];
/// the table is closed and exhaustive by construction.
#[derive(Debug, Clone, Copy)]
pub struct WeaponConfig {
    pub category: WeaponCategory,
    /// Level-1 damage per projectile.
    pub damage: f64,
    /// Geometric per-level damage growth.
    pub damage_per_level: f64,
    /// Level-1 seconds between shots.
    pub fire_interval: f64,
    /// Geometric per-level fire-rate growth (interval divisor).
    pub attack_speed_per_level: f64,
    /// Projectiles per trigger pull before bonuses.
    pub bullet_count: u32,
    /// Spread arc in radians. With one bullet, a single uniform random
    /// offset within ±half the arc; with more, an even fan across it.
    pub spread: f64,
    /// Projectile flight speed (units/s).
    pub speed: f64,
    /// Projectile collision radius.
    pub radius: f64,
    /// Travel limit for short-range weapons.
    pub max_distance: Option<f64>,
    /// Enemies a projectile may damage before being consumed (0 = one hit).
    pub pierce: u32,
    /// Chain-lightning links on hit.
    pub chain: u32,
    /// Level-1 detonation radius (0 = not explosive).
    pub blast_radius: f64,
    /// Geometric per-level blast growth.
    pub blast_per_level: f64,
    /// Grenade category only: travel distance at which it force-detonates.
    pub grenade_range: f64,
    pub knockback_mult: f64,
    /// Auto-aim targeting range before the attack-range multiplier.
    pub range: f64,
    pub style: ProjectileStyle,
    pub explosion_style: Option<ExplosionStyle>,
}

const PISTOL: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Standard,
    damage: 10.0,
    damage_per_level: 1.15,
    fire_interval: 0.5,
    attack_speed_per_level: 1.1,
    bullet_count: 1,
    spread: 0.0,
    speed: 500.0,
    radius: 4.0,
    max_distance: None,
    pierce: 0,
    chain: 0,
    blast_radius: 0.0,
    blast_per_level: 1.0,
    grenade_range: 0.0,
    knockback_mult: 1.0,
    range: 420.0,
    style: ProjectileStyle::Bullet,
    explosion_style: None,
};

const SHOTGUN: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Standard,
    damage: 6.0,
    damage_per_level: 1.15,
    fire_interval: 0.9,
    attack_speed_per_level: 1.08,
    bullet_count: 5,
    spread: 0.5,
    speed: 420.0,
    radius: 3.0,
    max_distance: Some(180.0),
    pierce: 0,
    chain: 0,
    blast_radius: 0.0,
    blast_per_level: 1.0,
    grenade_range: 0.0,
    knockback_mult: 1.4,
    range: 200.0,
    style: ProjectileStyle::Pellet,
    explosion_style: None,
};

const SMG: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Standard,
    damage: 4.0,
    damage_per_level: 1.12,
    fire_interval: 0.12,
    attack_speed_per_level: 1.08,
    bullet_count: 1,
    spread: 0.15,
    speed: 520.0,
    radius: 3.0,
    max_distance: None,
    pierce: 0,
    chain: 0,
    blast_radius: 0.0,
    blast_per_level: 1.0,
    grenade_range: 0.0,
    knockback_mult: 0.5,
    range: 380.0,
    style: ProjectileStyle::Bullet,
    explosion_style: None,
};

const RAILGUN: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Standard,
    damage: 18.0,
    damage_per_level: 1.18,
    fire_interval: 1.4,
    attack_speed_per_level: 1.1,
    bullet_count: 1,
    spread: 0.0,
    speed: 700.0,
    radius: 5.0,
    max_distance: None,
    pierce: 3,
    chain: 0,
    blast_radius: 0.0,
    blast_per_level: 1.0,
    grenade_range: 0.0,
    knockback_mult: 1.2,
    range: 520.0,
    style: ProjectileStyle::Beam,
    explosion_style: None,
};

const ARC: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Standard,
    damage: 8.0,
    damage_per_level: 1.15,
    fire_interval: 1.0,
    attack_speed_per_level: 1.1,
    bullet_count: 1,
    spread: 0.0,
    speed: 480.0,
    radius: 4.0,
    max_distance: None,
    pierce: 0,
    chain: 3,
    blast_radius: 0.0,
    blast_per_level: 1.0,
    grenade_range: 0.0,
    knockback_mult: 0.6,
    range: 400.0,
    style: ProjectileStyle::Spark,
    explosion_style: None,
};

const ROCKET: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Standard,
    damage: 14.0,
    damage_per_level: 1.16,
    fire_interval: 1.6,
    attack_speed_per_level: 1.1,
    bullet_count: 1,
    spread: 0.0,
    speed: 360.0,
    radius: 6.0,
    max_distance: None,
    pierce: 0,
    chain: 0,
    blast_radius: 70.0,
    blast_per_level: 1.08,
    grenade_range: 0.0,
    knockback_mult: 1.5,
    range: 450.0,
    style: ProjectileStyle::Rocket,
    explosion_style: Some(ExplosionStyle::Standard),
};

const HOLY_GRENADE: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Grenade,
    damage: 20.0,
    damage_per_level: 1.16,
    fire_interval: 2.2,
    attack_speed_per_level: 1.08,
    bullet_count: 1,
    spread: 0.0,
    speed: 300.0,
    radius: 7.0,
    max_distance: None,
    pierce: 0,
    chain: 0,
    blast_radius: 90.0,
    blast_per_level: 1.08,
    grenade_range: 260.0,
    knockback_mult: 1.2,
    range: 300.0,
    style: ProjectileStyle::Grenade,
    explosion_style: Some(ExplosionStyle::Holy),
};

const BANANA: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Grenade,
    damage: 12.0,
    damage_per_level: 1.15,
    fire_interval: 1.5,
    attack_speed_per_level: 1.08,
    bullet_count: 1,
    spread: 0.3,
    speed: 340.0,
    radius: 6.0,
    max_distance: None,
    pierce: 0,
    chain: 0,
    blast_radius: 60.0,
    blast_per_level: 1.08,
    grenade_range: 220.0,
    knockback_mult: 1.0,
    range: 260.0,
    style: ProjectileStyle::Banana,
    explosion_style: Some(ExplosionStyle::Banana),
};

const MINE_LAYER: WeaponConfig = WeaponConfig {
    category: WeaponCategory::Mine,
    damage: 25.0,
    damage_per_level: 1.18,
    fire_interval: 2.0,
    attack_speed_per_level: 1.08,
    bullet_count: 1,
    spread: 0.0,
    speed: 0.0,
    radius: 8.0,
    max_distance: None,
    pierce: 0,
    chain: 0,
    blast_radius: 80.0,
    blast_per_level: 1.08,
    grenade_range: 0.0,
    knockback_mult: 1.0,
    range: 0.0,
    style: ProjectileStyle::Bullet,
    explosion_style: Some(ExplosionStyle::MineBlast),
};

/// Look up the static configuration for a weapon type.
pub fn config(kind: WeaponKind) -> &'static WeaponConfig {
    match kind {
        WeaponKind::Pistol => &PISTOL,
        WeaponKind::Shotgun => &SHOTGUN,
        WeaponKind::Smg => &SMG,
        WeaponKind::Railgun => &RAILGUN,
        WeaponKind::Arc => &ARC,
        WeaponKind::Rocket => &ROCKET,
        WeaponKind::HolyGrenade => &HOLY_GRENADE,
        WeaponKind::Banana => &BANANA,
        WeaponKind::MineLayer => &MINE_LAYER,
    }
}

/// A held weapon: static config identity plus runtime upgrade and cooldown
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponInstance {
    pub kind: WeaponKind,
    pub level: u32,
    /// Time of the last shot. Initialized one interval in the past so a
    /// freshly acquired weapon can fire immediately (offset permitting).
    pub last_fired: f64,
    /// One-shot stagger for additional copies of the same weapon type.
    /// Cleared on the first shot so copies converge to identical timing.
    pub fire_offset: f64,
    /// Bonus projectiles granted by items to this instance.
    pub extra_projectiles: u32,
}

impl WeaponInstance {
    pub fn new(kind: WeaponKind, now: f64, fire_offset: f64) -> Self {
        Self {
            kind,
            level: 1,
            last_fired: now - config(kind).fire_interval,
            fire_offset,
            extra_projectiles: 0,
        }
    }

    /// Current per-projectile damage: `base * damage_per_level^(level-1)`.
    pub fn damage(&self) -> f64 {
        let cfg = config(self.kind);
        cfg.damage * cfg.damage_per_level.powi(self.level as i32 - 1)
    }

    /// Current fire interval before the player's attack-speed multiplier:
    /// `base / attack_speed_per_level^(level-1)`.
    pub fn fire_interval(&self) -> f64 {
        let cfg = config(self.kind);
        cfg.fire_interval / cfg.attack_speed_per_level.powi(self.level as i32 - 1)
    }

    /// Effective interval under the player's attack-speed multiplier.
    /// Always > 0 for any positive multiplier.
    pub fn effective_interval(&self, attack_speed_mult: f64) -> f64 {
        self.fire_interval() / attack_speed_mult.max(f64::EPSILON)
    }

    /// Current detonation radius for explosive weapons.
    pub fn blast_radius(&self) -> f64 {
        let cfg = config(self.kind);
        cfg.blast_radius * cfg.blast_per_level.powi(self.level as i32 - 1)
    }

    /// Ready to fire? The one-shot offset delays only the first shot.
    pub fn can_fire(&self, now: f64, attack_speed_mult: f64) -> bool {
        now - self.last_fired >= self.effective_interval(attack_speed_mult) + self.fire_offset
    }

    /// Record a shot: clear the stagger offset and restart the cooldown from
    /// now, so a changed attack-speed multiplier is reflected immediately.
    pub fn mark_fired(&mut self, now: f64) {
        self.fire_offset = 0.0;
        self.last_fired = now;
    }

    pub fn upgrade(&mut self) {
        self.level += 1;
    }
}

/// The player's weapon slots and acquired item ids. ECS component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub weapons: Vec<WeaponInstance>,
    pub items: Vec<u32>,
}

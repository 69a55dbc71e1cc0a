//! Enumeration types used throughout the simulation.
//!
//! All tag sets are closed: behavior dispatch is an exhaustive `match`,
//! so an unknown tag is a compile error rather than a runtime condition.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run in progress.
    #[default]
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Which side a projectile belongs to, determining what it can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Player weapon types. Each kind has a static `WeaponConfig` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Smg,
    /// Piercing rail shot.
    Railgun,
    /// Chain-lightning caster.
    Arc,
    /// Explosive on impact.
    Rocket,
    /// Grenade category: decelerates, then detonates at range.
    HolyGrenade,
    /// Grenade category: detonation spawns aimed mini shards.
    Banana,
    /// Deployable category: places armed-after-delay mines.
    MineLayer,
}

/// Weapon delivery category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponCategory {
    /// Straight-flying projectile.
    Standard,
    /// Decelerates near its configured range and force-detonates.
    Grenade,
    /// Static deployable, armed after a delay.
    Mine,
}

/// Regular enemy archetypes, listed in wave-unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyArchetype {
    Walker,
    Runner,
    /// Splits into smaller slimes on death.
    Slime,
    Spider,
    /// Explodes on death.
    Bomber,
    /// Phasing (visual transparency only; collision unaffected).
    Ghost,
    Wisp,
    Brute,
    Tank,
    Golem,
}

/// Boss archetypes, cycled deterministically every boss wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossArchetype {
    Behemoth,
    Warlock,
    Abomination,
    Reaver,
    Colossus,
    Hivemind,
}

impl BossArchetype {
    /// The boss for the given 1-based cycle index, wrapping after six.
    pub fn from_cycle(cycle: u32) -> Self {
        match (cycle.saturating_sub(1)) % 6 {
            0 => BossArchetype::Behemoth,
            1 => BossArchetype::Warlock,
            2 => BossArchetype::Abomination,
            3 => BossArchetype::Reaver,
            4 => BossArchetype::Colossus,
            _ => BossArchetype::Hivemind,
        }
    }
}

/// Visual tag for projectiles. The renderer maps these to sprites/colors;
/// the simulation never interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileStyle {
    Bullet,
    Pellet,
    Beam,
    Spark,
    Rocket,
    Grenade,
    Banana,
    Shard,
    /// Enemy (boss) shot.
    Bolt,
}

/// Visual tag carried by explosion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionStyle {
    Standard,
    Holy,
    Banana,
    MineBlast,
    /// Enemy death explosion.
    Death,
}

/// Pickup variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Gold,
    Health,
}

/// Named player stats, for the additive stat-mutation contract exposed
/// to the shop/item layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Damage,
    AttackSpeed,
    CritChance,
    CritDamage,
    Lifesteal,
    Knockback,
    ExplosionRadius,
    ExtraProjectiles,
    ExtraPierce,
    AttackRange,
    Armor,
    Dodge,
    Thorns,
    Regen,
    Luck,
    XpGain,
    GoldGain,
    MoveSpeed,
    PickupRange,
    MaxHp,
}

//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//!
//! Removal is deferred: systems mark entities dead/spent/collected here and
//! the cleanup system despawns them at the end of the tick, so no collection
//! is mutated while another system iterates it.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTag;

/// Current and maximum hit points. `hp <= 0` marks the entity dead;
/// systems clamp at zero, never below.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: f64,
    pub max: f64,
}

/// Circular collision body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub radius: f64,
}

/// Rectangular collision body (player only).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RectBody {
    pub half_width: f64,
    pub half_height: f64,
}

/// Timestamp until which the player ignores damage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Invincibility {
    pub until: f64,
}

/// Marks an enemy (regular or boss).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Regular enemy archetype tag. Bosses carry [`Boss`] instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyKind {
    pub archetype: EnemyArchetype,
}

/// Enemy combat numbers, already scaled for the wave it spawned on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyCombat {
    /// Contact damage dealt to the player.
    pub damage: f64,
    /// Movement speed (units/s).
    pub speed: f64,
    /// XP awarded on death, before the player's XP multiplier.
    pub xp: f64,
    /// Gold bag value dropped on death.
    pub gold: u32,
}

/// Marks a boss enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Boss {
    pub archetype: BossArchetype,
    /// 1-based boss cycle index at spawn time.
    pub cycle: u32,
}

/// Boss ranged attack state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangedAttacker {
    pub fire_interval: f64,
    pub last_fired: f64,
    pub projectile_damage: f64,
}

/// Visual-only transparency flag. Does not affect collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Phasing;

/// Enemy detonates on death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplodeOnDeath {
    pub radius: f64,
    pub damage: f64,
}

/// Enemy splits into smaller copies on death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitOnDeath {
    pub count: u32,
}

/// A projectile in flight. Crit is baked into `damage` at fire time;
/// the player's damage multiplier is applied at hit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub faction: Faction,
    pub damage: f64,
    pub knockback_mult: f64,
    pub style: ProjectileStyle,
    /// Base flight speed; grenades rescale velocity from this.
    pub base_speed: f64,
    /// Distance accumulated since spawn.
    pub travelled: f64,
    /// Short-range weapons expire past this travel distance.
    pub max_distance: Option<f64>,
    /// Consumed or expired; despawned by cleanup.
    pub spent: bool,
}

/// Pierce budget. The hit list stores `hecs::Entity::to_bits` values so this
/// projectile never damages the same enemy twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pierce {
    pub remaining: u32,
    pub hit: Vec<u64>,
}

/// Chain-lightning cascade, triggered on any hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Chain {
    pub count: u32,
}

/// Area detonation replacing direct single-target damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosive {
    pub radius: f64,
    pub style: ExplosionStyle,
}

/// Grenade-category flight: decelerates over the final 30% of `range`,
/// then detonates at the expiry check instead of flying past.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Grenade {
    pub range: f64,
    pub explode_on_expire: bool,
}

/// A deployed mine. Never translates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mine {
    /// Time at which the mine becomes live.
    pub armed_at: f64,
    pub armed: bool,
    pub trigger_radius: f64,
    pub damage: f64,
    pub blast_radius: f64,
    /// One-shot: set on first armed contact, despawned by cleanup.
    pub detonated: bool,
}

/// A gold or health pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub value: f64,
    /// Despawn deadline; gold and health expire, others would not.
    pub expires_at: Option<f64>,
    /// Locked into homing toward the player until collected.
    pub attracted: bool,
    pub collected: bool,
    pub expired: bool,
}

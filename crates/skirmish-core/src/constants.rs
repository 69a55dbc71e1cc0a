//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Play field half-width (units, origin at center).
pub const ARENA_HALF_WIDTH: f64 = 640.0;

/// Play field half-height.
pub const ARENA_HALF_HEIGHT: f64 = 360.0;

/// Margin beyond the arena bounds before a projectile expires.
pub const PROJECTILE_BOUNDS_MARGIN: f64 = 50.0;

/// Distance outside the arena edge at which enemies spawn.
pub const ENEMY_SPAWN_MARGIN: f64 = 40.0;

// --- Player ---

/// Starting and default maximum HP.
pub const PLAYER_MAX_HP: f64 = 100.0;

/// Player rectangular collision half-extents.
pub const PLAYER_HALF_WIDTH: f64 = 12.0;
pub const PLAYER_HALF_HEIGHT: f64 = 16.0;

/// Base movement speed (units/s) before the move-speed multiplier.
pub const PLAYER_BASE_SPEED: f64 = 180.0;

/// Default pickup attraction range.
pub const PLAYER_PICKUP_RANGE: f64 = 80.0;

/// Invincibility window after a non-dodged hit (seconds).
pub const INVINCIBILITY_SECS: f64 = 0.5;

/// Maximum simultaneously-held weapons.
pub const MAX_WEAPONS: usize = 6;

// --- Damage model ---

/// Armor diminishing-returns constant: mitigation = armor / (armor + K).
/// Canonical choice between the two legacy constants (see DESIGN.md).
pub const ARMOR_K: f64 = 100.0;

/// Boss contact damage multiplier, applied before mitigation.
pub const BOSS_CONTACT_MULT: f64 = 1.5;

/// Knockback displacement per point of knockback strength (units).
pub const KNOCKBACK_BASE: f64 = 8.0;

// --- Chain lightning ---

/// Maximum hop distance between chain links.
pub const CHAIN_RANGE: f64 = 150.0;

/// Damage retained per hop.
pub const CHAIN_FALLOFF: f64 = 0.8;

// --- Mines ---

/// Delay before a placed mine becomes armed (seconds).
pub const MINE_ARM_DELAY: f64 = 0.5;

/// Radius within which an armed mine triggers on enemy contact.
pub const MINE_TRIGGER_RADIUS: f64 = 40.0;

// --- Pickups ---

/// Lifetime of gold and health pickups before despawn (seconds).
pub const PICKUP_LIFETIME: f64 = 12.0;

/// Final window during which a despawning pickup shrinks (seconds).
pub const PICKUP_SHRINK_SECS: f64 = 1.0;

/// Distance at which a pickup is collected.
pub const PICKUP_COLLECT_RADIUS: f64 = 14.0;

/// Homing speed of an attracted pickup (units/s).
pub const PICKUP_MAGNET_SPEED: f64 = 320.0;

/// Base chance for a health pickup on enemy death.
pub const HEALTH_DROP_BASE_CHANCE: f64 = 0.05;

/// Additional health drop chance per point of luck.
pub const HEALTH_DROP_LUCK_FACTOR: f64 = 0.05;

/// HP restored by a health pickup.
pub const HEALTH_PICKUP_VALUE: f64 = 20.0;

/// Scatter radius for the small gold bags a boss drops.
pub const BOSS_GOLD_SCATTER: f64 = 60.0;

/// Value of each scattered small boss gold bag.
pub const BOSS_SMALL_BAG_VALUE: u32 = 5;

// --- Waves ---

/// Wave duration by wave number: 25s for waves <= 2, 35s for <= 4, 40s after.
pub const WAVE_DURATION_EARLY: f64 = 25.0;
pub const WAVE_DURATION_MID: f64 = 35.0;
pub const WAVE_DURATION_LATE: f64 = 40.0;

/// Spawn cadence: interval = max(MIN, BASE - wave * STEP) seconds.
pub const SPAWN_INTERVAL_BASE: f64 = 1.0;
pub const SPAWN_INTERVAL_STEP: f64 = 0.05;
pub const SPAWN_INTERVAL_MIN: f64 = 0.4;

/// Spawn volume: enemies per spawn = min(MAX, 1 + floor(wave * FACTOR)).
pub const ENEMIES_PER_SPAWN_MAX: u32 = 4;
pub const ENEMIES_PER_SPAWN_FACTOR: f64 = 0.4;

/// Regular enemy HP/damage scale by SCALE_FACTOR^(wave - SCALE_BASE_WAVE)
/// from SCALE_BASE_WAVE onward.
pub const ENEMY_SCALE_BASE_WAVE: u32 = 5;
pub const ENEMY_SCALE_FACTOR: f64 = 1.04;

// --- Bosses ---

/// A boss wave occurs every this many waves.
pub const BOSS_WAVE_INTERVAL: u32 = 3;

/// The boss spawns only once the wave timer has at most this long left.
pub const BOSS_GATE_REMAINING_SECS: f64 = 20.0;

/// Per-cycle boss scaling: hp *= 1 + (cycle-1) * HP, dmg *= 1 + (cycle-1) * DMG.
/// Applied multiplicatively with the shared exponential enemy curve.
pub const BOSS_HP_PER_CYCLE: f64 = 0.5;
pub const BOSS_DMG_PER_CYCLE: f64 = 0.25;

/// Boss ranged projectile speed (units/s).
pub const BOSS_PROJECTILE_SPEED: f64 = 220.0;

/// Boss ranged projectile radius.
pub const BOSS_PROJECTILE_RADIUS: f64 = 6.0;

// --- Banana detonation ---

/// Mini shards spawned by a banana detonation.
pub const BANANA_SHARD_COUNT: u32 = 5;

/// Shard damage as a fraction of the banana's damage.
pub const BANANA_SHARD_DAMAGE_FACTOR: f64 = 0.4;

/// Shard flight speed and travel limit.
pub const BANANA_SHARD_SPEED: f64 = 380.0;
pub const BANANA_SHARD_MAX_DISTANCE: f64 = 120.0;

// --- Progression ---

/// XP required to advance from `level` to `level + 1`.
pub fn xp_to_next(level: u32) -> f64 {
    10.0 + 5.0 * level as f64
}

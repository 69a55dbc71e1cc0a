//! Static enemy/boss configuration and the wave scaling formulas.

use crate::constants::*;
use crate::enums::{BossArchetype, EnemyArchetype};

/// Static configuration for a regular enemy archetype.
#[derive(Debug, Clone, Copy)]
pub struct EnemyConfig {
    pub radius: f64,
    pub hp: f64,
    /// Contact damage before wave scaling.
    pub damage: f64,
    pub speed: f64,
    pub xp: f64,
    pub gold: u32,
    pub phasing: bool,
    /// (radius, damage) of the death explosion, if any.
    pub explode_on_death: Option<(f64, f64)>,
    /// Smaller copies spawned on death (0 = none).
    pub split_count: u32,
}

const WALKER: EnemyConfig = EnemyConfig {
    radius: 10.0,
    hp: 20.0,
    damage: 8.0,
    speed: 60.0,
    xp: 1.0,
    gold: 1,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

const RUNNER: EnemyConfig = EnemyConfig {
    radius: 8.0,
    hp: 12.0,
    damage: 6.0,
    speed: 110.0,
    xp: 1.0,
    gold: 1,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

const SLIME: EnemyConfig = EnemyConfig {
    radius: 12.0,
    hp: 26.0,
    damage: 8.0,
    speed: 50.0,
    xp: 2.0,
    gold: 2,
    phasing: false,
    explode_on_death: None,
    split_count: 2,
};

const SPIDER: EnemyConfig = EnemyConfig {
    radius: 7.0,
    hp: 10.0,
    damage: 5.0,
    speed: 130.0,
    xp: 1.0,
    gold: 1,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

const BOMBER: EnemyConfig = EnemyConfig {
    radius: 10.0,
    hp: 18.0,
    damage: 6.0,
    speed: 70.0,
    xp: 2.0,
    gold: 2,
    phasing: false,
    explode_on_death: Some((60.0, 15.0)),
    split_count: 0,
};

const GHOST: EnemyConfig = EnemyConfig {
    radius: 9.0,
    hp: 16.0,
    damage: 10.0,
    speed: 80.0,
    xp: 2.0,
    gold: 2,
    phasing: true,
    explode_on_death: None,
    split_count: 0,
};

const WISP: EnemyConfig = EnemyConfig {
    radius: 6.0,
    hp: 8.0,
    damage: 4.0,
    speed: 150.0,
    xp: 1.0,
    gold: 1,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

const BRUTE: EnemyConfig = EnemyConfig {
    radius: 14.0,
    hp: 45.0,
    damage: 14.0,
    speed: 45.0,
    xp: 3.0,
    gold: 3,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

const TANK: EnemyConfig = EnemyConfig {
    radius: 16.0,
    hp: 70.0,
    damage: 12.0,
    speed: 35.0,
    xp: 4.0,
    gold: 4,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

const GOLEM: EnemyConfig = EnemyConfig {
    radius: 18.0,
    hp: 110.0,
    damage: 18.0,
    speed: 30.0,
    xp: 6.0,
    gold: 6,
    phasing: false,
    explode_on_death: None,
    split_count: 0,
};

/// Look up the static configuration for a regular archetype.
pub fn config(archetype: EnemyArchetype) -> &'static EnemyConfig {
    match archetype {
        EnemyArchetype::Walker => &WALKER,
        EnemyArchetype::Runner => &RUNNER,
        EnemyArchetype::Slime => &SLIME,
        EnemyArchetype::Spider => &SPIDER,
        EnemyArchetype::Bomber => &BOMBER,
        EnemyArchetype::Ghost => &GHOST,
        EnemyArchetype::Wisp => &WISP,
        EnemyArchetype::Brute => &BRUTE,
        EnemyArchetype::Tank => &TANK,
        EnemyArchetype::Golem => &GOLEM,
    }
}

/// All regular archetypes in wave-unlock order, with their relative
/// spawn weights. Wave N draws from the first `min(N, 10)` entries.
pub const SPAWN_TABLE: [(EnemyArchetype, u32); 10] = [
    (EnemyArchetype::Walker, 25),
    (EnemyArchetype::Runner, 15),
    (EnemyArchetype::Slime, 12),
    (EnemyArchetype::Spider, 10),
    (EnemyArchetype::Bomber, 8),
    (EnemyArchetype::Ghost, 8),
    (EnemyArchetype::Wisp, 7),
    (EnemyArchetype::Brute, 6),
    (EnemyArchetype::Tank, 5),
    (EnemyArchetype::Golem, 4),
];

/// Pick an archetype from the cumulative-probability table for the given
/// wave. `roll` is uniform in [0, 1). One archetype unlocks per wave; the
/// distribution is fixed from wave 10 onward.
pub fn archetype_for_roll(wave: u32, roll: f64) -> EnemyArchetype {
    let unlocked = (wave.max(1) as usize).min(SPAWN_TABLE.len());
    let total: u32 = SPAWN_TABLE[..unlocked].iter().map(|(_, w)| w).sum();
    let mut threshold = roll * total as f64;
    for &(archetype, weight) in &SPAWN_TABLE[..unlocked] {
        threshold -= weight as f64;
        if threshold < 0.0 {
            return archetype;
        }
    }
    SPAWN_TABLE[unlocked - 1].0
}

/// Static configuration for a boss archetype.
#[derive(Debug, Clone, Copy)]
pub struct BossConfig {
    pub radius: f64,
    pub hp: f64,
    pub damage: f64,
    pub speed: f64,
    pub xp: f64,
    /// Value of the single large gold bag.
    pub gold: u32,
    /// (fire interval secs, projectile damage) for shooting bosses.
    pub ranged: Option<(f64, f64)>,
}

const BEHEMOTH: BossConfig = BossConfig {
    radius: 36.0,
    hp: 600.0,
    damage: 25.0,
    speed: 40.0,
    xp: 50.0,
    gold: 40,
    ranged: None,
};

const WARLOCK: BossConfig = BossConfig {
    radius: 30.0,
    hp: 450.0,
    damage: 18.0,
    speed: 50.0,
    xp: 50.0,
    gold: 40,
    ranged: Some((2.0, 12.0)),
};

const ABOMINATION: BossConfig = BossConfig {
    radius: 40.0,
    hp: 800.0,
    damage: 30.0,
    speed: 35.0,
    xp: 70.0,
    gold: 55,
    ranged: None,
};

const REAVER: BossConfig = BossConfig {
    radius: 28.0,
    hp: 500.0,
    damage: 22.0,
    speed: 70.0,
    xp: 70.0,
    gold: 55,
    ranged: Some((1.6, 10.0)),
};

const COLOSSUS: BossConfig = BossConfig {
    radius: 44.0,
    hp: 1000.0,
    damage: 35.0,
    speed: 30.0,
    xp: 90.0,
    gold: 70,
    ranged: None,
};

const HIVEMIND: BossConfig = BossConfig {
    radius: 34.0,
    hp: 650.0,
    damage: 20.0,
    speed: 45.0,
    xp: 90.0,
    gold: 70,
    ranged: Some((2.4, 14.0)),
};

/// Look up the static configuration for a boss archetype.
pub fn boss_config(archetype: BossArchetype) -> &'static BossConfig {
    match archetype {
        BossArchetype::Behemoth => &BEHEMOTH,
        BossArchetype::Warlock => &WARLOCK,
        BossArchetype::Abomination => &ABOMINATION,
        BossArchetype::Reaver => &REAVER,
        BossArchetype::Colossus => &COLOSSUS,
        BossArchetype::Hivemind => &HIVEMIND,
    }
}

/// Shared exponential difficulty curve: 1.04^(wave - 5) from wave 5 onward.
pub fn wave_scale(wave: u32) -> f64 {
    if wave <= ENEMY_SCALE_BASE_WAVE {
        1.0
    } else {
        ENEMY_SCALE_FACTOR.powi((wave - ENEMY_SCALE_BASE_WAVE) as i32)
    }
}

/// Boss HP multiplier for the given 1-based cycle index. Composed
/// multiplicatively with [`wave_scale`], never instead of it.
pub fn boss_hp_mult(cycle: u32) -> f64 {
    1.0 + (cycle.saturating_sub(1)) as f64 * BOSS_HP_PER_CYCLE
}

/// Boss damage multiplier for the given 1-based cycle index.
pub fn boss_damage_mult(cycle: u32) -> f64 {
    1.0 + (cycle.saturating_sub(1)) as f64 * BOSS_DMG_PER_CYCLE
}

/// Seconds between ordinary spawn pulses.
pub fn spawn_interval(wave: u32) -> f64 {
    (SPAWN_INTERVAL_BASE - wave as f64 * SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN)
}

/// Enemies emitted per spawn pulse.
pub fn enemies_per_spawn(wave: u32) -> u32 {
    (1 + (wave as f64 * ENEMIES_PER_SPAWN_FACTOR) as u32).min(ENEMIES_PER_SPAWN_MAX)
}

/// Wave countdown duration in seconds.
pub fn wave_duration(wave: u32) -> f64 {
    if wave <= 2 {
        WAVE_DURATION_EARLY
    } else if wave <= 4 {
        WAVE_DURATION_MID
    } else {
        WAVE_DURATION_LATE
    }
}

/// Is this a boss wave? Every third wave.
pub fn is_boss_wave(wave: u32) -> bool {
    wave > 0 && wave % BOSS_WAVE_INTERVAL == 0
}

//! Unit tests for the balance formulas and configuration tables.

use crate::constants::*;
use crate::enemies;
use crate::enums::*;
use crate::geometry;
use crate::stats::{mitigated_damage, PlayerStats};
use crate::types::Position;
use crate::weapons::{self, WeaponInstance};

const ALL_WEAPONS: [WeaponKind; 9] = [
    WeaponKind::Pistol,
    WeaponKind::Shotgun,
    WeaponKind::Smg,
    WeaponKind::Railgun,
    WeaponKind::Arc,
    WeaponKind::Rocket,
    WeaponKind::HolyGrenade,
    WeaponKind::Banana,
    WeaponKind::MineLayer,
];

// ---- Armor ----

#[test]
fn test_armor_mitigation_monotonic() {
    let raw = 50.0;
    let mut previous = mitigated_damage(raw, 0.0);
    assert!((previous - raw).abs() < 1e-10, "zero armor takes full damage");

    for armor in 1..500 {
        let taken = mitigated_damage(raw, armor as f64);
        assert!(
            taken <= previous,
            "armor {armor} increased damage taken: {taken} > {previous}"
        );
        assert!(taken > 0.0, "mitigation must never reach 100%");
        previous = taken;
    }
}

#[test]
fn test_armor_halves_at_k() {
    // armor == ARMOR_K mitigates exactly half.
    let taken = mitigated_damage(100.0, ARMOR_K);
    assert!((taken - 50.0).abs() < 1e-10, "got {taken}");
}

#[test]
fn test_negative_armor_clamped() {
    let taken = mitigated_damage(100.0, -50.0);
    assert!((taken - 100.0).abs() < 1e-10);
}

// ---- Weapon upgrade curves ----

#[test]
fn test_upgrade_monotonic_all_weapons() {
    for kind in ALL_WEAPONS {
        let mut weapon = WeaponInstance::new(kind, 0.0, 0.0);
        for _ in 1..12 {
            let damage = weapon.damage();
            let interval = weapon.fire_interval();
            weapon.upgrade();
            assert!(
                weapon.damage() > damage,
                "{kind:?}: damage must grow per level"
            );
            assert!(
                weapon.fire_interval() < interval,
                "{kind:?}: fire interval must shrink per level"
            );
            assert!(weapon.fire_interval() > 0.0);
        }
    }
}

#[test]
fn test_blast_radius_scales_for_explosives() {
    let mut rocket = WeaponInstance::new(WeaponKind::Rocket, 0.0, 0.0);
    let base = rocket.blast_radius();
    rocket.upgrade();
    assert!(rocket.blast_radius() > base);

    // Non-explosive weapons keep a zero blast radius at any level.
    let mut pistol = WeaponInstance::new(WeaponKind::Pistol, 0.0, 0.0);
    pistol.upgrade();
    assert!(pistol.blast_radius().abs() < 1e-10);
}

#[test]
fn test_effective_interval_reflects_attack_speed() {
    let pistol = WeaponInstance::new(WeaponKind::Pistol, 0.0, 0.0);
    let base = pistol.effective_interval(1.0);
    assert!(pistol.effective_interval(2.0) < base);
    assert!(pistol.effective_interval(0.5) > base);
    assert!(pistol.effective_interval(1000.0) > 0.0);
}

#[test]
fn test_fire_offset_is_one_shot() {
    let mut weapon = WeaponInstance::new(WeaponKind::Pistol, 0.0, 0.3);
    // Ready-at-acquisition baseline is delayed by the offset.
    assert!(!weapon.can_fire(0.2, 1.0));
    assert!(weapon.can_fire(0.31, 1.0));
    weapon.mark_fired(0.31);
    assert!((weapon.fire_offset).abs() < 1e-10, "offset cleared after use");
    // Subsequent cadence is the plain interval.
    assert!(!weapon.can_fire(0.31 + 0.49, 1.0));
    assert!(weapon.can_fire(0.31 + 0.51, 1.0));
}

// ---- Wave formulas ----

#[test]
fn test_wave_durations() {
    assert!((enemies::wave_duration(1) - 25.0).abs() < 1e-10);
    assert!((enemies::wave_duration(2) - 25.0).abs() < 1e-10);
    assert!((enemies::wave_duration(3) - 35.0).abs() < 1e-10);
    assert!((enemies::wave_duration(4) - 35.0).abs() < 1e-10);
    assert!((enemies::wave_duration(5) - 40.0).abs() < 1e-10);
    assert!((enemies::wave_duration(20) - 40.0).abs() < 1e-10);
}

#[test]
fn test_spawn_cadence_formulas() {
    assert!((enemies::spawn_interval(1) - 0.95).abs() < 1e-10);
    assert!((enemies::spawn_interval(12) - 0.4).abs() < 1e-10, "floored");
    assert!((enemies::spawn_interval(50) - 0.4).abs() < 1e-10);

    assert_eq!(enemies::enemies_per_spawn(1), 1);
    assert_eq!(enemies::enemies_per_spawn(3), 2);
    assert_eq!(enemies::enemies_per_spawn(8), 4);
    assert_eq!(enemies::enemies_per_spawn(30), 4, "capped at 4");
}

#[test]
fn test_enemy_scale_curve() {
    assert!((enemies::wave_scale(1) - 1.0).abs() < 1e-10);
    assert!((enemies::wave_scale(5) - 1.0).abs() < 1e-10);
    assert!((enemies::wave_scale(6) - 1.04).abs() < 1e-10);
    assert!((enemies::wave_scale(10) - 1.04f64.powi(5)).abs() < 1e-10);
}

#[test]
fn test_boss_cadence_every_third_wave() {
    let boss_waves: Vec<u32> = (1..=12).filter(|&w| enemies::is_boss_wave(w)).collect();
    assert_eq!(boss_waves, vec![3, 6, 9, 12]);
}

#[test]
fn test_boss_scaling_composes_with_wave_curve() {
    // Cycle-linear factors and the exponential curve multiply together.
    assert!((enemies::boss_hp_mult(1) - 1.0).abs() < 1e-10);
    assert!((enemies::boss_hp_mult(3) - 2.0).abs() < 1e-10);
    assert!((enemies::boss_damage_mult(3) - 1.5).abs() < 1e-10);

    let wave = 9;
    let cycle = 3;
    let hp = 600.0 * enemies::boss_hp_mult(cycle) * enemies::wave_scale(wave);
    assert!(
        (hp - 600.0 * 2.0 * 1.04f64.powi(4)).abs() < 1e-6,
        "both factors must apply, got {hp}"
    );
}

#[test]
fn test_boss_cycle_wraps_deterministically() {
    assert_eq!(BossArchetype::from_cycle(1), BossArchetype::Behemoth);
    assert_eq!(BossArchetype::from_cycle(6), BossArchetype::Hivemind);
    assert_eq!(BossArchetype::from_cycle(7), BossArchetype::Behemoth);
}

// ---- Spawn table ----

#[test]
fn test_archetype_unlock_progression() {
    // Wave 1 only ever spawns the first archetype.
    for roll in [0.0, 0.5, 0.999] {
        assert_eq!(
            enemies::archetype_for_roll(1, roll),
            EnemyArchetype::Walker
        );
    }
    // Wave 2 can spawn the second archetype but nothing later.
    assert_eq!(
        enemies::archetype_for_roll(2, 0.999),
        EnemyArchetype::Runner
    );
    // Wave 10+ reaches the full table.
    assert_eq!(
        enemies::archetype_for_roll(10, 0.9999),
        EnemyArchetype::Golem
    );
    assert_eq!(
        enemies::archetype_for_roll(25, 0.9999),
        EnemyArchetype::Golem
    );
}

#[test]
fn test_spawn_table_covers_every_archetype_once() {
    let mut seen = std::collections::HashSet::new();
    for (archetype, weight) in enemies::SPAWN_TABLE {
        assert!(weight > 0);
        assert!(seen.insert(archetype), "{archetype:?} listed twice");
    }
    assert_eq!(seen.len(), 10);
}

// ---- Stats ----

#[test]
fn test_stat_application_additive() {
    let mut stats = PlayerStats::default();
    stats.apply(StatKind::Damage, 0.25);
    stats.apply(StatKind::Damage, 0.25);
    assert!((stats.damage_mult - 1.5).abs() < 1e-10);

    stats.apply(StatKind::Dodge, 2.0);
    assert!((stats.dodge - 0.95).abs() < 1e-10, "dodge clamped");

    stats.apply(StatKind::ExtraProjectiles, 2.0);
    assert_eq!(stats.extra_projectiles, 2);
}

// ---- Geometry ----

#[test]
fn test_circle_overlap() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(10.0, 0.0);
    assert!(geometry::circles_overlap(a, 6.0, b, 5.0));
    assert!(!geometry::circles_overlap(a, 4.0, b, 5.9));
}

#[test]
fn test_circle_rect_overlap() {
    let rect_center = Position::new(0.0, 0.0);
    let half = glam::DVec2::new(12.0, 16.0);
    assert!(geometry::circle_rect_overlap(
        Position::new(14.0, 0.0),
        3.0,
        rect_center,
        half
    ));
    assert!(!geometry::circle_rect_overlap(
        Position::new(20.0, 0.0),
        3.0,
        rect_center,
        half
    ));
}

#[test]
fn test_spread_offsets_even_fan() {
    let offsets = geometry::spread_offsets(5, 0.5);
    assert_eq!(offsets.len(), 5);
    assert!((offsets[0] + 0.25).abs() < 1e-10);
    assert!((offsets[4] - 0.25).abs() < 1e-10);
    assert!(offsets[2].abs() < 1e-10, "middle shot flies straight");

    assert_eq!(geometry::spread_offsets(1, 0.5), vec![0.0]);
}

// ---- Snapshot serialization ----

#[test]
fn test_snapshot_serializes_to_json() {
    let snap = crate::state::GameStateSnapshot::default();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\""));
    let back: crate::state::GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phase, GamePhase::Ready);
}

// ---- Config table sanity ----

#[test]
fn test_weapon_table_consistency() {
    for kind in ALL_WEAPONS {
        let cfg = weapons::config(kind);
        assert!(cfg.fire_interval > 0.0, "{kind:?}");
        assert!(cfg.damage > 0.0, "{kind:?}");
        match cfg.category {
            WeaponCategory::Grenade => {
                assert!(cfg.grenade_range > 0.0, "{kind:?}");
                assert!(cfg.blast_radius > 0.0, "{kind:?}");
                assert!(cfg.explosion_style.is_some(), "{kind:?}");
            }
            WeaponCategory::Mine => {
                assert!(cfg.blast_radius > 0.0, "{kind:?}");
                assert!(cfg.explosion_style.is_some(), "{kind:?}");
            }
            WeaponCategory::Standard => {
                assert!(cfg.speed > 0.0, "{kind:?}");
            }
        }
    }
}

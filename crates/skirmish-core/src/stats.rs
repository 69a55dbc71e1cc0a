//! Player stat block and the additive stat-mutation contract.

use serde::{Deserialize, Serialize};

use crate::constants::{ARMOR_K, PLAYER_PICKUP_RANGE};
use crate::enums::StatKind;

/// The player's combat/utility stat multipliers. Used as an ECS component.
///
/// The shop/item layer mutates these only through [`PlayerStats::apply`],
/// which is additive per stat. `MaxHp` is handled by the engine since it
/// touches the `Health` component, not this block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStats {
    pub damage_mult: f64,
    pub attack_speed_mult: f64,
    /// Chance in [0, 1] for each shot to crit.
    pub crit_chance: f64,
    /// Damage multiplier applied on a crit.
    pub crit_damage: f64,
    /// Fraction of projectile damage dealt returned as healing.
    pub lifesteal: f64,
    pub knockback: f64,
    pub explosion_radius_mult: f64,
    pub extra_projectiles: u32,
    pub extra_pierce: u32,
    pub attack_range_mult: f64,
    pub armor: f64,
    /// Chance in [0, 1] to ignore a hit entirely.
    pub dodge: f64,
    /// Flat damage reflected at enemies on contact.
    pub thorns: f64,
    /// HP regenerated per second.
    pub regen: f64,
    pub luck: f64,
    pub xp_mult: f64,
    pub gold_mult: f64,
    pub move_speed_mult: f64,
    pub pickup_range: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            damage_mult: 1.0,
            attack_speed_mult: 1.0,
            crit_chance: 0.05,
            crit_damage: 2.0,
            lifesteal: 0.0,
            knockback: 1.0,
            explosion_radius_mult: 1.0,
            extra_projectiles: 0,
            extra_pierce: 0,
            attack_range_mult: 1.0,
            armor: 0.0,
            dodge: 0.0,
            thorns: 0.0,
            regen: 0.0,
            luck: 0.0,
            xp_mult: 1.0,
            gold_mult: 1.0,
            move_speed_mult: 1.0,
            pickup_range: PLAYER_PICKUP_RANGE,
        }
    }
}

impl PlayerStats {
    /// Apply an additive bonus to the named stat. Chance stats are clamped
    /// to sane bounds; count stats round toward zero.
    pub fn apply(&mut self, stat: StatKind, amount: f64) {
        match stat {
            StatKind::Damage => self.damage_mult += amount,
            StatKind::AttackSpeed => self.attack_speed_mult += amount,
            StatKind::CritChance => {
                self.crit_chance = (self.crit_chance + amount).clamp(0.0, 1.0)
            }
            StatKind::CritDamage => self.crit_damage += amount,
            StatKind::Lifesteal => self.lifesteal += amount,
            StatKind::Knockback => self.knockback += amount,
            StatKind::ExplosionRadius => self.explosion_radius_mult += amount,
            StatKind::ExtraProjectiles => {
                self.extra_projectiles = (self.extra_projectiles as f64 + amount).max(0.0) as u32
            }
            StatKind::ExtraPierce => {
                self.extra_pierce = (self.extra_pierce as f64 + amount).max(0.0) as u32
            }
            StatKind::AttackRange => self.attack_range_mult += amount,
            StatKind::Armor => self.armor += amount,
            StatKind::Dodge => self.dodge = (self.dodge + amount).clamp(0.0, 0.95),
            StatKind::Thorns => self.thorns += amount,
            StatKind::Regen => self.regen += amount,
            StatKind::Luck => self.luck += amount,
            StatKind::XpGain => self.xp_mult += amount,
            StatKind::GoldGain => self.gold_mult += amount,
            StatKind::MoveSpeed => self.move_speed_mult += amount,
            StatKind::PickupRange => self.pickup_range += amount,
            // Touches Health, handled by the engine command handler.
            StatKind::MaxHp => {}
        }
    }
}

/// Armor-mitigated damage: `raw * (1 - armor / (armor + ARMOR_K))`.
/// Monotone in armor; approaches but never reaches full mitigation.
pub fn mitigated_damage(raw: f64, armor: f64) -> f64 {
    let armor = armor.max(0.0);
    raw * (1.0 - armor / (armor + ARMOR_K))
}

//! Player/shop commands processed at tick boundaries.

use serde::{Deserialize, Serialize};

use crate::enums::{StatKind, WeaponKind};

/// Commands queued by the host (input layer, shop UI) and applied by the
/// engine before the next tick's systems run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a fresh run: reset the world and spawn the player.
    StartRun,
    /// Begin the next wave countdown (no-op while a wave is active).
    StartWave,
    /// Normalized movement input for this and following ticks.
    SetMoveInput { x: f64, y: f64 },
    /// Acquire a weapon, or upgrade an existing copy once slots are full.
    /// Silently ignored when slots are full and no copy exists.
    AddWeapon { kind: WeaponKind },
    /// Upgrade the weapon in the given slot.
    UpgradeWeapon { slot: usize },
    /// Record an acquired item id.
    AddItem { id: u32 },
    /// Additive stat mutation from the shop/item layer.
    ApplyStatBonus { stat: StatKind, amount: f64 },
    Pause,
    Resume,
}

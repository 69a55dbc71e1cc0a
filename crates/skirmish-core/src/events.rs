//! Events emitted by the simulation for audio and UI feedback.
//!
//! Fire-and-forget and synchronous: consumers read them from the snapshot
//! and must not feed back into the same tick's simulation state.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// One tick's worth of notifications, drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32 },
    WaveEnded { wave: u32 },
    EnemyDied { archetype: EnemyArchetype },
    BossSpawned { archetype: BossArchetype },
    BossDefeated { archetype: BossArchetype },
    /// Player took damage (post-mitigation amount).
    PlayerHit { damage: f64 },
    /// A hit was dodged; no HP lost, no damage side effects.
    PlayerDodged,
    PlayerDied,
    WeaponFired { kind: WeaponKind },
    Explosion { style: ExplosionStyle },
    PickupCollected { kind: PickupKind },
    LevelUp { level: u32 },
}

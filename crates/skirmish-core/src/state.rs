//! Game state snapshot — the read-only view of the simulation produced
//! after each tick. Renderers and UI consume these and never mutate
//! simulation entities.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete visible state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    /// Absent before a run starts.
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub deployables: Vec<DeployableView>,
    pub pickups: Vec<PickupView>,
    /// Events raised during this tick, in emission order.
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
}

/// Wave scheduler status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub number: u32,
    pub active: bool,
    pub time_remaining: f64,
    /// Timer is frozen and ordinary spawning suspended while true.
    pub boss_alive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub half_width: f64,
    pub half_height: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub invincible: bool,
    pub weapons: Vec<WeaponView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Position,
    pub radius: f64,
    pub hp: f64,
    pub max_hp: f64,
    /// Regular archetype; `None` for bosses.
    pub archetype: Option<EnemyArchetype>,
    pub is_boss: bool,
    pub boss_archetype: Option<BossArchetype>,
    /// Render with transparency; collision unaffected.
    pub phasing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub radius: f64,
    pub style: ProjectileStyle,
    pub faction: Faction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployableView {
    pub position: Position,
    pub radius: f64,
    pub armed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub position: Position,
    pub kind: PickupKind,
    pub value: f64,
    /// 1.0 normally, easing to 0.0 over the final despawn second.
    pub scale: f64,
}

/// Running score and progression.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: u32,
    pub gold: f64,
    pub xp: f64,
    pub level: u32,
}

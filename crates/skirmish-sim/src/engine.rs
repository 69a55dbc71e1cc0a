//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued commands,
//! runs all systems in the fixed per-tick order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic
//! testing: same seed + same command stream = same snapshots.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::Health;
use skirmish_core::constants::MAX_WEAPONS;
use skirmish_core::enums::{GamePhase, StatKind, WeaponKind};
use skirmish_core::events::GameEvent;
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::stats::PlayerStats;
use skirmish_core::types::SimTime;
use skirmish_core::weapons::{self, Loadout, WeaponInstance};

use crate::score::ScoreState;
use crate::systems;
use crate::systems::wave_spawner::WaveState;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    player: Option<hecs::Entity>,
    move_input: DVec2,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    wave: WaveState,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: None,
            move_input: DVec2::ZERO,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            wave: WaveState::default(),
            score: ScoreState::default(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Running {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.phase,
            &self.wave,
            self.player,
            events,
            &self.score,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The player entity.
    ///
    /// # Panics
    /// Panics if queried before `StartRun` has been processed — that is a
    /// broken call contract, not a runtime condition.
    pub fn player(&self) -> hecs::Entity {
        self.player
            .expect("player queried before a run was started")
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Get a read-only reference to the wave state.
    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    /// Mutable world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn a regular enemy at an explicit position (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        archetype: skirmish_core::enums::EnemyArchetype,
        x: f64,
        y: f64,
    ) -> hecs::Entity {
        world_setup::spawn_enemy_at(
            &mut self.world,
            archetype,
            skirmish_core::types::Position::new(x, y),
            1,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if matches!(self.phase, GamePhase::Ready | GamePhase::GameOver) {
                    self.world.clear();
                    self.player = Some(world_setup::spawn_player(&mut self.world));
                    self.time = SimTime::default();
                    self.wave = WaveState::default();
                    self.score = ScoreState::default();
                    self.move_input = DVec2::ZERO;
                    self.phase = GamePhase::Running;
                }
            }
            PlayerCommand::StartWave => {
                if self.phase == GamePhase::Running && !self.wave.active {
                    self.wave.begin_next(&mut self.events);
                }
            }
            PlayerCommand::SetMoveInput { x, y } => {
                let v = DVec2::new(x, y);
                self.move_input = if v.length_squared() > 1.0 {
                    v.normalize()
                } else {
                    v
                };
            }
            PlayerCommand::AddWeapon { kind } => self.handle_add_weapon(kind),
            PlayerCommand::UpgradeWeapon { slot } => {
                let Some(player) = self.player else { return };
                if let Ok(mut loadout) = self.world.get::<&mut Loadout>(player) {
                    if let Some(weapon) = loadout.weapons.get_mut(slot) {
                        weapon.upgrade();
                    }
                }
            }
            PlayerCommand::AddItem { id } => {
                let Some(player) = self.player else { return };
                if let Ok(mut loadout) = self.world.get::<&mut Loadout>(player) {
                    loadout.items.push(id);
                }
            }
            PlayerCommand::ApplyStatBonus { stat, amount } => {
                let Some(player) = self.player else { return };
                if stat == StatKind::MaxHp {
                    if let Ok(mut health) = self.world.get::<&mut Health>(player) {
                        health.max = (health.max + amount).max(1.0);
                        health.hp = (health.hp + amount).clamp(0.0, health.max);
                    }
                } else if let Ok(mut stats) = self.world.get::<&mut PlayerStats>(player) {
                    stats.apply(stat, amount);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Running {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Running;
                }
            }
        }
    }

    /// Acquire a weapon. While slots are free, duplicates are added as
    /// staggered copies; once full, an existing copy is upgraded instead.
    /// Silently a no-op when full with no copy to upgrade.
    fn handle_add_weapon(&mut self, kind: WeaponKind) {
        let Some(player) = self.player else { return };
        let now = self.time.elapsed_secs;
        if let Ok(mut loadout) = self.world.get::<&mut Loadout>(player) {
            if loadout.weapons.len() < MAX_WEAPONS {
                let copies = loadout.weapons.iter().filter(|w| w.kind == kind).count() as f64;
                // Evenly space the first shots of N copies of the same type.
                let offset = if copies > 0.0 {
                    weapons::config(kind).fire_interval * copies / (copies + 1.0)
                } else {
                    0.0
                };
                loadout.weapons.push(WeaponInstance::new(kind, now, offset));
            } else if let Some(weapon) = loadout.weapons.iter_mut().find(|w| w.kind == kind) {
                weapon.upgrade();
            }
        }
    }

    /// Run all systems in the fixed per-tick order. The ordering is a
    /// correctness contract: collision must see projectiles spawned earlier
    /// in the same tick, and cleanup runs last so mid-tick logic never
    /// observes partially-removed entities.
    fn run_systems(&mut self) {
        let player = self.player();

        // 1. Input -> player movement, regen
        systems::player::run(&mut self.world, player, self.move_input, &self.time);
        // 2. Wave scheduler (may emit new enemies / the boss)
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rng,
            &mut self.wave,
            &mut self.events,
            self.time.elapsed_secs,
        );
        // 3. Weapon cooldowns -> projectiles / mines
        systems::weapons::run(
            &mut self.world,
            player,
            &mut self.rng,
            &mut self.events,
            self.time.elapsed_secs,
        );
        // 4. Enemy seek movement + boss ranged fire
        systems::enemy::run(&mut self.world, player, self.time.elapsed_secs);
        // 5. Projectile integration and expiry flags
        systems::projectile::run(&mut self.world);
        // 6. Contact + projectile collision, damage, deaths, drops
        systems::collision::run(
            &mut self.world,
            player,
            &mut self.rng,
            &mut self.events,
            &mut self.score,
            self.time.elapsed_secs,
        );
        // 7. Mine arming and triggers
        systems::deployable::run(
            &mut self.world,
            player,
            &mut self.rng,
            &mut self.events,
            &mut self.score,
            self.time.elapsed_secs,
        );
        // 8. Pickup magnet/collection/lifetime
        systems::pickup::run(
            &mut self.world,
            player,
            &mut self.events,
            &mut self.score,
            self.time.elapsed_secs,
        );
        // 9. Deferred despawn of dead/spent/collected entities
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.check_game_over(player);
    }

    fn check_game_over(&mut self, player: hecs::Entity) {
        let dead = self
            .world
            .get::<&Health>(player)
            .map(|h| h.hp <= 0.0)
            .unwrap_or(false);
        if dead {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::PlayerDied);
        }
    }
}

//! Wave countdown and enemy spawn scheduling.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::BOSS_GATE_REMAINING_SECS;
use skirmish_core::enemies;
use skirmish_core::enums::BossArchetype;
use skirmish_core::events::GameEvent;

use crate::registry;
use crate::world_setup;

/// Wave scheduler state. Owned by the engine, mutated only here and by the
/// `StartWave` command.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Current wave number; 0 before the first wave.
    pub number: u32,
    pub active: bool,
    pub time_remaining: f64,
    /// Accumulates toward the next ordinary spawn pulse.
    pub spawn_timer: f64,
    /// One boss per boss wave.
    pub boss_spawned: bool,
    /// Count of bosses spawned this run; selects archetype and scaling.
    pub boss_cycle: u32,
}

impl WaveState {
    /// Advance to the next wave and start its countdown.
    pub fn begin_next(&mut self, events: &mut Vec<GameEvent>) {
        self.number += 1;
        self.active = true;
        self.time_remaining = enemies::wave_duration(self.number);
        self.spawn_timer = 0.0;
        self.boss_spawned = false;
        events.push(GameEvent::WaveStarted { wave: self.number });
    }
}

/// Run the wave countdown, ordinary spawn pulses, and the boss gate.
/// While a boss is alive the timer freezes and ordinary spawning stops.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    wave: &mut WaveState,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    if !wave.active {
        return;
    }
    if registry::boss_alive(world) {
        return;
    }

    let dt = skirmish_core::constants::DT;
    wave.time_remaining -= dt;
    if wave.time_remaining <= 0.0 {
        wave.time_remaining = 0.0;
        wave.active = false;
        events.push(GameEvent::WaveEnded { wave: wave.number });
        return;
    }

    if enemies::is_boss_wave(wave.number)
        && !wave.boss_spawned
        && wave.time_remaining <= BOSS_GATE_REMAINING_SECS
    {
        wave.boss_spawned = true;
        wave.boss_cycle += 1;
        let archetype = BossArchetype::from_cycle(wave.boss_cycle);
        world_setup::spawn_boss(world, rng, archetype, wave.number, wave.boss_cycle, now);
        events.push(GameEvent::BossSpawned { archetype });
        return;
    }

    wave.spawn_timer += dt;
    let interval = enemies::spawn_interval(wave.number);
    while wave.spawn_timer >= interval {
        wave.spawn_timer -= interval;
        for _ in 0..enemies::enemies_per_spawn(wave.number) {
            let roll = rng.gen::<f64>();
            let archetype = enemies::archetype_for_roll(wave.number, roll);
            world_setup::spawn_enemy(world, rng, archetype, wave.number);
        }
    }
}

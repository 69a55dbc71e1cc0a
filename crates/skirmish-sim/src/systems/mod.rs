//! Simulation systems, run once per tick in the order `engine.rs` defines.

pub mod cleanup;
pub mod collision;
pub mod deployable;
pub mod enemy;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod wave_spawner;
pub mod weapons;

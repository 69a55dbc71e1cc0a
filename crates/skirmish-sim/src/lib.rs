//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs the per-tick system pipeline at a fixed
//! tick rate, and produces GameStateSnapshots for the host.

pub mod engine;
pub mod registry;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;

//! Core types and definitions for the SKIRMISH combat simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometry, components, static weapon/enemy configuration, commands,
//! state snapshots, events, and constants. It has no dependency on the
//! ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enemies;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod stats;
pub mod types;
pub mod weapons;

#[cfg(test)]
mod tests;

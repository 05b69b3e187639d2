//! Headless game-mode harness for Neon Ascendant.
//!
//! Owns a hecs world of player, enemies, hazards and sight occluders, runs
//! the enemy behavior controllers at a fixed tick rate, and reports what
//! happened each tick as `GameEvent`s.

pub mod components;
pub mod engine;
pub mod los;
pub mod systems;
pub mod weapon;
pub mod world_setup;

pub use neon_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use weapon::{Weapon, WeaponEvent, WeaponStats};

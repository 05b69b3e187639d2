//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World`. Persistent state lives in
//! components; per-tick output goes to the caller's event buffer.

pub mod combat;
pub mod enemy_ai;
pub mod hazard;
pub mod movement;

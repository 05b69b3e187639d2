//! Enemy behavior for Neon Ascendant.
//!
//! Implements the per-enemy patrol / investigate / engaged / retreat / dead
//! state machine, its perception rules, and the movement policy each state
//! requests from the host's navigation service.

pub mod agent;
pub mod config;
pub mod controller;
pub mod fsm;
pub mod services;

pub use neon_core as core;

pub use agent::{DamageOutcome, EnemyAgent};
pub use config::{ConfigError, EnemyAiConfig};
pub use controller::{EnemyBehaviorController, Target, TickReport};
pub use services::{LineOfSight, Movement, SightLine};

#[cfg(test)]
mod tests;

//! Core types and definitions for Neon Ascendant.
//!
//! This crate defines the vocabulary shared across all other crates:
//! positions, entity handles, AI states, events, and tuning constants.
//! It has no dependency on any engine or runtime framework.

pub mod constants;
pub mod enums;
pub mod events;
pub mod types;

#[cfg(test)]
mod tests;

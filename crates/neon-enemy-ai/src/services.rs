//! Host services the controller consumes.
//!
//! Sight queries and movement are provided by the host world. Both are
//! fire-and-forget per tick: a failed or missing answer is simply re-asked
//! on the next update.

use neon_core::types::{EntityId, Position};

/// Result of a sight-line query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SightLine {
    /// Nothing between the two points.
    Clear,
    /// The line stops at `by`. When `by` is the traced target the target
    /// counts as visible.
    Blocked { by: EntityId },
}

/// Line-of-sight query service.
pub trait LineOfSight {
    /// Trace from `from` to `to`, where `target` is the entity standing at `to`.
    /// Returns `None` when the query cannot be answered this tick.
    fn trace(&self, from: &Position, to: &Position, target: EntityId) -> Option<SightLine>;
}

/// Movement / navigation service for one agent.
pub trait Movement {
    fn move_to_point(&mut self, point: Position, speed: f64);

    /// Follow a live entity, stopping within `acceptance_radius` of it.
    fn move_to_target(&mut self, target: EntityId, acceptance_radius: f64, speed: f64);

    /// Cancel any current movement.
    fn stop(&mut self);
}

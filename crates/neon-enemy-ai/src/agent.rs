//! Per-enemy runtime record.

use serde::{Deserialize, Serialize};

use neon_core::types::Position;

/// What a hit did to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Non-positive amount, or the agent was already dead.
    Ignored,
    Wounded,
    Killed,
}

/// Runtime state of one enemy. Owned exclusively by its controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyAgent {
    pub current_health: f64,
    pub max_health: f64,
    pub position: Position,
    pub is_dead: bool,
    pub last_known_target_position: Position,
    /// Time (s) at which the current behavior state was entered.
    pub state_change_time: f64,
    pub patrol_target: Option<Position>,
}

impl EnemyAgent {
    pub fn new(position: Position, max_health: f64) -> Self {
        Self {
            current_health: max_health,
            max_health,
            position,
            is_dead: false,
            last_known_target_position: Position::ORIGIN,
            state_change_time: 0.0,
            patrol_target: None,
        }
    }

    /// Current health as a fraction of max health. Zero when max health is not positive.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health > 0.0 {
            self.current_health / self.max_health
        } else {
            0.0
        }
    }

    /// Subtract damage.
    ///
    /// Non-positive amounts and hits on an already dead agent are ignored.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if self.is_dead || !(amount > 0.0) {
            return DamageOutcome::Ignored;
        }

        self.current_health -= amount;
        if self.current_health <= 0.0 {
            self.kill();
            return DamageOutcome::Killed;
        }
        DamageOutcome::Wounded
    }

    pub fn kill(&mut self) {
        self.current_health = 0.0;
        self.is_dead = true;
    }
}

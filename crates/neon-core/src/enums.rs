//! Enumeration types used throughout the game.

use serde::{Deserialize, Serialize};

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyAiState {
    /// Wandering between random nearby points.
    #[default]
    Patrol,
    /// Heading to where the target was last heard or seen.
    Investigate,
    /// Closing on a visible target.
    Engaged,
    /// Falling back from the target to recover.
    Retreat,
    /// Terminal. No further behavior.
    Dead,
}

impl EnemyAiState {
    pub fn is_terminal(self) -> bool {
        matches!(self, EnemyAiState::Dead)
    }
}

/// Damage family of a district hazard volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardType {
    #[default]
    Thermal,
    Electrical,
    Toxic,
    Radiation,
    Cryogenic,
}

impl HazardType {
    pub fn name(self) -> &'static str {
        match self {
            HazardType::Thermal => "Thermal",
            HazardType::Electrical => "Electrical",
            HazardType::Toxic => "Toxic",
            HazardType::Radiation => "Radiation",
            HazardType::Cryogenic => "Cryogenic",
        }
    }
}

impl std::fmt::Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

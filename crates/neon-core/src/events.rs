//! Events emitted by the simulation for HUD and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy changed behavior state.
    EnemyStateChanged {
        enemy: EntityId,
        from: EnemyAiState,
        to: EnemyAiState,
        at_secs: f64,
    },
    /// An enemy took damage from a known source position.
    EnemyDamaged {
        enemy: EntityId,
        amount: f64,
        remaining: f64,
        source: Position,
    },
    /// An enemy's health reached zero.
    EnemyKilled { enemy: EntityId },
    /// The player took damage.
    PlayerDamaged { amount: f64, remaining: f64 },
    /// A hazard volume ticked damage onto an actor.
    HazardDamage {
        hazard: EntityId,
        kind: HazardType,
        victim: EntityId,
        amount: f64,
    },
    /// The player's weapon discharged.
    ShotFired { hit: Option<EntityId>, ammo_left: u32 },
    ReloadStarted { duration_secs: f64 },
    ReloadFinished { ammo: u32 },
}

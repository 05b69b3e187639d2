//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems.

use std::collections::HashMap;

use hecs::Entity;
use serde::{Deserialize, Serialize};

use neon_core::constants::*;
use neon_core::enums::HazardType;
use neon_core::types::{EntityId, Position};
use neon_enemy_ai::EnemyBehaviorController;

/// Marker for the player character.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }
}

/// An AI-driven enemy. The controller owns the enemy's health and state.
pub struct Enemy {
    pub controller: EnemyBehaviorController,
    /// Engaged with the player inside attack range as of the last update.
    pub attacking: bool,
}

/// Current navigation order, written by the enemy AI system and consumed
/// by movement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum MoveOrder {
    #[default]
    Idle,
    ToPoint {
        point: Position,
        speed: f64,
    },
    ToEntity {
        target: EntityId,
        acceptance_radius: f64,
        speed: f64,
    },
}

/// Tunables for a damage volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardSpec {
    pub kind: HazardType,
    pub damage_per_second: f64,
    pub radius: f64,
    /// Seconds between damage applications to the same actor.
    pub tick_rate_secs: f64,
}

impl Default for HazardSpec {
    fn default() -> Self {
        Self {
            kind: HazardType::default(),
            damage_per_second: HAZARD_DAMAGE_PER_SECOND,
            radius: HAZARD_EFFECT_RADIUS,
            tick_rate_secs: HAZARD_DAMAGE_TICK_RATE_SECS,
        }
    }
}

/// Spherical damage volume.
#[derive(Debug, Clone)]
pub struct Hazard {
    pub spec: HazardSpec,
    pub active: bool,
    /// Time each actor inside the volume was last damaged.
    pub last_damage: HashMap<Entity, f64>,
}

impl Hazard {
    pub fn new(spec: HazardSpec) -> Self {
        Self {
            spec,
            active: true,
            last_damage: HashMap::new(),
        }
    }
}

/// Sphere that blocks sight lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Occluder {
    pub radius: f64,
}

/// Stable id handed to the AI crate for a hecs entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

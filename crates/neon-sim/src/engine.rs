//! Simulation engine for the game mode.
//!
//! `SimulationEngine` owns the hecs world, the player's weapon and the
//! seeded RNG that hands each spawned enemy its own patrol seed. Completely
//! headless, so whole encounters can be replayed deterministically in tests.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use neon_core::constants::{DT, PLAYER_MAX_HEALTH};
use neon_core::enums::EnemyAiState;
use neon_core::events::GameEvent;
use neon_core::types::{Position, SimTime};
use neon_enemy_ai::{ConfigError, EnemyAiConfig};

use crate::components::{Enemy, Hazard, HazardSpec, Health, MoveOrder};
use crate::systems;
use crate::systems::enemy_ai::OrderRecorder;
use crate::weapon::{Weapon, WeaponEvent, WeaponStats};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub ai: EnemyAiConfig,
    pub player_max_health: f64,
    pub weapon: WeaponStats,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ai: EnemyAiConfig::default(),
            player_max_health: PLAYER_MAX_HEALTH,
            weapon: WeaponStats::default(),
        }
    }
}

pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    ai: EnemyAiConfig,
    player_max_health: f64,
    player: Option<Entity>,
    aim: Option<Entity>,
    weapon: Weapon,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine. Fails if the enemy AI tunables are inconsistent.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.ai.validate()?;
        info!(seed = config.seed, "simulation engine created");
        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ai: config.ai,
            player_max_health: config.player_max_health,
            player: None,
            aim: None,
            weapon: Weapon::new(config.weapon),
            events: Vec::new(),
        })
    }

    /// Advance one tick and return the events it produced.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let now = self.time.elapsed_secs;

        // 1. Enemy behavior
        systems::enemy_ai::run(&mut self.world, self.player, now, &mut self.events);
        // 2. Movement integration
        systems::movement::run(&mut self.world, DT, self.ai.min_ground_height);
        // 3. Hazard volumes
        systems::hazard::run(&mut self.world, now, &mut self.events);
        // 4. Player weapon
        systems::combat::run(
            &mut self.world,
            &mut self.weapon,
            self.player,
            self.aim,
            now,
            &mut self.events,
        );

        self.time.advance(DT);
        std::mem::take(&mut self.events)
    }

    /// Spawn the player, replacing any existing one.
    pub fn spawn_player(&mut self, position: Position) -> Entity {
        if let Some(old) = self.player.take() {
            let _ = self.world.despawn(old);
        }
        let entity = world_setup::spawn_player(&mut self.world, position, self.player_max_health);
        self.player = Some(entity);
        entity
    }

    pub fn spawn_enemy(&mut self, position: Position) -> Entity {
        let entity = world_setup::spawn_enemy(
            &mut self.world,
            &mut self.rng,
            &self.ai,
            position,
            self.time.elapsed_secs,
        );
        info!(?entity, ?position, "enemy spawned");
        entity
    }

    pub fn spawn_hazard(&mut self, position: Position, spec: HazardSpec) -> Entity {
        debug!(kind = %spec.kind, radius = spec.radius, "hazard spawned");
        world_setup::spawn_hazard(&mut self.world, position, spec)
    }

    pub fn spawn_occluder(&mut self, center: Position, radius: f64) -> Entity {
        world_setup::spawn_occluder(&mut self.world, center, radius)
    }

    /// Remove an enemy, letting its controller cancel movement first.
    /// Returns the enemy's final move order, or `None` if `entity` is not an enemy.
    pub fn destroy_enemy(&mut self, entity: Entity) -> Option<MoveOrder> {
        let cancel = {
            let mut enemy = self.world.get::<&mut Enemy>(entity).ok()?;
            let mut recorder = OrderRecorder::default();
            enemy.controller.on_destroy(&mut recorder);
            recorder.order
        };
        let final_order = {
            let mut order = self.world.get::<&mut MoveOrder>(entity).ok()?;
            if let Some(cancel) = cancel {
                *order = cancel;
            }
            *order
        };
        if self.aim == Some(entity) {
            self.aim = None;
        }
        info!(?entity, ?final_order, "enemy destroyed");
        self.world.despawn(entity).ok()?;
        Some(final_order)
    }

    pub fn set_player_position(&mut self, position: Position) -> bool {
        let Some(player) = self.player else {
            return false;
        };
        match self.world.get::<&mut Position>(player) {
            Ok(mut pos) => {
                *pos = position;
                true
            }
            Err(_) => false,
        }
    }

    pub fn set_hazard_active(&mut self, hazard: Entity, active: bool) -> bool {
        match self.world.get::<&mut Hazard>(hazard) {
            Ok(mut h) => {
                h.active = active;
                true
            }
            Err(_) => false,
        }
    }

    /// Choose the entity the player's shots are aimed at.
    pub fn set_aim(&mut self, target: Option<Entity>) {
        self.aim = target;
    }

    pub fn start_fire(&mut self) -> bool {
        self.weapon.start_fire()
    }

    pub fn stop_fire(&mut self) {
        self.weapon.stop_fire();
    }

    /// Start a reload; the `ReloadStarted` event is reported by the next tick.
    pub fn reload(&mut self) -> bool {
        match self.weapon.reload(self.time.elapsed_secs) {
            Some(WeaponEvent::ReloadStarted { duration_secs }) => {
                self.events.push(GameEvent::ReloadStarted { duration_secs });
                true
            }
            _ => false,
        }
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn player_health(&self) -> Option<f64> {
        let player = self.player?;
        self.world.get::<&Health>(player).ok().map(|h| h.current)
    }

    pub fn position(&self, entity: Entity) -> Option<Position> {
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    pub fn enemy_state(&self, entity: Entity) -> Option<EnemyAiState> {
        self.world
            .get::<&Enemy>(entity)
            .ok()
            .map(|e| e.controller.state())
    }

    pub fn enemy_health(&self, entity: Entity) -> Option<f64> {
        self.world
            .get::<&Enemy>(entity)
            .ok()
            .map(|e| e.controller.agent().current_health)
    }

    pub fn enemy_attacking(&self, entity: Entity) -> bool {
        self.world
            .get::<&Enemy>(entity)
            .map(|e| e.attacking)
            .unwrap_or(false)
    }

    pub fn move_order(&self, entity: Entity) -> Option<MoveOrder> {
        self.world.get::<&MoveOrder>(entity).ok().map(|o| *o)
    }
}

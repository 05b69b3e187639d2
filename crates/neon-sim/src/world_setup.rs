//! Entity spawn factories.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use neon_core::constants::ENEMY_MAX_HEALTH;
use neon_core::types::Position;
use neon_enemy_ai::{EnemyAgent, EnemyAiConfig, EnemyBehaviorController};

use crate::components::*;

pub fn spawn_player(world: &mut World, position: Position, max_health: f64) -> Entity {
    world.spawn((Player, position, Health::full(max_health)))
}

/// Spawn an enemy in `Patrol`. Its patrol randomness is seeded from `rng`,
/// so enemies spawned in the same order get the same patrol routes.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &EnemyAiConfig,
    position: Position,
    now: f64,
) -> Entity {
    let agent = EnemyAgent::new(position, ENEMY_MAX_HEALTH);
    let mut controller = EnemyBehaviorController::new(config.clone(), agent, rng.gen());
    controller.on_spawn(now);

    world.spawn((
        Enemy {
            controller,
            attacking: false,
        },
        position,
        MoveOrder::Idle,
    ))
}

pub fn spawn_hazard(world: &mut World, position: Position, spec: HazardSpec) -> Entity {
    world.spawn((Hazard::new(spec), position))
}

pub fn spawn_occluder(world: &mut World, center: Position, radius: f64) -> Entity {
    world.spawn((Occluder { radius }, center))
}

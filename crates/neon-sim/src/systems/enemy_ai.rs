//! Enemy AI system: runs every enemy's behavior controller.
//!
//! Each controller issues its move order into a recorder during the query.
//! Orders are written back to the `MoveOrder` components afterwards.

use hecs::{Entity, World};

use neon_core::events::GameEvent;
use neon_core::types::{EntityId, Position};
use neon_enemy_ai::{Movement, Target};

use crate::components::{entity_id, Enemy, MoveOrder};
use crate::los::OccluderField;

/// Captures the last movement request a controller made this update.
#[derive(Debug, Default)]
pub struct OrderRecorder {
    pub order: Option<MoveOrder>,
}

impl Movement for OrderRecorder {
    fn move_to_point(&mut self, point: Position, speed: f64) {
        self.order = Some(MoveOrder::ToPoint { point, speed });
    }

    fn move_to_target(&mut self, target: EntityId, acceptance_radius: f64, speed: f64) {
        self.order = Some(MoveOrder::ToEntity {
            target,
            acceptance_radius,
            speed,
        });
    }

    fn stop(&mut self) {
        self.order = Some(MoveOrder::Idle);
    }
}

pub fn run(world: &mut World, player: Option<Entity>, now: f64, events: &mut Vec<GameEvent>) {
    let target = player.and_then(|entity| {
        world.get::<&Position>(entity).ok().map(|pos| Target {
            id: entity_id(entity),
            position: *pos,
        })
    });
    let sight = OccluderField::from_world(world);

    let mut orders: Vec<(Entity, MoveOrder)> = Vec::new();
    for (entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &Position)>() {
        enemy.controller.agent_mut().position = *pos;

        let mut recorder = OrderRecorder::default();
        let Some(report) = enemy
            .controller
            .on_tick(now, target.as_ref(), &sight, &mut recorder)
        else {
            continue;
        };

        enemy.attacking = report.wants_to_attack;
        if report.changed {
            events.push(GameEvent::EnemyStateChanged {
                enemy: entity_id(entity),
                from: report.previous_state,
                to: report.state,
                at_secs: now,
            });
        }
        if let Some(order) = recorder.order {
            orders.push((entity, order));
        }
    }

    for (entity, order) in orders {
        if let Ok(mut current) = world.get::<&mut MoveOrder>(entity) {
            *current = order;
        }
    }
}

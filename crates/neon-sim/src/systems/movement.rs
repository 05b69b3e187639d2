//! Straight-line movement toward each entity's current order.

use hecs::{Entity, World};

use neon_core::types::Position;

use crate::components::{entity_from_id, MoveOrder};

/// Step every ordered entity toward its goal by `speed * dt`, never
/// overshooting and never dropping below `ground_height`.
pub fn run(world: &mut World, dt: f64, ground_height: f64) {
    let mut moves: Vec<(Entity, Position)> = Vec::new();
    {
        let mut query = world.query::<(&MoveOrder, &Position)>();
        for (entity, (order, pos)) in query.iter() {
            let (goal, speed, stop_within) = match *order {
                MoveOrder::Idle => continue,
                MoveOrder::ToPoint { point, speed } => (point, speed, 0.0),
                MoveOrder::ToEntity {
                    target,
                    acceptance_radius,
                    speed,
                } => {
                    let Some(goal) = entity_from_id(target)
                        .and_then(|e| world.get::<&Position>(e).ok().map(|p| *p))
                    else {
                        continue;
                    };
                    (goal, speed, acceptance_radius)
                }
            };
            let next = step_toward(*pos, goal, speed * dt, stop_within, ground_height);
            if next != *pos {
                moves.push((entity, next));
            }
        }
    }

    for (entity, next) in moves {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = next;
        }
    }
}

pub fn step_toward(
    from: Position,
    goal: Position,
    max_step: f64,
    stop_within: f64,
    ground_height: f64,
) -> Position {
    let here = from.to_dvec3();
    let delta = goal.to_dvec3() - here;
    let remaining = delta.length() - stop_within;
    if remaining <= 0.0 || max_step <= 0.0 {
        return from;
    }

    let step = max_step.min(remaining);
    let mut next = Position::from(here + delta.normalize() * step);
    next.z = next.z.max(ground_height);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_is_capped_by_speed() {
        let next = step_toward(Position::ORIGIN, Position::new(1000.0, 0.0, 0.0), 10.0, 0.0, 0.0);
        assert!((next.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_does_not_overshoot() {
        let next = step_toward(Position::ORIGIN, Position::new(5.0, 0.0, 0.0), 10.0, 0.0, 0.0);
        assert!((next.x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_stops_at_acceptance_radius() {
        let goal = Position::new(100.0, 0.0, 0.0);
        let next = step_toward(Position::new(95.0, 0.0, 0.0), goal, 10.0, 10.0, 0.0);
        assert_eq!(next, Position::new(95.0, 0.0, 0.0));
    }

    #[test]
    fn test_step_is_clamped_to_ground() {
        let next = step_toward(
            Position::new(0.0, 0.0, 5.0),
            Position::new(0.0, 100.0, -500.0),
            50.0,
            0.0,
            0.0,
        );
        assert_eq!(next.z, 0.0);
    }
}

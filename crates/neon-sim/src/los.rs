//! Line of sight against spherical occluders.
//!
//! Sight lines are straight segments. An occluder blocks a segment when the
//! closest point of the segment lies strictly inside its sphere.

use glam::DVec3;
use hecs::World;

use neon_core::types::{EntityId, Position};
use neon_enemy_ai::{LineOfSight, SightLine};

use crate::components::{entity_id, Occluder};

struct Sphere {
    id: EntityId,
    center: DVec3,
    radius: f64,
}

/// Snapshot of every occluder in the world, taken once per tick.
#[derive(Default)]
pub struct OccluderField {
    spheres: Vec<Sphere>,
}

impl OccluderField {
    pub fn from_world(world: &World) -> Self {
        let mut query = world.query::<(&Occluder, &Position)>();
        let spheres = query
            .iter()
            .map(|(entity, (occluder, pos))| Sphere {
                id: entity_id(entity),
                center: pos.to_dvec3(),
                radius: occluder.radius,
            })
            .collect();
        Self { spheres }
    }

    /// Nearest occluder along the segment, ignoring `ignore`.
    pub fn first_blocker(&self, from: &Position, to: &Position, ignore: EntityId) -> Option<EntityId> {
        let start = from.to_dvec3();
        let dir = to.to_dvec3() - start;
        let len_sq = dir.length_squared();

        let mut nearest: Option<(f64, EntityId)> = None;
        for sphere in &self.spheres {
            if sphere.id == ignore {
                continue;
            }
            let t = if len_sq > 0.0 {
                ((sphere.center - start).dot(dir) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let closest = start + dir * t;
            if closest.distance_squared(sphere.center) < sphere.radius * sphere.radius
                && nearest.map_or(true, |(best, _)| t < best)
            {
                nearest = Some((t, sphere.id));
            }
        }
        nearest.map(|(_, id)| id)
    }
}

impl LineOfSight for OccluderField {
    fn trace(&self, from: &Position, to: &Position, target: EntityId) -> Option<SightLine> {
        Some(match self.first_blocker(from, to, target) {
            Some(by) => SightLine::Blocked { by },
            None => SightLine::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with(center: Position, radius: f64) -> (World, OccluderField) {
        let mut world = World::new();
        world.spawn((Occluder { radius }, center));
        let field = OccluderField::from_world(&world);
        (world, field)
    }

    #[test]
    fn test_clear_without_occluders() {
        let field = OccluderField::default();
        let line = field.trace(&Position::ORIGIN, &Position::new(1000.0, 0.0, 0.0), EntityId(99));
        assert_eq!(line, Some(SightLine::Clear));
    }

    #[test]
    fn test_occluder_between_points_blocks() {
        let (_world, field) = field_with(Position::new(500.0, 0.0, 0.0), 100.0);
        let line = field.trace(&Position::ORIGIN, &Position::new(1000.0, 0.0, 0.0), EntityId(99));
        assert!(matches!(line, Some(SightLine::Blocked { .. })));
    }

    #[test]
    fn test_occluder_beside_line_does_not_block() {
        let (_world, field) = field_with(Position::new(500.0, 300.0, 0.0), 100.0);
        let line = field.trace(&Position::ORIGIN, &Position::new(1000.0, 0.0, 0.0), EntityId(99));
        assert_eq!(line, Some(SightLine::Clear));
    }

    #[test]
    fn test_occluder_behind_target_does_not_block() {
        let (_world, field) = field_with(Position::new(1500.0, 0.0, 0.0), 100.0);
        let line = field.trace(&Position::ORIGIN, &Position::new(1000.0, 0.0, 0.0), EntityId(99));
        assert_eq!(line, Some(SightLine::Clear));
    }

    #[test]
    fn test_target_is_not_its_own_occluder() {
        let mut world = World::new();
        let wall = world.spawn((Occluder { radius: 100.0 }, Position::new(500.0, 0.0, 0.0)));
        let field = OccluderField::from_world(&world);
        let line = field.trace(&Position::ORIGIN, &Position::new(1000.0, 0.0, 0.0), entity_id(wall));
        assert_eq!(line, Some(SightLine::Clear));
    }
}

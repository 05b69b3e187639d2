//! Hazard system: damage volumes tick damage onto actors inside them.
//!
//! Each hazard remembers when it last hurt each actor. An actor inside the
//! radius is hurt on entry and then once per `tick_rate_secs`; leaving the
//! volume forgets it, so re-entry hurts immediately.

use hecs::{Entity, World};
use tracing::trace;

use neon_core::enums::HazardType;
use neon_core::events::GameEvent;
use neon_core::types::Position;

use crate::components::{entity_id, Enemy, Hazard, Health, Player};
use crate::systems::combat;

struct HazardHit {
    hazard: Entity,
    kind: HazardType,
    victim: Entity,
    amount: f64,
    source: Position,
}

pub fn run(world: &mut World, now: f64, events: &mut Vec<GameEvent>) {
    // Actors a hazard can hurt: a player with health left and living enemies.
    let mut actors: Vec<(Entity, Position)> = Vec::new();
    for (entity, (_player, health, pos)) in world.query::<(&Player, &Health, &Position)>().iter() {
        if health.current > 0.0 {
            actors.push((entity, *pos));
        }
    }
    for (entity, (enemy, pos)) in world.query::<(&Enemy, &Position)>().iter() {
        if !enemy.controller.agent().is_dead {
            actors.push((entity, *pos));
        }
    }

    let mut hits: Vec<HazardHit> = Vec::new();
    for (hazard_entity, (hazard, pos)) in world.query_mut::<(&mut Hazard, &Position)>() {
        hazard
            .last_damage
            .retain(|victim, _| actors.iter().any(|(actor, _)| actor == victim));
        if !hazard.active {
            continue;
        }

        let spec = hazard.spec;
        let amount = spec.damage_per_second * spec.tick_rate_secs;
        if !(amount > 0.0) {
            continue;
        }
        for &(victim, victim_pos) in &actors {
            if pos.range_to(&victim_pos) > spec.radius {
                hazard.last_damage.remove(&victim);
                continue;
            }
            let due = hazard
                .last_damage
                .get(&victim)
                .map_or(true, |last| now - last >= spec.tick_rate_secs);
            if !due {
                continue;
            }
            hazard.last_damage.insert(victim, now);
            hits.push(HazardHit {
                hazard: hazard_entity,
                kind: spec.kind,
                victim,
                amount,
                source: *pos,
            });
        }
    }

    for hit in hits {
        trace!(kind = %hit.kind, amount = hit.amount, "hazard damage");
        events.push(GameEvent::HazardDamage {
            hazard: entity_id(hit.hazard),
            kind: hit.kind,
            victim: entity_id(hit.victim),
            amount: hit.amount,
        });

        if let Ok(mut health) = world.get::<&mut Health>(hit.victim) {
            health.current = (health.current - hit.amount).max(0.0);
            events.push(GameEvent::PlayerDamaged {
                amount: hit.amount,
                remaining: health.current,
            });
        } else if let Ok(mut enemy) = world.get::<&mut Enemy>(hit.victim) {
            combat::damage_enemy(hit.victim, &mut enemy, hit.amount, hit.source, now, events);
        }
    }
}

//! Player weapon resolution and damage application.

use hecs::{Entity, World};
use tracing::debug;

use neon_core::constants::PLAYER_EYE_HEIGHT;
use neon_core::events::GameEvent;
use neon_core::types::Position;
use neon_enemy_ai::DamageOutcome;

use crate::components::{entity_id, Enemy};
use crate::los::OccluderField;
use crate::weapon::{Weapon, WeaponEvent};

/// Advance the weapon and resolve any shot against the aimed enemy.
pub fn run(
    world: &mut World,
    weapon: &mut Weapon,
    player: Option<Entity>,
    aim: Option<Entity>,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    for event in weapon.update(now) {
        match event {
            WeaponEvent::Fired { ammo_left } => {
                let hit = match (player, aim) {
                    (Some(player), Some(aim)) => resolve_shot(world, weapon, player, aim),
                    _ => None,
                };
                events.push(GameEvent::ShotFired {
                    hit: hit.map(|(entity, _)| entity_id(entity)),
                    ammo_left,
                });
                if let Some((target, source)) = hit {
                    if let Ok(mut enemy) = world.get::<&mut Enemy>(target) {
                        let damage = weapon.stats().damage;
                        damage_enemy(target, &mut enemy, damage, source, now, events);
                    }
                }
            }
            WeaponEvent::ReloadStarted { duration_secs } => {
                events.push(GameEvent::ReloadStarted { duration_secs });
            }
            WeaponEvent::ReloadFinished { ammo } => {
                events.push(GameEvent::ReloadFinished { ammo });
            }
        }
    }
}

/// A shot hits the aimed enemy when it is alive, within weapon range and
/// visible from the player's eye. Returns the enemy and the shooter position.
fn resolve_shot(
    world: &World,
    weapon: &Weapon,
    player: Entity,
    aim: Entity,
) -> Option<(Entity, Position)> {
    let shooter = *world.get::<&Position>(player).ok()?;
    let target_pos = *world.get::<&Position>(aim).ok()?;
    {
        let enemy = world.get::<&Enemy>(aim).ok()?;
        if enemy.controller.agent().is_dead {
            return None;
        }
    }

    let eye = shooter.offset_z(PLAYER_EYE_HEIGHT);
    let aim_point = target_pos.offset_z(PLAYER_EYE_HEIGHT);
    if eye.range_to(&aim_point) > weapon.stats().range {
        return None;
    }
    if OccluderField::from_world(world)
        .first_blocker(&eye, &aim_point, entity_id(aim))
        .is_some()
    {
        return None;
    }
    Some((aim, shooter))
}

/// Damage an enemy through its controller and report what happened.
pub fn damage_enemy(
    entity: Entity,
    enemy: &mut Enemy,
    amount: f64,
    source: Position,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    let id = entity_id(entity);
    let before = enemy.controller.state();
    let outcome = enemy.controller.apply_damage(amount, source, now);
    if outcome == DamageOutcome::Ignored {
        return;
    }
    let after = enemy.controller.state();

    events.push(GameEvent::EnemyDamaged {
        enemy: id,
        amount,
        remaining: enemy.controller.agent().current_health,
        source,
    });
    if after != before {
        events.push(GameEvent::EnemyStateChanged {
            enemy: id,
            from: before,
            to: after,
            at_secs: now,
        });
    }
    if outcome == DamageOutcome::Killed {
        enemy.attacking = false;
        debug!(enemy = %id, "enemy killed");
        events.push(GameEvent::EnemyKilled { enemy: id });
    }
}

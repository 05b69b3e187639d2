//! Per-enemy behavior controller.
//!
//! Wraps the pure FSM with the enemy's runtime record, the update cadence,
//! perception queries, and the movement each state requests. The host calls
//! `on_spawn` once, `on_tick` every frame (the controller throttles itself to
//! its configured interval), `on_damaged` when the enemy is hit, and
//! `on_destroy` when the actor is removed.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use neon_core::enums::EnemyAiState;
use neon_core::types::{EntityId, Position};

use crate::agent::{DamageOutcome, EnemyAgent};
use crate::config::EnemyAiConfig;
use crate::fsm::{self, Perception, TransitionContext};
use crate::services::{LineOfSight, Movement, SightLine};

/// The tracked target as seen by the host this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: EntityId,
    pub position: Position,
}

/// Outcome of one behavior update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: EnemyAiState,
    pub previous_state: EnemyAiState,
    pub changed: bool,
    /// `None` on the update that moved the agent to `Dead`.
    pub perception: Option<Perception>,
    /// Engaged with the target inside attack range.
    pub wants_to_attack: bool,
}

pub struct EnemyBehaviorController {
    config: EnemyAiConfig,
    agent: EnemyAgent,
    state: EnemyAiState,
    previous_state: EnemyAiState,
    rng: ChaCha8Rng,
    next_update_at: f64,
    warned_inert: bool,
}

impl EnemyBehaviorController {
    /// `seed` drives patrol point selection for this enemy only.
    pub fn new(config: EnemyAiConfig, agent: EnemyAgent, seed: u64) -> Self {
        Self {
            config,
            agent,
            state: EnemyAiState::Patrol,
            previous_state: EnemyAiState::Patrol,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_update_at: 0.0,
            warned_inert: false,
        }
    }

    pub fn state(&self) -> EnemyAiState {
        self.state
    }

    pub fn previous_state(&self) -> EnemyAiState {
        self.previous_state
    }

    pub fn agent(&self) -> &EnemyAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut EnemyAgent {
        &mut self.agent
    }

    pub fn config(&self) -> &EnemyAiConfig {
        &self.config
    }

    pub fn last_known_target_position(&self) -> Position {
        self.agent.last_known_target_position
    }

    /// Reset to `Patrol` and schedule the first update for `now`.
    pub fn on_spawn(&mut self, now: f64) {
        self.state = EnemyAiState::Patrol;
        self.previous_state = EnemyAiState::Patrol;
        self.agent.state_change_time = now;
        self.agent.patrol_target = None;
        self.next_update_at = now;
        self.warned_inert = false;
    }

    /// Run one behavior update if the update interval has elapsed.
    ///
    /// Returns `None` when no update ran: not yet due, already dead, or no
    /// target to track.
    pub fn on_tick<L, M>(
        &mut self,
        now: f64,
        target: Option<&Target>,
        sight: &L,
        movement: &mut M,
    ) -> Option<TickReport>
    where
        L: LineOfSight + ?Sized,
        M: Movement + ?Sized,
    {
        if self.state.is_terminal() || now < self.next_update_at {
            return None;
        }
        self.next_update_at = now + self.config.tick_interval_secs;

        if self.agent.is_dead {
            let from = self.state;
            self.change_state(EnemyAiState::Dead, now);
            movement.stop();
            return Some(TickReport {
                state: EnemyAiState::Dead,
                previous_state: from,
                changed: true,
                perception: None,
                wants_to_attack: false,
            });
        }

        let Some(target) = target else {
            if !self.warned_inert {
                warn!("enemy has no target; behavior suspended");
                self.warned_inert = true;
            }
            return None;
        };
        self.warned_inert = false;

        let perception = self.perceive(target, sight);
        let transition = fsm::evaluate(&TransitionContext {
            state: self.state,
            perception,
            health_fraction: self.agent.health_fraction(),
            elapsed_in_state_secs: now - self.agent.state_change_time,
            is_dead: self.agent.is_dead,
            config: &self.config,
        });

        if perception.can_see_target {
            self.agent.last_known_target_position = target.position;
        }

        let from = self.state;
        if transition.changed {
            self.change_state(transition.new_state, now);
        }

        self.update_movement(target, movement);

        Some(TickReport {
            state: self.state,
            previous_state: from,
            changed: transition.changed,
            perception: Some(perception),
            wants_to_attack: self.state == EnemyAiState::Engaged
                && perception.target_in_attack_range,
        })
    }

    /// The enemy was hit by something at `source`. A patrolling enemy starts
    /// investigating immediately. Returns true if the state changed.
    pub fn on_damaged(&mut self, source: Position, now: f64) -> bool {
        if self.state.is_terminal() || self.agent.is_dead {
            return false;
        }

        self.agent.last_known_target_position = source;

        if self.state == EnemyAiState::Patrol {
            self.change_state(EnemyAiState::Investigate, now);
            return true;
        }
        false
    }

    /// Apply damage to the agent. Only a wounding hit notifies the
    /// controller; ignored hits leave state and last-known position alone.
    pub fn apply_damage(&mut self, amount: f64, source: Position, now: f64) -> DamageOutcome {
        let outcome = self.agent.take_damage(amount);
        if outcome == DamageOutcome::Wounded {
            self.on_damaged(source, now);
        }
        outcome
    }

    /// The actor is being removed. Cancels any movement in flight.
    pub fn on_destroy<M: Movement + ?Sized>(&mut self, movement: &mut M) {
        if !self.state.is_terminal() {
            movement.stop();
        }
        debug!(state = ?self.state, "enemy controller destroyed");
    }

    fn perceive<L: LineOfSight + ?Sized>(&self, target: &Target, sight: &L) -> Perception {
        let distance = self.agent.position.range_to(&target.position);

        // Only trace when in detection range; the trace is the expensive part.
        let sight_clear = if distance < self.config.detection_range {
            let eye = self.agent.position.offset_z(self.config.eye_height);
            let target_eye = target.position.offset_z(self.config.eye_height);
            // A trace stopped by the target itself has reached it.
            sight
                .trace(&eye, &target_eye, target.id)
                .map(|line| match line {
                    SightLine::Clear => true,
                    SightLine::Blocked { by } => by == target.id,
                })
        } else {
            Some(false)
        };

        fsm::perceive(distance, sight_clear, &self.config)
    }

    fn change_state(&mut self, new_state: EnemyAiState, now: f64) {
        if new_state == self.state {
            return;
        }
        debug!(from = ?self.state, to = ?new_state, at = now, "enemy state changed");
        self.previous_state = self.state;
        self.state = new_state;
        self.agent.state_change_time = now;
        if new_state != EnemyAiState::Patrol {
            self.agent.patrol_target = None;
        }
    }

    fn update_movement<M: Movement + ?Sized>(&mut self, target: &Target, movement: &mut M) {
        match self.state {
            EnemyAiState::Patrol => {
                let arrived = self.agent.patrol_target.map_or(true, |point| {
                    self.agent.position.horizontal_range_to(&point) <= self.config.arrival_radius
                });
                if arrived {
                    self.agent.patrol_target = Some(self.random_patrol_point());
                }
                if let Some(point) = self.agent.patrol_target {
                    movement.move_to_point(point, self.config.patrol_speed);
                }
            }
            EnemyAiState::Investigate => {
                movement.move_to_point(
                    self.agent.last_known_target_position,
                    self.config.investigate_speed(),
                );
            }
            EnemyAiState::Engaged => {
                movement.move_to_target(
                    target.id,
                    self.config.arrival_radius,
                    self.config.combat_speed,
                );
            }
            EnemyAiState::Retreat => {
                movement.move_to_point(self.retreat_point(), self.config.retreat_speed);
            }
            EnemyAiState::Dead => movement.stop(),
        }
    }

    /// Uniform point on the disc of `patrol_radius` around the agent, at the
    /// agent's height clamped to the ground floor.
    fn random_patrol_point(&mut self) -> Position {
        let angle = self.rng.gen_range(0.0..std::f64::consts::TAU);
        let radius = self.config.patrol_radius * self.rng.gen::<f64>().sqrt();
        let origin = self.agent.position;
        Position::new(
            origin.x + radius * angle.cos(),
            origin.y + radius * angle.sin(),
            origin.z.max(self.config.min_ground_height),
        )
    }

    /// Point `retreat_distance` beyond the agent, directly away from the last-known target position.
    fn retreat_point(&self) -> Position {
        let here = self.agent.position.to_dvec3();
        let away = (here - self.agent.last_known_target_position.to_dvec3()).normalize_or_zero();
        let away = if away == DVec3::ZERO { DVec3::X } else { away };
        let mut point = Position::from(here + away * self.config.retreat_distance);
        point.z = point.z.max(self.config.min_ground_height);
        point
    }
}

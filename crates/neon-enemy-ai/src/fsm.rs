//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions for one enemy from its
//! current state, what it perceives, and its health. No world access:
//! the controller gathers the inputs and applies the result.

use neon_core::enums::EnemyAiState;

use crate::config::EnemyAiConfig;

/// What the enemy perceives of its target on one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub distance_to_target: f64,
    /// In detection range with an unobstructed sight line.
    pub can_see_target: bool,
    pub target_in_attack_range: bool,
}

/// Input to the FSM for a single enemy.
pub struct TransitionContext<'a> {
    pub state: EnemyAiState,
    pub perception: Perception,
    pub health_fraction: f64,
    pub elapsed_in_state_secs: f64,
    pub is_dead: bool,
    pub config: &'a EnemyAiConfig,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub new_state: EnemyAiState,
    pub changed: bool,
}

impl Transition {
    fn stay(state: EnemyAiState) -> Self {
        Self {
            new_state: state,
            changed: false,
        }
    }

    fn to(state: EnemyAiState) -> Self {
        Self {
            new_state: state,
            changed: true,
        }
    }
}

/// Build the perception snapshot from a distance and a sight-line answer.
///
/// `sight_clear` is `None` when the sight query was unavailable, which counts as not visible.
pub fn perceive(distance: f64, sight_clear: Option<bool>, config: &EnemyAiConfig) -> Perception {
    let in_range = distance < config.detection_range;
    Perception {
        distance_to_target: distance,
        can_see_target: in_range && sight_clear.unwrap_or(false),
        target_in_attack_range: distance < config.attack_range,
    }
}

/// Evaluate the FSM for one enemy. Rules are checked in order; first match wins.
pub fn evaluate(ctx: &TransitionContext<'_>) -> Transition {
    // Death overrides everything
    if ctx.is_dead && ctx.state != EnemyAiState::Dead {
        return Transition::to(EnemyAiState::Dead);
    }

    match ctx.state {
        EnemyAiState::Patrol => evaluate_patrol(ctx),
        EnemyAiState::Investigate => evaluate_investigate(ctx),
        EnemyAiState::Engaged => evaluate_engaged(ctx),
        EnemyAiState::Retreat => evaluate_retreat(ctx),
        EnemyAiState::Dead => Transition::stay(EnemyAiState::Dead),
    }
}

fn evaluate_patrol(ctx: &TransitionContext<'_>) -> Transition {
    if ctx.perception.can_see_target {
        return Transition::to(EnemyAiState::Engaged);
    }
    Transition::stay(ctx.state)
}

fn evaluate_investigate(ctx: &TransitionContext<'_>) -> Transition {
    if ctx.perception.can_see_target {
        return Transition::to(EnemyAiState::Engaged);
    }

    if ctx.elapsed_in_state_secs > ctx.config.investigation_duration_secs {
        return Transition::to(EnemyAiState::Patrol);
    }

    Transition::stay(ctx.state)
}

fn evaluate_engaged(ctx: &TransitionContext<'_>) -> Transition {
    let p = &ctx.perception;

    if p.can_see_target && ctx.health_fraction < ctx.config.retreat_health_threshold {
        return Transition::to(EnemyAiState::Retreat);
    }

    if !p.can_see_target && p.distance_to_target > ctx.config.lost_target_distance {
        return Transition::to(EnemyAiState::Investigate);
    }

    Transition::stay(ctx.state)
}

fn evaluate_retreat(ctx: &TransitionContext<'_>) -> Transition {
    let p = &ctx.perception;

    if p.can_see_target && ctx.health_fraction > ctx.config.reengage_health_threshold() {
        return Transition::to(EnemyAiState::Engaged);
    }

    if !p.can_see_target && p.distance_to_target > ctx.config.lost_target_distance {
        return Transition::to(EnemyAiState::Patrol);
    }

    Transition::stay(ctx.state)
}

//! Tests for the enemy behavior FSM and controller.

use std::cell::Cell;

use neon_core::enums::EnemyAiState;
use neon_core::types::{EntityId, Position};

use crate::agent::{DamageOutcome, EnemyAgent};
use crate::config::EnemyAiConfig;
use crate::controller::{EnemyBehaviorController, Target};
use crate::fsm::{evaluate, perceive, TransitionContext};
use crate::services::{LineOfSight, Movement, SightLine};

const PLAYER: EntityId = EntityId(1);

/// Sight service with a fixed answer that counts how often it was asked.
struct ScriptedSight {
    answer: Option<SightLine>,
    traces: Cell<u32>,
}

impl ScriptedSight {
    fn clear() -> Self {
        Self::answering(Some(SightLine::Clear))
    }

    fn answering(answer: Option<SightLine>) -> Self {
        Self {
            answer,
            traces: Cell::new(0),
        }
    }
}

impl LineOfSight for ScriptedSight {
    fn trace(&self, _from: &Position, _to: &Position, _target: EntityId) -> Option<SightLine> {
        self.traces.set(self.traces.get() + 1);
        self.answer
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MoveCall {
    Point(Position, f64),
    Target(EntityId, f64, f64),
    Stop,
}

#[derive(Default)]
struct RecordingMovement {
    calls: Vec<MoveCall>,
}

impl Movement for RecordingMovement {
    fn move_to_point(&mut self, point: Position, speed: f64) {
        self.calls.push(MoveCall::Point(point, speed));
    }

    fn move_to_target(&mut self, target: EntityId, acceptance_radius: f64, speed: f64) {
        self.calls
            .push(MoveCall::Target(target, acceptance_radius, speed));
    }

    fn stop(&mut self) {
        self.calls.push(MoveCall::Stop);
    }
}

fn spawn_at(position: Position) -> EnemyBehaviorController {
    let mut controller =
        EnemyBehaviorController::new(EnemyAiConfig::default(), EnemyAgent::new(position, 100.0), 7);
    controller.on_spawn(0.0);
    controller
}

fn target_at(x: f64) -> Target {
    Target {
        id: PLAYER,
        position: Position::new(x, 0.0, 0.0),
    }
}

/// Drive a fresh controller into `Engaged` against a target 1800 units away.
fn engaged_controller(movement: &mut RecordingMovement) -> EnemyBehaviorController {
    let mut controller = spawn_at(Position::ORIGIN);
    let report = controller
        .on_tick(0.0, Some(&target_at(1800.0)), &ScriptedSight::clear(), movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Engaged);
    controller
}

// ---- Pure FSM ----

fn context(
    config: &EnemyAiConfig,
    state: EnemyAiState,
    distance: f64,
    visible: bool,
    health_fraction: f64,
    elapsed: f64,
) -> TransitionContext<'_> {
    TransitionContext {
        state,
        perception: perceive(distance, Some(visible), config),
        health_fraction,
        elapsed_in_state_secs: elapsed,
        is_dead: false,
        config,
    }
}

#[test]
fn test_fsm_death_overrides_every_state() {
    let config = EnemyAiConfig::default();
    for state in [
        EnemyAiState::Patrol,
        EnemyAiState::Investigate,
        EnemyAiState::Engaged,
        EnemyAiState::Retreat,
    ] {
        let mut ctx = context(&config, state, 100.0, true, 1.0, 0.0);
        ctx.is_dead = true;
        let t = evaluate(&ctx);
        assert!(t.changed);
        assert_eq!(t.new_state, EnemyAiState::Dead);
    }

    let mut ctx = context(&config, EnemyAiState::Dead, 100.0, true, 1.0, 0.0);
    ctx.is_dead = true;
    assert!(!evaluate(&ctx).changed);
}

#[test]
fn test_fsm_perception_requires_range_and_sight() {
    let config = EnemyAiConfig::default();
    assert!(perceive(1999.0, Some(true), &config).can_see_target);
    assert!(!perceive(2000.0, Some(true), &config).can_see_target);
    assert!(!perceive(1000.0, Some(false), &config).can_see_target);
    // Unavailable query counts as not visible
    assert!(!perceive(1000.0, None, &config).can_see_target);
    assert!(perceive(499.0, None, &config).target_in_attack_range);
    assert!(!perceive(500.0, None, &config).target_in_attack_range);
}

#[test]
fn test_fsm_investigate_timeout_is_strict() {
    let config = EnemyAiConfig::default();
    let at_limit = context(&config, EnemyAiState::Investigate, 5000.0, false, 1.0, 5.0);
    assert!(!evaluate(&at_limit).changed);

    let past_limit = context(&config, EnemyAiState::Investigate, 5000.0, false, 1.0, 5.01);
    assert_eq!(evaluate(&past_limit).new_state, EnemyAiState::Patrol);
}

#[test]
fn test_fsm_investigate_prefers_engaging() {
    let config = EnemyAiConfig::default();
    let ctx = context(&config, EnemyAiState::Investigate, 1000.0, true, 1.0, 60.0);
    assert_eq!(evaluate(&ctx).new_state, EnemyAiState::Engaged);
}

#[test]
fn test_fsm_engaged_keeps_unseen_target_inside_lost_distance() {
    let config = EnemyAiConfig::default();
    let ctx = context(&config, EnemyAiState::Engaged, 2500.0, false, 1.0, 0.0);
    assert!(!evaluate(&ctx).changed);

    let ctx = context(&config, EnemyAiState::Engaged, 3000.5, false, 1.0, 0.0);
    assert_eq!(evaluate(&ctx).new_state, EnemyAiState::Investigate);
}

#[test]
fn test_fsm_retreat_reengage_needs_strictly_more_than_factor() {
    let config = EnemyAiConfig::default();
    let hf = config.reengage_health_threshold();
    let ctx = context(&config, EnemyAiState::Retreat, 1000.0, true, hf, 0.0);
    assert!(!evaluate(&ctx).changed);

    let ctx = context(&config, EnemyAiState::Retreat, 1000.0, true, hf + 0.01, 0.0);
    assert_eq!(evaluate(&ctx).new_state, EnemyAiState::Engaged);
}

// ---- Controller ----

#[test]
fn test_patrol_sees_target_engages_in_one_tick() {
    let config = EnemyAiConfig::default();
    assert_eq!(config.detection_range, 2000.0);
    assert_eq!(config.attack_range, 500.0);

    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let target = target_at(1800.0);

    let report = controller
        .on_tick(0.0, Some(&target), &ScriptedSight::clear(), &mut movement)
        .unwrap();

    assert!(report.changed);
    assert_eq!(report.previous_state, EnemyAiState::Patrol);
    assert_eq!(report.state, EnemyAiState::Engaged);
    assert_eq!(controller.previous_state(), EnemyAiState::Patrol);
    assert_eq!(controller.last_known_target_position(), target.position);
    assert!(!report.wants_to_attack);
    assert_eq!(
        movement.calls,
        vec![MoveCall::Target(PLAYER, config.arrival_radius, config.combat_speed)]
    );
}

#[test]
fn test_engaged_in_attack_range_wants_to_attack() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let report = controller
        .on_tick(0.0, Some(&target_at(400.0)), &ScriptedSight::clear(), &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Engaged);
    assert!(report.wants_to_attack);
}

#[test]
fn test_updates_are_throttled_to_interval() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let sight = ScriptedSight::clear();
    let target = target_at(5000.0);

    assert!(controller.on_tick(0.0, Some(&target), &sight, &mut movement).is_some());
    assert!(controller.on_tick(0.1, Some(&target), &sight, &mut movement).is_none());
    assert!(controller.on_tick(0.25, Some(&target), &sight, &mut movement).is_some());
}

#[test]
fn test_blocked_or_unavailable_sight_keeps_patrolling() {
    let mut movement = RecordingMovement::default();
    let target = target_at(1800.0);

    for answer in [None, Some(SightLine::Blocked { by: EntityId(99) })] {
        let mut controller = spawn_at(Position::ORIGIN);
        let sight = ScriptedSight::answering(answer);
        let report = controller
            .on_tick(0.0, Some(&target), &sight, &mut movement)
            .unwrap();
        assert_eq!(report.state, EnemyAiState::Patrol);
        assert!(!report.changed);
        assert_eq!(sight.traces.get(), 1);
    }
}

#[test]
fn test_trace_stopped_by_target_counts_as_seen() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let sight = ScriptedSight::answering(Some(SightLine::Blocked { by: PLAYER }));

    let report = controller
        .on_tick(0.0, Some(&target_at(1800.0)), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Engaged);
    assert!(report.perception.unwrap().can_see_target);
}

#[test]
fn test_no_trace_outside_detection_range() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let sight = ScriptedSight::clear();

    let report = controller
        .on_tick(0.0, Some(&target_at(2500.0)), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Patrol);
    assert_eq!(sight.traces.get(), 0);
}

#[test]
fn test_engaged_retreats_and_reengages_with_hysteresis() {
    let mut movement = RecordingMovement::default();
    let mut controller = engaged_controller(&mut movement);
    let sight = ScriptedSight::clear();
    let target = target_at(1800.0);

    // Drop below 25%: retreat
    controller.agent_mut().current_health = 20.0;
    movement.calls.clear();
    let report = controller
        .on_tick(1.0, Some(&target), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Retreat);
    assert_eq!(
        movement.calls,
        vec![MoveCall::Point(Position::new(-1000.0, 0.0, 0.0), 800.0)]
    );

    // Healed to 30%: above threshold but not above 1.5x, stays in retreat
    controller.agent_mut().current_health = 30.0;
    let report = controller
        .on_tick(2.0, Some(&target), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Retreat);

    // Above 37.5% but target hidden: still retreating
    controller.agent_mut().current_health = 40.0;
    let blocked = ScriptedSight::answering(Some(SightLine::Blocked { by: EntityId(5) }));
    let report = controller
        .on_tick(3.0, Some(&target), &blocked, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Retreat);

    // Above 37.5% and visible: back to engaged
    let report = controller
        .on_tick(4.0, Some(&target), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Engaged);
    assert_eq!(controller.previous_state(), EnemyAiState::Retreat);
}

#[test]
fn test_retreat_speed_exceeds_combat_speed() {
    let config = EnemyAiConfig::default();
    assert!(config.retreat_speed > config.combat_speed);
}

#[test]
fn test_engaged_loses_target_and_investigates_last_known() {
    let mut movement = RecordingMovement::default();
    let mut controller = engaged_controller(&mut movement);
    movement.calls.clear();

    let report = controller
        .on_tick(1.0, Some(&target_at(3500.0)), &ScriptedSight::clear(), &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Investigate);
    // Last-known stays where the target was last seen
    assert_eq!(
        movement.calls,
        vec![MoveCall::Point(Position::new(1800.0, 0.0, 0.0), 450.0)]
    );
}

#[test]
fn test_retreat_loses_target_and_patrols() {
    let mut movement = RecordingMovement::default();
    let mut controller = engaged_controller(&mut movement);
    controller.agent_mut().current_health = 10.0;
    let sight = ScriptedSight::clear();
    controller
        .on_tick(1.0, Some(&target_at(1800.0)), &sight, &mut movement)
        .unwrap();
    assert_eq!(controller.state(), EnemyAiState::Retreat);

    let report = controller
        .on_tick(2.0, Some(&target_at(4000.0)), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Patrol);
}

#[test]
fn test_death_from_any_state_stops_all_movement() {
    let mut movement = RecordingMovement::default();
    let mut controller = engaged_controller(&mut movement);
    let sight = ScriptedSight::clear();
    let target = target_at(1800.0);

    controller.agent_mut().kill();
    movement.calls.clear();

    let report = controller
        .on_tick(1.0, Some(&target), &sight, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Dead);
    assert_eq!(report.previous_state, EnemyAiState::Engaged);
    assert_eq!(movement.calls, vec![MoveCall::Stop]);

    for t in 2..10 {
        assert!(controller
            .on_tick(t as f64, Some(&target), &sight, &mut movement)
            .is_none());
    }
    assert_eq!(movement.calls, vec![MoveCall::Stop]);
    assert!(!controller.on_damaged(Position::ORIGIN, 11.0));
}

#[test]
fn test_lethal_damage_kills_on_next_tick() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();

    assert_eq!(
        controller.apply_damage(150.0, Position::new(10.0, 0.0, 0.0), 0.0),
        DamageOutcome::Killed
    );
    assert_eq!(controller.state(), EnemyAiState::Patrol);

    // Death is checked even without a target
    let report = controller
        .on_tick(0.0, None, &ScriptedSight::clear(), &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Dead);
}

#[test]
fn test_damage_while_patrolling_investigates_immediately() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let source = Position::new(500.0, 500.0, 0.0);

    assert_eq!(controller.apply_damage(10.0, source, 0.5), DamageOutcome::Wounded);
    assert_eq!(controller.state(), EnemyAiState::Investigate);
    assert_eq!(controller.last_known_target_position(), source);

    // Target hidden: keep heading to the damage source
    let hidden = ScriptedSight::answering(Some(SightLine::Blocked { by: EntityId(3) }));
    let report = controller
        .on_tick(1.0, Some(&target_at(1800.0)), &hidden, &mut movement)
        .unwrap();
    assert_eq!(report.state, EnemyAiState::Investigate);
    assert_eq!(movement.calls, vec![MoveCall::Point(source, 450.0)]);
}

#[test]
fn test_harmless_hits_do_not_alert() {
    let mut controller = spawn_at(Position::ORIGIN);
    let before = controller.last_known_target_position();
    let source = Position::new(500.0, 0.0, 0.0);

    for amount in [0.0, -10.0] {
        assert_eq!(
            controller.apply_damage(amount, source, 1.0),
            DamageOutcome::Ignored
        );
    }
    assert_eq!(controller.state(), EnemyAiState::Patrol);
    assert_eq!(controller.agent().current_health, 100.0);
    assert_eq!(controller.last_known_target_position(), before);
}

#[test]
fn test_damage_outside_patrol_only_updates_last_known() {
    let mut movement = RecordingMovement::default();
    let mut controller = engaged_controller(&mut movement);
    let source = Position::new(-300.0, 0.0, 0.0);

    assert!(!controller.on_damaged(source, 0.5));
    assert_eq!(controller.state(), EnemyAiState::Engaged);
    assert_eq!(controller.last_known_target_position(), source);
}

#[test]
fn test_investigation_times_out_to_patrol() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    let sight = ScriptedSight::clear();
    let far = target_at(5000.0);

    controller.on_damaged(Position::new(100.0, 0.0, 0.0), 0.0);

    let report = controller.on_tick(1.0, Some(&far), &sight, &mut movement).unwrap();
    assert_eq!(report.state, EnemyAiState::Investigate);

    let report = controller.on_tick(6.0, Some(&far), &sight, &mut movement).unwrap();
    assert_eq!(report.state, EnemyAiState::Patrol);
}

#[test]
fn test_missing_target_is_inert() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();

    for t in 0..5 {
        assert!(controller
            .on_tick(t as f64, None, &ScriptedSight::clear(), &mut movement)
            .is_none());
    }
    assert_eq!(controller.state(), EnemyAiState::Patrol);
    assert!(movement.calls.is_empty());
}

#[test]
fn test_patrol_points_stay_in_radius_and_above_ground() {
    let origin = Position::new(200.0, -300.0, -50.0);
    let mut controller = spawn_at(origin);
    let mut movement = RecordingMovement::default();
    let sight = ScriptedSight::clear();
    let far = target_at(50_000.0);

    controller.on_tick(0.0, Some(&far), &sight, &mut movement);
    let MoveCall::Point(first, speed) = movement.calls[0].clone() else {
        panic!("expected a patrol point, got {:?}", movement.calls);
    };
    assert_eq!(speed, 300.0);
    assert!(origin.horizontal_range_to(&first) <= 1000.0 + 1e-9);
    assert_eq!(first.z, 0.0);

    // Not yet arrived: the same point is requested again
    controller.on_tick(1.0, Some(&far), &sight, &mut movement);
    if origin.horizontal_range_to(&first) > controller.config().arrival_radius {
        assert_eq!(movement.calls[1], MoveCall::Point(first, 300.0));
    }

    // Arrived: a new point is drawn
    controller.agent_mut().position = first;
    controller.on_tick(2.0, Some(&far), &sight, &mut movement);
    let MoveCall::Point(second, _) = movement.calls[2].clone() else {
        panic!("expected a patrol point");
    };
    assert_ne!(second, first);
}

#[test]
fn test_patrol_points_deterministic_per_seed() {
    let run = || {
        let mut controller = spawn_at(Position::ORIGIN);
        let mut movement = RecordingMovement::default();
        controller.on_tick(0.0, Some(&target_at(9000.0)), &ScriptedSight::clear(), &mut movement);
        movement.calls
    };
    assert_eq!(run(), run());
}

#[test]
fn test_destroy_cancels_movement() {
    let mut controller = spawn_at(Position::ORIGIN);
    let mut movement = RecordingMovement::default();
    controller.on_destroy(&mut movement);
    assert_eq!(movement.calls, vec![MoveCall::Stop]);
}

#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::types::{EntityId, Position, SimTime};

    #[test]
    fn test_default_ai_state_is_patrol() {
        assert_eq!(EnemyAiState::default(), EnemyAiState::Patrol);
        assert!(!EnemyAiState::Patrol.is_terminal());
        assert!(EnemyAiState::Dead.is_terminal());
    }

    #[test]
    fn test_ai_state_serializes_as_variant_name() {
        let json = serde_json::to_string(&EnemyAiState::Investigate).unwrap();
        assert_eq!(json, "\"Investigate\"");
        let back: EnemyAiState = serde_json::from_str("\"Retreat\"").unwrap();
        assert_eq!(back, EnemyAiState::Retreat);
    }

    #[test]
    fn test_hazard_type_names() {
        assert_eq!(HazardType::Cryogenic.to_string(), "Cryogenic");
        assert_eq!(HazardType::default(), HazardType::Thermal);
    }

    #[test]
    fn test_position_ranges() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(300.0, 400.0, 1200.0);
        assert!((a.horizontal_range_to(&b) - 500.0).abs() < 1e-9);
        assert!((a.range_to(&b) - 1300.0).abs() < 1e-9);
        assert_eq!(a.offset_z(ENEMY_EYE_HEIGHT).z, ENEMY_EYE_HEIGHT);
    }

    #[test]
    fn test_position_dvec3_conversion() {
        let p = Position::new(1.5, -2.0, 3.25);
        let v: glam::DVec3 = p.into();
        assert_eq!(Position::from(v), p);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance(DT);
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_game_event_is_tagged() {
        let event = GameEvent::EnemyStateChanged {
            enemy: EntityId(7),
            from: EnemyAiState::Patrol,
            to: EnemyAiState::Engaged,
            at_secs: 1.2,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"EnemyStateChanged\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_retreat_faster_than_combat() {
        assert!(ENEMY_RETREAT_SPEED > ENEMY_COMBAT_SPEED);
        assert!(ENEMY_LOST_TARGET_DISTANCE > ENEMY_DETECTION_RANGE);
    }
}

//! Enemy behavior tunables.
//!
//! Consolidates the per-enemy parameters for the behavior FSM and its
//! movement policy. Passed to the controller at construction.

use serde::{Deserialize, Serialize};

use neon_core::constants::*;

/// Tunables for one enemy's behavior controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAiConfig {
    /// Range within which the target can be spotted.
    pub detection_range: f64,
    /// Range beyond which an unseen target is dropped.
    pub lost_target_distance: f64,
    /// Seconds spent investigating before giving up (s).
    pub investigation_duration_secs: f64,
    /// Range within which the enemy wants to attack.
    pub attack_range: f64,
    /// Eye point height above the actor origin, used for both ends of a sight line.
    pub eye_height: f64,
    pub patrol_speed: f64,
    /// Radius around the current position for random patrol points.
    pub patrol_radius: f64,
    /// Distance at which a move target counts as reached.
    pub arrival_radius: f64,
    /// Lowest z a patrol point may have.
    pub min_ground_height: f64,
    pub combat_speed: f64,
    pub retreat_speed: f64,
    /// Distance a retreating enemy aims past its own position.
    pub retreat_distance: f64,
    /// Health fraction below which an engaged enemy retreats.
    pub retreat_health_threshold: f64,
    /// Seconds between behavior updates.
    pub tick_interval_secs: f64,
}

/// Rejected tunables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("retreat_health_threshold must be in (0, 1), got {0}")]
    ThresholdOutOfRange(f64),

    #[error("lost_target_distance ({lost}) must not be below detection_range ({detection})")]
    LostTargetInsideDetection { lost: f64, detection: f64 },
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            detection_range: ENEMY_DETECTION_RANGE,
            lost_target_distance: ENEMY_LOST_TARGET_DISTANCE,
            investigation_duration_secs: ENEMY_INVESTIGATION_DURATION_SECS,
            attack_range: ENEMY_ATTACK_RANGE,
            eye_height: ENEMY_EYE_HEIGHT,
            patrol_speed: ENEMY_PATROL_SPEED,
            patrol_radius: ENEMY_PATROL_RADIUS,
            arrival_radius: ENEMY_ARRIVAL_RADIUS,
            min_ground_height: ENEMY_MIN_GROUND_HEIGHT,
            combat_speed: ENEMY_COMBAT_SPEED,
            retreat_speed: ENEMY_RETREAT_SPEED,
            retreat_distance: ENEMY_RETREAT_DISTANCE,
            retreat_health_threshold: ENEMY_RETREAT_HEALTH_THRESHOLD,
            tick_interval_secs: ENEMY_TICK_INTERVAL_SECS,
        }
    }
}

impl EnemyAiConfig {
    pub fn investigate_speed(&self) -> f64 {
        self.patrol_speed * ENEMY_INVESTIGATE_SPEED_FACTOR
    }

    /// Health fraction a retreating enemy must exceed to re-engage.
    pub fn reengage_health_threshold(&self) -> f64 {
        self.retreat_health_threshold * ENEMY_REENGAGE_HEALTH_FACTOR
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("detection_range", self.detection_range),
            ("lost_target_distance", self.lost_target_distance),
            ("investigation_duration_secs", self.investigation_duration_secs),
            ("attack_range", self.attack_range),
            ("patrol_speed", self.patrol_speed),
            ("patrol_radius", self.patrol_radius),
            ("arrival_radius", self.arrival_radius),
            ("combat_speed", self.combat_speed),
            ("retreat_speed", self.retreat_speed),
            ("retreat_distance", self.retreat_distance),
            ("tick_interval_secs", self.tick_interval_secs),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let t = self.retreat_health_threshold;
        if !(t > 0.0 && t < 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(t));
        }

        if self.lost_target_distance < self.detection_range {
            return Err(ConfigError::LostTargetInsideDetection {
                lost: self.lost_target_distance,
                detection: self.detection_range,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EnemyAiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.investigate_speed(), 450.0);
        assert!((config.reengage_health_threshold() - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let config = EnemyAiConfig {
            combat_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "combat_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_threshold_outside_unit_interval() {
        let config = EnemyAiConfig {
            retreat_health_threshold: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange(_))
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EnemyAiConfig =
            serde_json::from_str(r#"{ "detection_range": 1500.0 }"#).unwrap();
        assert_eq!(config.detection_range, 1500.0);
        assert_eq!(config.attack_range, ENEMY_ATTACK_RANGE);
    }
}

//! Gameplay constants and tuning defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Enemy perception ---

/// Range within which an enemy can spot its target.
pub const ENEMY_DETECTION_RANGE: f64 = 2000.0;

/// Range beyond which an unseen target counts as lost.
pub const ENEMY_LOST_TARGET_DISTANCE: f64 = 3000.0;

/// Seconds an enemy searches the last-known position before resuming patrol.
pub const ENEMY_INVESTIGATION_DURATION_SECS: f64 = 5.0;

/// Range within which an engaged enemy may attack.
pub const ENEMY_ATTACK_RANGE: f64 = 500.0;

/// Height of the eye point above the actor origin (80% of an 88-unit capsule half height).
pub const ENEMY_EYE_HEIGHT: f64 = 70.4;

// --- Enemy movement ---

pub const ENEMY_PATROL_SPEED: f64 = 300.0;

/// Investigate speed as a multiple of patrol speed.
pub const ENEMY_INVESTIGATE_SPEED_FACTOR: f64 = 1.5;

pub const ENEMY_COMBAT_SPEED: f64 = 600.0;

/// Retreat speed. Must stay above combat speed.
pub const ENEMY_RETREAT_SPEED: f64 = 800.0;

/// Radius around the current position from which patrol points are drawn.
pub const ENEMY_PATROL_RADIUS: f64 = 1000.0;

/// Distance at which a move target counts as reached.
pub const ENEMY_ARRIVAL_RADIUS: f64 = 100.0;

/// How far past its own position a retreating enemy aims.
pub const ENEMY_RETREAT_DISTANCE: f64 = 1000.0;

/// Lowest height a generated patrol point may have.
pub const ENEMY_MIN_GROUND_HEIGHT: f64 = 0.0;

// --- Enemy health ---

pub const ENEMY_MAX_HEALTH: f64 = 100.0;

/// Health fraction below which an engaged enemy retreats.
pub const ENEMY_RETREAT_HEALTH_THRESHOLD: f64 = 0.25;

/// Multiplier on the retreat threshold a retreating enemy must exceed to re-engage.
pub const ENEMY_REENGAGE_HEALTH_FACTOR: f64 = 1.5;

/// Seconds between behavior updates.
pub const ENEMY_TICK_INTERVAL_SECS: f64 = 0.2;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Height of the player's camera above its position; shots are traced from here.
pub const PLAYER_EYE_HEIGHT: f64 = 64.0;

// --- Weapon ---

pub const WEAPON_DAMAGE: f64 = 20.0;

/// Seconds between automatic shots.
pub const WEAPON_FIRE_INTERVAL_SECS: f64 = 0.1;

pub const WEAPON_RANGE: f64 = 10_000.0;

pub const WEAPON_MAGAZINE_SIZE: u32 = 30;

pub const WEAPON_RELOAD_SECS: f64 = 2.0;

// --- District hazards ---

pub const HAZARD_DAMAGE_PER_SECOND: f64 = 10.0;

pub const HAZARD_EFFECT_RADIUS: f64 = 500.0;

/// Seconds between damage applications to the same actor.
pub const HAZARD_DAMAGE_TICK_RATE_SECS: f64 = 1.0;

//! Player weapon with fire-rate and reload deadlines.
//!
//! Timers are explicit deadlines checked by `update(now)`. At most one shot
//! is fired per update. Firing on an empty magazine releases the trigger;
//! reloading is always an explicit request.

use serde::{Deserialize, Serialize};

use neon_core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponStats {
    pub damage: f64,
    /// Minimum seconds between shots.
    pub fire_interval_secs: f64,
    pub range: f64,
    pub magazine_size: u32,
    pub reload_secs: f64,
    /// Keeps firing while the trigger is held. Otherwise one shot per pull.
    pub automatic: bool,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            damage: WEAPON_DAMAGE,
            fire_interval_secs: WEAPON_FIRE_INTERVAL_SECS,
            range: WEAPON_RANGE,
            magazine_size: WEAPON_MAGAZINE_SIZE,
            reload_secs: WEAPON_RELOAD_SECS,
            automatic: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponEvent {
    Fired { ammo_left: u32 },
    ReloadStarted { duration_secs: f64 },
    ReloadFinished { ammo: u32 },
}

#[derive(Debug, Clone)]
pub struct Weapon {
    stats: WeaponStats,
    ammo: u32,
    trigger_held: bool,
    /// Semi-automatic pull not yet answered with a shot.
    pull_pending: bool,
    next_fire_at: f64,
    reload_done_at: Option<f64>,
}

impl Weapon {
    pub fn new(stats: WeaponStats) -> Self {
        Self {
            stats,
            ammo: stats.magazine_size,
            trigger_held: false,
            pull_pending: false,
            next_fire_at: 0.0,
            reload_done_at: None,
        }
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_done_at.is_some()
    }

    pub fn is_firing(&self) -> bool {
        self.trigger_held
    }

    /// Pull the trigger. Ignored while reloading.
    pub fn start_fire(&mut self) -> bool {
        if self.is_reloading() {
            return false;
        }
        self.trigger_held = true;
        self.pull_pending = true;
        true
    }

    pub fn stop_fire(&mut self) {
        self.trigger_held = false;
        self.pull_pending = false;
    }

    /// Begin a reload. Refused when already reloading or the magazine is full.
    pub fn reload(&mut self, now: f64) -> Option<WeaponEvent> {
        if self.is_reloading() || self.ammo == self.stats.magazine_size {
            return None;
        }
        self.stop_fire();
        self.reload_done_at = Some(now + self.stats.reload_secs);
        Some(WeaponEvent::ReloadStarted {
            duration_secs: self.stats.reload_secs,
        })
    }

    pub fn update(&mut self, now: f64) -> Vec<WeaponEvent> {
        let mut events = Vec::new();

        if let Some(done_at) = self.reload_done_at {
            if now < done_at {
                return events;
            }
            self.reload_done_at = None;
            self.ammo = self.stats.magazine_size;
            events.push(WeaponEvent::ReloadFinished { ammo: self.ammo });
        }

        if !self.trigger_held || now < self.next_fire_at {
            return events;
        }
        if !self.stats.automatic && !self.pull_pending {
            return events;
        }

        if self.ammo == 0 {
            self.stop_fire();
            return events;
        }

        self.ammo -= 1;
        self.pull_pending = false;
        self.next_fire_at = now + self.stats.fire_interval_secs;
        events.push(WeaponEvent::Fired {
            ammo_left: self.ammo,
        });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(events: &[WeaponEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, WeaponEvent::Fired { .. }))
            .count()
    }

    #[test]
    fn test_automatic_respects_fire_interval() {
        let mut weapon = Weapon::new(WeaponStats::default());
        weapon.start_fire();

        assert_eq!(fired(&weapon.update(0.0)), 1);
        assert_eq!(fired(&weapon.update(0.05)), 0);
        assert_eq!(fired(&weapon.update(0.1)), 1);
        assert_eq!(weapon.ammo(), WEAPON_MAGAZINE_SIZE - 2);
    }

    #[test]
    fn test_semi_automatic_fires_once_per_pull() {
        let mut weapon = Weapon::new(WeaponStats {
            automatic: false,
            ..Default::default()
        });
        weapon.start_fire();
        assert_eq!(fired(&weapon.update(0.0)), 1);
        assert_eq!(fired(&weapon.update(1.0)), 0);

        weapon.stop_fire();
        weapon.start_fire();
        assert_eq!(fired(&weapon.update(2.0)), 1);
    }

    #[test]
    fn test_empty_magazine_stops_fire_until_reloaded() {
        let mut weapon = Weapon::new(WeaponStats {
            magazine_size: 2,
            reload_secs: 2.0,
            ..Default::default()
        });
        weapon.start_fire();
        weapon.update(0.0);
        assert_eq!(weapon.update(1.0), vec![WeaponEvent::Fired { ammo_left: 0 }]);
        assert!(weapon.is_firing());

        // Dry trigger: released, nothing reloads on its own
        assert!(weapon.update(2.0).is_empty());
        assert!(!weapon.is_firing());
        assert!(!weapon.is_reloading());
        assert!(weapon.update(10.0).is_empty());
        assert_eq!(weapon.ammo(), 0);

        assert_eq!(
            weapon.reload(10.0),
            Some(WeaponEvent::ReloadStarted { duration_secs: 2.0 })
        );
        assert!(weapon.update(11.5).is_empty());
        assert_eq!(
            weapon.update(12.0),
            vec![WeaponEvent::ReloadFinished { ammo: 2 }]
        );
        assert_eq!(weapon.ammo(), 2);
    }

    #[test]
    fn test_trigger_ignored_while_reloading() {
        let mut weapon = Weapon::new(WeaponStats::default());
        weapon.start_fire();
        weapon.update(0.0);
        assert!(weapon.reload(0.5).is_some());
        assert!(!weapon.start_fire());
        assert!(weapon.reload(0.6).is_none());
    }

    #[test]
    fn test_full_magazine_refuses_reload() {
        let mut weapon = Weapon::new(WeaponStats::default());
        assert!(weapon.reload(0.0).is_none());
    }
}

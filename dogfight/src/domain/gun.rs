// Cannon magazine: a two-state machine (ready / reloading) driven by the
// scheduler's clock rather than reading the time itself.

use std::time::{Duration, Instant};

use crate::domain::cannon::Cannon;
use crate::domain::tuning::GunTuning;
use crate::domain::vector::Vector;

#[derive(Debug, Clone, PartialEq)]
pub struct Gun {
    pub capacity: u32,
    pub reload_time: Duration,
    pub damage: i32,
    pub round_speed: f64,
    pub rounds_in_chamber: u32,
    // Set when the chamber is emptied; the reload deadline counts from here.
    pub last_fired: Option<Instant>,
    pub is_reloading: bool,
}

impl Gun {
    pub fn new(tuning: GunTuning) -> Self {
        Self {
            capacity: tuning.capacity,
            reload_time: tuning.reload_time,
            damage: tuning.damage,
            round_speed: tuning.round_speed,
            rounds_in_chamber: tuning.capacity,
            last_fired: None,
            is_reloading: false,
        }
    }

    /// Fires one round from `coordinates` along `angle_of_attack`, or returns
    /// `None` while the chamber is reloading.
    pub fn fire(&mut self, coordinates: Vector, angle_of_attack: f64, now: Instant) -> Option<Cannon> {
        if self.is_reloading || self.rounds_in_chamber == 0 {
            return None;
        }

        self.rounds_in_chamber -= 1;
        if self.rounds_in_chamber == 0 {
            self.last_fired = Some(now);
            self.is_reloading = true;
        }

        Some(Cannon::new(coordinates, angle_of_attack, self.round_speed, self.damage))
    }

    /// Refills the chamber once `reload_time` has strictly elapsed since it was
    /// emptied, or immediately when `force` is set.
    pub fn reload_chamber(&mut self, now: Instant, force: bool) {
        let elapsed = self
            .last_fired
            .is_some_and(|fired| now.saturating_duration_since(fired) > self.reload_time);

        if force || elapsed {
            self.rounds_in_chamber = self.capacity;
            self.is_reloading = false;
        }
    }
}

//! Spawn scheduler
//!
//! Two periodic triggers driven by simulation time. Each trigger carries the
//! generation it was armed under; a trigger from a stopped (or re-armed)
//! generation is refused, so nothing spawns after `stop()` even if the
//! trigger was already produced.

use serde::{Deserialize, Serialize};

use crate::consts::{COIN_SPAWN_INTERVAL, HAZARD_SPAWN_INTERVAL};

/// Slack when comparing accumulated time against an interval
const INTERVAL_EPSILON: f32 = 1e-4;

/// Which spawner entry point a trigger calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Coin,
    Hazard,
}

/// A fired trigger, valid only for the generation that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTrigger {
    pub kind: SpawnKind,
    pub generation: u64,
}

/// Repeating timer counting up to `interval`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicTimer {
    pub interval: f32,
    elapsed: f32,
}

impl PeriodicTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Restart the cadence from zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance by `dt` and return how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed + INTERVAL_EPSILON >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// Owner of the coin and hazard spawn timers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    coin: PeriodicTimer,
    hazard: PeriodicTimer,
    running: bool,
    generation: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// A stopped scheduler with the standard 1s/2s cadence
    pub fn new() -> Self {
        Self::with_intervals(COIN_SPAWN_INTERVAL, HAZARD_SPAWN_INTERVAL)
    }

    pub fn with_intervals(coin_interval: f32, hazard_interval: f32) -> Self {
        Self {
            coin: PeriodicTimer::new(coin_interval),
            hazard: PeriodicTimer::new(hazard_interval),
            running: false,
            generation: 0,
        }
    }

    /// Arm both triggers from a fresh cadence
    pub fn start(&mut self) {
        self.coin.reset();
        self.hazard.reset();
        self.running = true;
        self.generation += 1;
        log::debug!("Scheduler armed (generation {})", self.generation);
    }

    /// Cancel both triggers. No-op when already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation += 1;
        log::debug!("Scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a trigger may still act
    pub fn accepts(&self, trigger: &SpawnTrigger) -> bool {
        self.running && trigger.generation == self.generation
    }

    /// Advance both timers; coins fire before hazards within one tick
    pub fn advance(&mut self, dt: f32) -> Vec<SpawnTrigger> {
        if !self.running {
            return Vec::new();
        }

        let generation = self.generation;
        let coins = self.coin.advance(dt);
        let hazards = self.hazard.advance(dt);

        let coin_triggers = (0..coins).map(|_| SpawnKind::Coin);
        let hazard_triggers = (0..hazards).map(|_| SpawnKind::Hazard);
        coin_triggers
            .chain(hazard_triggers)
            .map(|kind| SpawnTrigger { kind, generation })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn run(scheduler: &mut Scheduler, ticks: u32) -> Vec<SpawnTrigger> {
        (0..ticks).flat_map(|_| scheduler.advance(SIM_DT)).collect()
    }

    fn count(triggers: &[SpawnTrigger], kind: SpawnKind) -> usize {
        triggers.iter().filter(|t| t.kind == kind).count()
    }

    #[test]
    fn test_stopped_scheduler_is_silent() {
        let mut scheduler = Scheduler::new();
        assert!(run(&mut scheduler, 600).is_empty());
    }

    #[test]
    fn test_cadence() {
        let mut scheduler = Scheduler::new();
        scheduler.start();

        // Nothing before the first interval elapses
        assert!(run(&mut scheduler, 59).is_empty());
        let at_one_second = run(&mut scheduler, 1);
        assert_eq!(count(&at_one_second, SpawnKind::Coin), 1);
        assert_eq!(count(&at_one_second, SpawnKind::Hazard), 0);

        let rest = run(&mut scheduler, 60 * 5);
        assert_eq!(count(&rest, SpawnKind::Coin), 5);
        // Hazards at 2s, 4s, 6s
        assert_eq!(count(&rest, SpawnKind::Hazard), 3);
    }

    #[test]
    fn test_large_step_fires_multiple_times() {
        let mut timer = PeriodicTimer::new(1.0);
        assert_eq!(timer.advance(3.5), 3);
        assert_eq!(timer.advance(0.5), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = Scheduler::new();
        scheduler.start();
        scheduler.stop();
        let after_first = scheduler.clone();
        scheduler.stop();
        assert_eq!(scheduler, after_first);
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_in_flight_trigger_refused_after_stop() {
        let mut scheduler = Scheduler::new();
        scheduler.start();
        let triggers = run(&mut scheduler, 60);
        assert_eq!(triggers.len(), 1);
        assert!(scheduler.accepts(&triggers[0]));

        scheduler.stop();
        assert!(!scheduler.accepts(&triggers[0]));

        // A fresh start does not revive the old generation either
        scheduler.start();
        assert!(!scheduler.accepts(&triggers[0]));
    }

    #[test]
    fn test_restart_resets_cadence() {
        let mut scheduler = Scheduler::new();
        scheduler.start();
        run(&mut scheduler, 90);
        scheduler.stop();
        scheduler.start();
        // Half a second of leftover progress was discarded
        assert!(run(&mut scheduler, 59).is_empty());
        assert_eq!(run(&mut scheduler, 1).len(), 1);
    }
}

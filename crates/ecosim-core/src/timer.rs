//! Fixed-cadence step trigger driven by the host.
//!
//! The host reports how much wall-clock time has passed; the timer says how
//! many whole periods elapsed and carries the remainder to the next call.
//! Replacing a timer discards its pending remainder, which is how a restart
//! cancels the previous schedule.

use std::time::Duration;

use ecosim_logic::predator_prey::constants::STEP_INTERVAL_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    interval: Duration,
    accumulated: Duration,
}

impl Default for StepTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(STEP_INTERVAL_MS))
    }
}

impl StepTimer {
    /// A timer firing every `interval`. A zero interval is bumped to 1 ms.
    pub fn new(interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated towards the next firing.
    pub fn pending(&self) -> Duration {
        self.accumulated
    }

    /// Feed elapsed time; returns the number of periods that completed.
    ///
    /// Accumulated time saturates at `Duration::MAX`. At most `u32::MAX`
    /// periods are reported per call; any further whole periods stay pending.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let periods = self.accumulated.as_nanos() / self.interval.as_nanos();
        let fired = u32::try_from(periods).unwrap_or(u32::MAX);
        // fired * interval <= accumulated, so neither operation can overflow
        self.accumulated -= self.interval * fired;
        fired
    }
}

//! Predator-prey simulator state machine.
//!
//! The simulator is `Stopped` until the first [`restart`], after which it is
//! `Running` and steps once per timer period as the host reports elapsed
//! time. Restarting replaces the series and the timer together, so there is
//! never more than one schedule stepping the same series.
//!
//! [`restart`]: PredatorPreySimulator::restart

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ecosim_logic::predator_prey::{self, constants, next_populations, Populations};
use ecosim_logic::series::{PopulationSample, PopulationSeries};

use crate::timer::StepTimer;

/// Most steps a single `advance` call will run; older due steps are dropped.
pub const MAX_CATCH_UP_STEPS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulatorState {
    Stopped,
    Running,
}

/// Owned predator-prey simulation with its own step timer.
#[derive(Debug, Clone)]
pub struct PredatorPreySimulator {
    state: SimulatorState,
    series: Option<PopulationSeries>,
    /// Logical time of the most recent sample.
    clock: u64,
    /// Present only while running.
    timer: Option<StepTimer>,
}

impl Default for PredatorPreySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PredatorPreySimulator {
    /// A stopped simulator with no series yet.
    pub fn new() -> Self {
        Self {
            state: SimulatorState::Stopped,
            series: None,
            clock: 0,
            timer: None,
        }
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulatorState::Running
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// The current series, `None` before the first start.
    pub fn series(&self) -> Option<&PopulationSeries> {
        self.series.as_ref()
    }

    /// Time accumulated towards the next automatic step.
    pub fn pending(&self) -> Option<Duration> {
        self.timer.as_ref().map(StepTimer::pending)
    }

    /// Alias of [`restart`](Self::restart).
    pub fn start(&mut self) {
        self.restart();
    }

    /// Cancel any running schedule, reseed the series and start stepping.
    pub fn restart(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("cancelled step timer at t={}", self.clock);
        }

        let seed = Populations::seed();
        self.clock = 0;
        self.series = Some(PopulationSeries::seeded(PopulationSample {
            time: 0,
            prey: seed.prey,
            predators: seed.predators,
        }));
        self.timer = Some(StepTimer::default());
        self.state = SimulatorState::Running;

        log::info!(
            "simulation restarted: prey={} predators={}",
            seed.prey,
            seed.predators
        );
    }

    /// Cancel the schedule. The series stays readable.
    pub fn stop(&mut self) {
        self.timer = None;
        self.state = SimulatorState::Stopped;
        log::info!("simulation stopped at t={}", self.clock);
    }

    /// Advance the model by one step and append the result.
    pub fn step(&mut self) -> Result<PopulationSample, SimulationError> {
        let series = self.series.as_mut().ok_or(SimulationError::NotStarted)?;
        let last = series.last().ok_or(SimulationError::NotStarted)?;
        let next = next_populations(Populations::from(last));

        self.clock += 1;
        let sample = PopulationSample {
            time: self.clock,
            prey: next.prey,
            predators: next.predators,
        };
        if let Some(evicted) = series.push(sample) {
            log::trace!("evicted sample t={}", evicted.time);
        }
        log::debug!(
            "step t={} prey={:.2} predators={:.2}",
            sample.time,
            sample.prey,
            sample.predators
        );
        Ok(sample)
    }

    /// Feed elapsed wall-clock time; performs any steps that fell due.
    ///
    /// Returns the number of steps taken. A stopped simulator ignores time.
    /// After a long gap at most [`MAX_CATCH_UP_STEPS`] are run.
    pub fn advance(&mut self, elapsed: Duration) -> Result<u32, SimulationError> {
        let fired = match self.timer.as_mut() {
            Some(timer) => timer.advance(elapsed),
            None => return Ok(0),
        };
        let due = fired.min(MAX_CATCH_UP_STEPS);
        if due < fired {
            log::warn!(
                "skipping {} overdue steps after a {:?} gap",
                fired - due,
                elapsed
            );
        }
        for _ in 0..due {
            self.step()?;
        }
        Ok(due)
    }

    /// Add predators to the most recent sample without advancing time.
    ///
    /// Returns the new predator count.
    pub fn inject_predators(&mut self, amount: f64) -> Result<f64, SimulationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(rejected(SimulationError::InvalidPredatorAmount(amount)));
        }
        let last = self.last_mut().map_err(rejected)?;
        let updated = predator_prey::inject_predators(Populations::from(&*last), amount);
        if !updated.predators.is_finite() {
            return Err(rejected(SimulationError::PopulationOverflow));
        }
        last.predators = updated.predators;
        log::info!("added {} predators at t={}", amount, last.time);
        Ok(updated.predators)
    }

    /// Scale the most recent prey count by `survival_fraction` in (0, 1).
    ///
    /// Returns the new prey count.
    pub fn apply_prey_disease(&mut self, survival_fraction: f64) -> Result<f64, SimulationError> {
        if !(survival_fraction > 0.0 && survival_fraction < 1.0) {
            return Err(rejected(SimulationError::InvalidSurvivalFraction(
                survival_fraction,
            )));
        }
        let last = self.last_mut().map_err(rejected)?;
        let updated =
            predator_prey::apply_prey_disease(Populations::from(&*last), survival_fraction);
        last.prey = updated.prey;
        log::info!(
            "prey disease at t={}: {:.0}% survive",
            last.time,
            survival_fraction * 100.0
        );
        Ok(updated.prey)
    }

    /// The page's "add foxes" button.
    pub fn add_default_predators(&mut self) -> Result<f64, SimulationError> {
        self.inject_predators(constants::PREDATOR_INJECTION)
    }

    /// The page's "rabbit disease" button.
    pub fn spread_default_disease(&mut self) -> Result<f64, SimulationError> {
        self.apply_prey_disease(constants::DISEASE_SURVIVAL)
    }

    fn last_mut(&mut self) -> Result<&mut PopulationSample, SimulationError> {
        self.series
            .as_mut()
            .and_then(PopulationSeries::last_mut)
            .ok_or(SimulationError::NotStarted)
    }
}

fn rejected(err: SimulationError) -> SimulationError {
    log::warn!("rejected simulation action: {}", err);
    err
}

/// Simulator operation called outside its preconditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// No series exists yet; call `restart` first.
    NotStarted,
    InvalidPredatorAmount(f64),
    InvalidSurvivalFraction(f64),
    /// The perturbation would push a population past `f64::MAX`.
    PopulationOverflow,
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::NotStarted => write!(f, "simulation has not been started"),
            SimulationError::InvalidPredatorAmount(a) => {
                write!(f, "predator amount must be positive, got {}", a)
            }
            SimulationError::InvalidSurvivalFraction(s) => {
                write!(f, "survival fraction must be within (0, 1), got {}", s)
            }
            SimulationError::PopulationOverflow => {
                write!(f, "population would no longer be finite")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

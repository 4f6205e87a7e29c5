//! Scripted scenario for the harness: how long to run and which buttons the
//! simulated learner presses along the way.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Longest host tick a scenario may report (one hour).
pub const MAX_TICK_MS: u64 = 3_600_000;

/// A button press on the simulation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    AddPredators,
    PreyDisease,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledAction {
    /// Host tick after which the action fires (1-based).
    pub at_tick: u32,
    pub action: UserAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Number of host ticks to run.
    pub ticks: u32,
    /// Wall-clock milliseconds reported per host tick.
    pub tick_ms: u64,
    /// Producer energy values fed to the slider, in order.
    pub energy_sweep: Vec<f64>,
    pub actions: Vec<ScheduledAction>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            tick_ms: 500,
            energy_sweep: vec![100.0, 1000.0, 2500.0, 10_000.0],
            actions: vec![
                ScheduledAction {
                    at_tick: 30,
                    action: UserAction::AddPredators,
                },
                ScheduledAction {
                    at_tick: 60,
                    action: UserAction::PreyDisease,
                },
                ScheduledAction {
                    at_tick: 90,
                    action: UserAction::Reset,
                },
            ],
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path)?;
        let config: ScenarioConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.tick_ms == 0 || self.tick_ms > MAX_TICK_MS {
            return Err(HarnessError::Invalid(format!(
                "tick_ms must be within 1..={}, got {}",
                MAX_TICK_MS, self.tick_ms
            )));
        }
        if let Some(bad) = self
            .energy_sweep
            .iter()
            .find(|e| !e.is_finite() || **e < 0.0)
        {
            return Err(HarnessError::Invalid(format!(
                "energy_sweep contains {}",
                bad
            )));
        }
        if let Some(a) = self
            .actions
            .iter()
            .find(|a| a.at_tick == 0 || a.at_tick > self.ticks)
        {
            return Err(HarnessError::Invalid(format!(
                "action {:?} at tick {} is outside 1..={}",
                a.action, a.at_tick, self.ticks
            )));
        }
        Ok(())
    }

    /// Actions scheduled right after `tick`, in file order.
    pub fn actions_at(&self, tick: u32) -> impl Iterator<Item = UserAction> + '_ {
        self.actions
            .iter()
            .filter(move |a| a.at_tick == tick)
            .map(|a| a.action)
    }
}

/// Start-up failure of the harness.
#[derive(Debug)]
pub enum HarnessError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        HarnessError::Json(e)
    }
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Io(e) => write!(f, "IO error: {}", e),
            HarnessError::Json(e) => write!(f, "Scenario parse error: {}", e),
            HarnessError::Invalid(msg) => write!(f, "Invalid scenario: {}", msg),
        }
    }
}

impl std::error::Error for HarnessError {}

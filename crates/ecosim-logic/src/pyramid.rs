//! Energy pyramid: how much energy reaches each trophic level.
//!
//! Only a tenth of the energy at one level is passed on to the next, so the
//! whole pyramid is derived from a single input, the energy captured by the
//! producers. The slider that supplies that input is modelled here too so
//! that its bounds are enforced in one place.

use serde::{Deserialize, Serialize};

/// Fraction of energy passed from one trophic level to the next.
pub const TRANSFER_EFFICIENCY: f64 = 0.1;

/// Number of trophic levels shown in the pyramid.
pub const TROPHIC_LEVELS: usize = 4;

/// Energy (kcal) at each trophic level, producer first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyLevels {
    pub producer: f64,
    pub primary_consumer: f64,
    pub secondary_consumer: f64,
    pub tertiary_consumer: f64,
}

impl EnergyLevels {
    /// Levels as an array, producer first.
    pub fn as_array(&self) -> [f64; TROPHIC_LEVELS] {
        [
            self.producer,
            self.primary_consumer,
            self.secondary_consumer,
            self.tertiary_consumer,
        ]
    }
}

/// Compute the energy at all four trophic levels.
///
/// `producer_energy` must be finite and non-negative; the slider guarantees
/// this for UI input. Use [`try_compute_energy_levels`] for unchecked input.
pub fn compute_energy_levels(producer_energy: f64) -> EnergyLevels {
    let primary = producer_energy * TRANSFER_EFFICIENCY;
    let secondary = producer_energy * TRANSFER_EFFICIENCY * TRANSFER_EFFICIENCY;
    let tertiary =
        producer_energy * TRANSFER_EFFICIENCY * TRANSFER_EFFICIENCY * TRANSFER_EFFICIENCY;
    EnergyLevels {
        producer: producer_energy,
        primary_consumer: primary,
        secondary_consumer: secondary,
        tertiary_consumer: tertiary,
    }
}

/// Checked variant of [`compute_energy_levels`].
pub fn try_compute_energy_levels(producer_energy: f64) -> Result<EnergyLevels, PyramidError> {
    if !producer_energy.is_finite() {
        return Err(PyramidError::NotFinite(producer_energy));
    }
    if producer_energy < 0.0 {
        return Err(PyramidError::Negative(producer_energy));
    }
    Ok(compute_energy_levels(producer_energy))
}

/// Range-bounded producer energy input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySlider {
    pub min: f64,
    pub max: f64,
    value: f64,
}

impl Default for EnergySlider {
    fn default() -> Self {
        Self {
            min: 100.0,
            max: 10_000.0,
            value: 1000.0,
        }
    }
}

impl EnergySlider {
    /// Create a slider; `value` is clamped into `[min, max]`.
    pub fn new(min: f64, max: f64, value: f64) -> Result<Self, PyramidError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(PyramidError::InvalidRange { min, max });
        }
        let mut slider = Self { min, max, value: min };
        slider.set(value)?;
        Ok(slider)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move the slider. Out-of-range values are clamped; NaN and infinities
    /// are rejected and leave the slider where it was.
    pub fn set(&mut self, value: f64) -> Result<f64, PyramidError> {
        if !value.is_finite() {
            return Err(PyramidError::NotFinite(value));
        }
        self.value = value.clamp(self.min, self.max);
        Ok(self.value)
    }

    /// Energy levels for the current slider position.
    pub fn levels(&self) -> EnergyLevels {
        compute_energy_levels(self.value)
    }
}

/// Rejected producer energy input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyramidError {
    NotFinite(f64),
    Negative(f64),
    InvalidRange { min: f64, max: f64 },
}

impl std::fmt::Display for PyramidError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PyramidError::NotFinite(v) => write!(f, "producer energy is not finite: {}", v),
            PyramidError::Negative(v) => write!(f, "producer energy is negative: {}", v),
            PyramidError::InvalidRange { min, max } => {
                write!(f, "invalid slider range: {}..={}", min, max)
            }
        }
    }
}

impl std::error::Error for PyramidError {}

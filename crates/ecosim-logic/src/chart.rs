//! Chart-facing data for the energy pyramid and population graphs.
//!
//! Renderers receive these bundles and draw them as they like; the text
//! here is what the learner reads on the axes, legends and tooltips.

use serde::{Deserialize, Serialize};

use crate::pyramid::{EnergyLevels, TROPHIC_LEVELS};
use crate::series::PopulationSeries;

pub const TROPHIC_LABELS: [&str; TROPHIC_LEVELS] = [
    "Producer",
    "Primary consumer",
    "Secondary consumer",
    "Tertiary consumer",
];

pub const ENERGY_AXIS_TITLE: &str = "Energy (kcal)";
pub const POPULATION_AXIS_TITLE: &str = "Population";
pub const TIME_AXIS_TITLE: &str = "Time";
pub const PREY_LABEL: &str = "Rabbits (prey)";
pub const PREDATOR_LABEL: &str = "Foxes (predators)";

/// Tooltip shown when hovering a pyramid bar.
pub fn energy_tooltip(kcal: f64) -> String {
    format!("Energy: {:.1} kcal", kcal)
}

/// Energy axis tick text; values above 1000 are abbreviated with `k`.
pub fn energy_tick(value: f64) -> String {
    if value > 1000.0 {
        format!("{}k", value / 1000.0)
    } else {
        format!("{}", value)
    }
}

/// Horizontal bar chart, one bar per trophic level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub tooltips: Vec<String>,
}

impl From<&EnergyLevels> for PyramidChartData {
    fn from(levels: &EnergyLevels) -> Self {
        let values = levels.as_array().to_vec();
        Self {
            labels: TROPHIC_LABELS.iter().map(|l| l.to_string()).collect(),
            tooltips: values.iter().map(|&v| energy_tooltip(v)).collect(),
            values,
        }
    }
}

/// Two line traces over a shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationChartData {
    pub times: Vec<u64>,
    pub prey: Vec<f64>,
    pub predators: Vec<f64>,
}

impl PopulationChartData {
    pub fn empty() -> Self {
        Self {
            times: Vec::new(),
            prey: Vec::new(),
            predators: Vec::new(),
        }
    }
}

impl From<&PopulationSeries> for PopulationChartData {
    fn from(series: &PopulationSeries) -> Self {
        Self {
            times: series.times(),
            prey: series.prey(),
            predators: series.predators(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyramid::compute_energy_levels;
    use crate::series::PopulationSample;

    #[test]
    fn test_energy_tick() {
        assert_eq!(energy_tick(500.0), "500");
        assert_eq!(energy_tick(1000.0), "1000");
        assert_eq!(energy_tick(2000.0), "2k");
        assert_eq!(energy_tick(2500.0), "2.5k");
    }

    #[test]
    fn test_energy_tooltip_one_decimal() {
        assert_eq!(energy_tooltip(1.0), "Energy: 1.0 kcal");
        assert_eq!(energy_tooltip(1234.56), "Energy: 1234.6 kcal");
    }

    #[test]
    fn test_pyramid_chart_data() {
        let data = PyramidChartData::from(&compute_energy_levels(1000.0));
        assert_eq!(data.labels.len(), 4);
        assert_eq!(data.labels[0], "Producer");
        assert_eq!(data.values[0], 1000.0);
        assert_eq!(data.tooltips[0], "Energy: 1000.0 kcal");
        assert_eq!(data.tooltips[3], "Energy: 1.0 kcal");
    }

    #[test]
    fn test_population_chart_data_lengths_match() {
        let mut series = PopulationSeries::seeded(PopulationSample {
            time: 0,
            prey: 1000.0,
            predators: 50.0,
        });
        series.push(PopulationSample {
            time: 1,
            prey: 1000.0,
            predators: 97.5,
        });
        let data = PopulationChartData::from(&series);
        assert_eq!(data.times, vec![0, 1]);
        assert_eq!(data.prey.len(), data.times.len());
        assert_eq!(data.predators, vec![50.0, 97.5]);
    }
}

//! Bounded population time-series.
//!
//! Holds the last [`SERIES_CAPACITY`] samples of the simulation. Each sample
//! carries its own time label, so the time, prey and predator sequences the
//! chart draws always have equal length.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of samples kept; older ones are evicted first.
pub const SERIES_CAPACITY: usize = 50;

/// One point of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub time: u64,
    pub prey: f64,
    pub predators: f64,
}

/// FIFO-bounded sequence of samples with strictly increasing time.
///
/// Serialized as a plain list of samples; deserializing checks the bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PopulationSample>", into = "Vec<PopulationSample>")]
pub struct PopulationSeries {
    samples: VecDeque<PopulationSample>,
}

impl PopulationSeries {
    /// A series holding only the seed sample.
    pub fn seeded(seed: PopulationSample) -> Self {
        let mut samples = VecDeque::with_capacity(SERIES_CAPACITY + 1);
        samples.push_back(seed);
        Self { samples }
    }

    /// Append a sample, evicting the oldest one past capacity.
    ///
    /// Returns the evicted sample, if any.
    pub fn push(&mut self, sample: PopulationSample) -> Option<PopulationSample> {
        debug_assert!(
            self.last().map_or(true, |last| sample.time > last.time),
            "series time must increase"
        );
        self.samples.push_back(sample);
        if self.samples.len() > SERIES_CAPACITY {
            self.samples.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&PopulationSample> {
        self.samples.front()
    }

    pub fn last(&self) -> Option<&PopulationSample> {
        self.samples.back()
    }

    /// Mutable access to the most recent sample, for perturbations.
    pub fn last_mut(&mut self) -> Option<&mut PopulationSample> {
        self.samples.back_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopulationSample> + '_ {
        self.samples.iter()
    }

    pub fn times(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn prey(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.prey).collect()
    }

    pub fn predators(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.predators).collect()
    }
}

impl TryFrom<Vec<PopulationSample>> for PopulationSeries {
    type Error = SeriesError;

    fn try_from(samples: Vec<PopulationSample>) -> Result<Self, Self::Error> {
        if samples.is_empty() {
            return Err(SeriesError::Empty);
        }
        if samples.len() > SERIES_CAPACITY {
            return Err(SeriesError::TooLong(samples.len()));
        }
        if let Some(i) = samples.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(SeriesError::TimeNotIncreasing { index: i + 1 });
        }
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if let Some(s) = samples
            .iter()
            .find(|s| !valid(s.prey) || !valid(s.predators))
        {
            return Err(SeriesError::InvalidPopulation { time: s.time });
        }
        Ok(Self {
            samples: samples.into(),
        })
    }
}

impl From<PopulationSeries> for Vec<PopulationSample> {
    fn from(series: PopulationSeries) -> Self {
        series.samples.into()
    }
}

/// A sample list that cannot form a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesError {
    Empty,
    TooLong(usize),
    TimeNotIncreasing { index: usize },
    InvalidPopulation { time: u64 },
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Empty => write!(f, "series has no samples"),
            SeriesError::TooLong(n) => {
                write!(f, "series has {} samples, limit is {}", n, SERIES_CAPACITY)
            }
            SeriesError::TimeNotIncreasing { index } => {
                write!(f, "time does not increase at sample {}", index)
            }
            SeriesError::InvalidPopulation { time } => {
                write!(f, "negative or non-finite population at t={}", time)
            }
        }
    }
}

impl std::error::Error for SeriesError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: u64) -> PopulationSample {
        PopulationSample {
            time,
            prey: time as f64 * 10.0,
            predators: time as f64,
        }
    }

    #[test]
    fn test_seeded_has_one_sample() {
        let series = PopulationSeries::seeded(sample(0));
        assert_eq!(series.len(), 1);
        assert_eq!(series.first(), series.last());
    }

    #[test]
    fn test_push_below_capacity_keeps_all() {
        let mut series = PopulationSeries::seeded(sample(0));
        for t in 1..SERIES_CAPACITY as u64 {
            assert_eq!(series.push(sample(t)), None);
        }
        assert_eq!(series.len(), SERIES_CAPACITY);
        assert_eq!(series.first().map(|s| s.time), Some(0));
    }

    #[test]
    fn test_push_past_capacity_evicts_oldest() {
        let mut series = PopulationSeries::seeded(sample(0));
        for t in 1..SERIES_CAPACITY as u64 {
            series.push(sample(t));
        }
        let evicted = series.push(sample(SERIES_CAPACITY as u64));
        assert_eq!(evicted.map(|s| s.time), Some(0));
        assert_eq!(series.len(), SERIES_CAPACITY);
        assert_eq!(series.first().map(|s| s.time), Some(1));
        assert_eq!(series.last().map(|s| s.time), Some(SERIES_CAPACITY as u64));
    }

    #[test]
    fn test_parallel_views_match() {
        let mut series = PopulationSeries::seeded(sample(0));
        series.push(sample(1));
        series.push(sample(2));
        assert_eq!(series.times(), vec![0, 1, 2]);
        assert_eq!(series.prey(), vec![0.0, 10.0, 20.0]);
        assert_eq!(series.predators(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_from_samples_checks_bounds() {
        let ok: Vec<_> = (0..3).map(sample).collect();
        assert_eq!(PopulationSeries::try_from(ok).map(|s| s.len()), Ok(3));

        assert_eq!(
            PopulationSeries::try_from(Vec::new()),
            Err(SeriesError::Empty)
        );
        let long: Vec<_> = (0..=SERIES_CAPACITY as u64).map(sample).collect();
        assert_eq!(
            PopulationSeries::try_from(long),
            Err(SeriesError::TooLong(SERIES_CAPACITY + 1))
        );
        let backwards = vec![sample(0), sample(2), sample(2)];
        assert_eq!(
            PopulationSeries::try_from(backwards),
            Err(SeriesError::TimeNotIncreasing { index: 2 })
        );
        let mut negative = sample(1);
        negative.prey = -1.0;
        assert_eq!(
            PopulationSeries::try_from(vec![sample(0), negative]),
            Err(SeriesError::InvalidPopulation { time: 1 })
        );
    }

    #[test]
    fn test_json_round_trip_and_rejection() {
        let mut series = PopulationSeries::seeded(sample(0));
        series.push(sample(1));
        let json = serde_json::to_string(&series).unwrap();
        let back: PopulationSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);

        let unordered = r#"[{"time":3,"prey":1.0,"predators":1.0},{"time":1,"prey":1.0,"predators":1.0}]"#;
        assert!(serde_json::from_str::<PopulationSeries>(unordered).is_err());
    }

    #[test]
    fn test_last_mut_edits_in_place() {
        let mut series = PopulationSeries::seeded(sample(0));
        series.push(sample(1));
        if let Some(last) = series.last_mut() {
            last.predators += 5.0;
        }
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().map(|s| s.predators), Some(6.0));
        assert_eq!(series.first().map(|s| s.predators), Some(0.0));
    }
}

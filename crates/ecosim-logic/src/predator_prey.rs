//! Discrete predator-prey model (rabbits and foxes).
//!
//! A Lotka-Volterra style difference equation advanced one step at a time.
//! Each step depends only on the populations of the step before; there is no
//! randomness. Populations are clamped at zero, which is the only stability
//! guarantee the model makes.

use serde::{Deserialize, Serialize};

use crate::series::PopulationSample;

/// Fixed model constants.
pub mod constants {
    /// Prey growth per step, as a fraction of the prey population.
    pub const PREY_GROWTH_RATE: f64 = 0.1;
    /// Prey lost per prey-predator encounter.
    pub const PREDATION_RATE: f64 = 0.002;
    /// Predators gained per prey-predator encounter.
    pub const PREDATOR_GROWTH_RATE: f64 = 0.001;
    /// Predator deaths per step, as a fraction of the predator population.
    pub const PREDATOR_DEATH_RATE: f64 = 0.05;

    /// Prey population on (re)start.
    pub const SEED_PREY: f64 = 1000.0;
    /// Predator population on (re)start.
    pub const SEED_PREDATORS: f64 = 50.0;

    /// Predators released by the "add foxes" action.
    pub const PREDATOR_INJECTION: f64 = 50.0;
    /// Fraction of prey surviving the "rabbit disease" action.
    pub const DISEASE_SURVIVAL: f64 = 0.3;

    /// Wall-clock milliseconds between automatic steps.
    pub const STEP_INTERVAL_MS: u64 = 500;
}

/// Prey and predator counts at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Populations {
    pub prey: f64,
    pub predators: f64,
}

impl Populations {
    pub fn seed() -> Self {
        Self {
            prey: constants::SEED_PREY,
            predators: constants::SEED_PREDATORS,
        }
    }
}

impl From<&PopulationSample> for Populations {
    fn from(s: &PopulationSample) -> Self {
        Self {
            prey: s.prey,
            predators: s.predators,
        }
    }
}

/// Advance the model by one step.
pub fn next_populations(current: Populations) -> Populations {
    use constants::*;

    let prey = current.prey;
    let predators = current.predators;
    let encounters = prey * predators;

    let new_prey = prey + prey * PREY_GROWTH_RATE - encounters * PREDATION_RATE;
    let new_predators =
        predators + encounters * PREDATOR_GROWTH_RATE - predators * PREDATOR_DEATH_RATE;

    Populations {
        prey: clamp_population(new_prey),
        predators: clamp_population(new_predators),
    }
}

/// Populations cannot go negative or overflow; NaN counts as extinct.
fn clamp_population(value: f64) -> f64 {
    value.max(0.0).min(f64::MAX)
}

/// Add `amount` predators to the current populations.
pub fn inject_predators(current: Populations, amount: f64) -> Populations {
    Populations {
        predators: current.predators + amount,
        ..current
    }
}

/// Scale prey by the fraction that survives a disease outbreak.
pub fn apply_prey_disease(current: Populations, survival_fraction: f64) -> Populations {
    Populations {
        prey: current.prey * survival_fraction,
        ..current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_from_seed() {
        let next = next_populations(Populations::seed());
        assert!((next.prey - 1000.0).abs() < 1e-9);
        assert!((next.predators - 97.5).abs() < 1e-9);
    }

    #[test]
    fn test_step_without_predators_grows_prey() {
        let next = next_populations(Populations {
            prey: 200.0,
            predators: 0.0,
        });
        assert!((next.prey - 220.0).abs() < 1e-9);
        assert_eq!(next.predators, 0.0);
    }

    #[test]
    fn test_step_without_prey_starves_predators() {
        let next = next_populations(Populations {
            prey: 0.0,
            predators: 100.0,
        });
        assert_eq!(next.prey, 0.0);
        assert!((next.predators - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_overpredation_clamps_prey_to_zero() {
        // 1000 * 1000 * 0.002 = 2000 prey eaten from 1100
        let next = next_populations(Populations {
            prey: 1000.0,
            predators: 1000.0,
        });
        assert_eq!(next.prey, 0.0);
        assert!(next.predators > 0.0);
    }

    #[test]
    fn test_non_negative_over_grid() {
        for prey in [0.0, 1.0, 10.0, 500.0, 1000.0, 5000.0, 1e6] {
            for predators in [0.0, 0.5, 50.0, 200.0, 1000.0, 1e5] {
                let mut p = Populations { prey, predators };
                for _ in 0..100 {
                    p = next_populations(p);
                    assert!(p.prey >= 0.0, "prey went negative from {prey}/{predators}");
                    assert!(p.predators >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_huge_populations_stay_finite() {
        let mut p = Populations {
            prey: 1000.0,
            predators: f64::MAX,
        };
        for _ in 0..5 {
            p = next_populations(p);
            assert!(p.prey.is_finite() && p.predators.is_finite());
        }
        assert_eq!(p.prey, 0.0);
    }

    #[test]
    fn test_perturbations() {
        let seed = Populations::seed();
        let more = inject_predators(seed, constants::PREDATOR_INJECTION);
        assert_eq!(more.predators, 100.0);
        assert_eq!(more.prey, 1000.0);

        let sick = apply_prey_disease(seed, constants::DISEASE_SURVIVAL);
        assert!((sick.prey - 300.0).abs() < 1e-9);
        assert_eq!(sick.predators, 50.0);
    }
}

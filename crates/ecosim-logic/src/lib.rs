//! Pure ecosystem logic for EcoSim.
//!
//! This crate contains everything the teaching page computes, independent
//! of any UI toolkit, chart library or timer. Functions take plain data and
//! return results, so they are unit-testable and can be driven by a web
//! front-end, a native GUI or the headless harness alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`chart`] | Labels, tooltip and tick text for the two charts |
//! | [`info_cards`] | Exclusive reveal/hide of concept cards |
//! | [`predator_prey`] | Model constants and the discrete step rule |
//! | [`pyramid`] | Trophic-level energy from producer energy, slider bounds |
//! | [`quiz`] | Question bank, answer checking, scoring, flow |
//! | [`series`] | Bounded population time-series with FIFO eviction |
//!
//! ```
//! use ecosim_logic::predator_prey::{next_populations, Populations};
//! use ecosim_logic::pyramid::compute_energy_levels;
//!
//! let levels = compute_energy_levels(1000.0);
//! assert_eq!(levels.producer, 1000.0);
//!
//! let next = next_populations(Populations { prey: 1000.0, predators: 50.0 });
//! assert!((next.predators - 97.5).abs() < 1e-9);
//! ```

pub mod chart;
pub mod info_cards;
pub mod predator_prey;
pub mod pyramid;
pub mod quiz;
pub mod series;

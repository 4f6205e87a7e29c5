//! Integration tests for the page session.
//!
//! Exercises: host ticks → PredatorPreySimulator → Renderer, with user
//! perturbations interleaved the way the page's buttons would fire them.
//!
//! All tests are pure logic: no real timers, no rendering backend.

use std::time::Duration;

use ecosim_core::prelude::*;
use ecosim_logic::predator_prey::{next_populations, Populations};
use ecosim_logic::series::SERIES_CAPACITY;

// ── Helpers ────────────────────────────────────────────────────────────

const TICK: Duration = Duration::from_millis(500);

fn last_sample(session: &PageSession<&mut RecordingRenderer>) -> (u64, f64, f64) {
    let last = *session.simulator().series().unwrap().last().unwrap();
    (last.time, last.prey, last.predators)
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn test_fifty_one_ticks_fill_and_evict() {
    let mut renderer = RecordingRenderer::default();
    let mut session = PageSession::new(&mut renderer);
    for _ in 0..51 {
        assert_eq!(session.advance(TICK), Ok(1));
    }
    let series = session.simulator().series().unwrap();
    assert_eq!(series.len(), SERIES_CAPACITY);
    assert!(!series.times().contains(&0));
    drop(session);

    let drawn = renderer.population.unwrap();
    assert_eq!(drawn.times.len(), SERIES_CAPACITY);
    assert_eq!(drawn.times.last(), Some(&51));
    assert_eq!(renderer.population_draws, 52);
}

#[test]
fn test_perturbation_between_ticks_feeds_next_step() {
    let mut renderer = RecordingRenderer::default();
    let mut session = PageSession::new(&mut renderer);
    session.advance(TICK).unwrap();
    let (t, prey, predators) = last_sample(&session);
    assert_eq!(t, 1);

    session.add_predators().unwrap();
    session.spread_prey_disease().unwrap();
    let (t_after, prey_after, predators_after) = last_sample(&session);
    assert_eq!(t_after, 1);
    assert!((prey_after - prey * 0.3).abs() < 1e-9);
    assert!((predators_after - (predators + 50.0)).abs() < 1e-9);

    session.advance(TICK).unwrap();
    let expected = next_populations(Populations {
        prey: prey_after,
        predators: predators_after,
    });
    let (t2, prey2, predators2) = last_sample(&session);
    assert_eq!(t2, 2);
    assert!((prey2 - expected.prey).abs() < 1e-9);
    assert!((predators2 - expected.predators).abs() < 1e-9);
}

#[test]
fn test_reset_mid_run_never_double_steps() {
    let mut sim = PredatorPreySimulator::new();
    sim.start();
    sim.advance(Duration::from_millis(1400)).unwrap();
    assert_eq!(sim.clock(), 2);

    for _ in 0..5 {
        sim.restart();
    }
    // One timer only: a single interval yields exactly one step
    assert_eq!(sim.advance(TICK), Ok(1));
    assert_eq!(sim.clock(), 1);
    assert_eq!(sim.series().unwrap().len(), 2);
}

#[test]
fn test_large_elapsed_catches_up() {
    let mut sim = PredatorPreySimulator::new();
    sim.restart();
    assert_eq!(sim.advance(Duration::from_secs(60)), Ok(120));
    assert_eq!(sim.clock(), 120);
    let series = sim.series().unwrap();
    assert_eq!(series.len(), SERIES_CAPACITY);
    assert_eq!(series.first().unwrap().time, 71);
    assert!(series.iter().all(|s| s.prey >= 0.0 && s.predators >= 0.0));
}

#[test]
fn test_stop_then_restart() {
    let mut sim = PredatorPreySimulator::new();
    sim.restart();
    sim.step().unwrap();
    sim.stop();
    assert_eq!(sim.state(), SimulatorState::Stopped);
    // Manual stepping still works on the retained series
    assert_eq!(sim.step().map(|s| s.time), Ok(2));

    sim.restart();
    assert!(sim.is_running());
    assert_eq!(sim.series().unwrap().times(), vec![0]);
}

//! EcoSim Headless Simulation Harness
//!
//! Validates the ecosystem models and drives a full page session through a
//! scripted scenario. Runs entirely in-process: no UI, no real timers.
//!
//! Usage:
//!   cargo run -p ecosim-simtest
//!   cargo run -p ecosim-simtest -- --verbose
//!   cargo run -p ecosim-simtest -- --scenario crates/ecosim-simtest/scenarios/outbreak.json --json

mod scenario;

use std::path::PathBuf;
use std::time::Duration;

use ecosim_core::prelude::*;
use ecosim_logic::chart::{energy_tick, PopulationChartData};
use ecosim_logic::info_cards::InfoCards;
use ecosim_logic::predator_prey::constants::STEP_INTERVAL_MS;
use ecosim_logic::predator_prey::{next_populations, Populations};
use ecosim_logic::pyramid::compute_energy_levels;
use ecosim_logic::quiz::{default_questions, Quiz};
use ecosim_logic::series::SERIES_CAPACITY;

use scenario::{HarnessError, ScenarioConfig, UserAction};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Args {
    verbose: bool,
    json: bool,
    scenario: Option<PathBuf>,
}

fn parse_args() -> Result<Args, HarnessError> {
    let mut args = Args {
        verbose: false,
        json: false,
        scenario: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--scenario" => {
                let path = it
                    .next()
                    .ok_or_else(|| HarnessError::Invalid("--scenario needs a path".into()))?;
                args.scenario = Some(PathBuf::from(path));
            }
            other => {
                return Err(HarnessError::Invalid(format!("unknown argument {}", other)));
            }
        }
    }
    Ok(args)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    init_logging(args.verbose);

    let config = match &args.scenario {
        Some(path) => match ScenarioConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("failed to load {}: {}", path.display(), e);
                std::process::exit(2);
            }
        },
        None => ScenarioConfig::default(),
    };

    println!("=== EcoSim Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Energy pyramid
    results.extend(validate_energy_pyramid(&config, args.verbose));

    // 2. Predator-prey model properties
    results.extend(validate_predator_prey());

    // 3. Scripted page session
    let (scenario_results, final_chart) = run_scenario(&config, args.verbose);
    results.extend(scenario_results);

    // 4. Quiz flow
    results.extend(validate_quiz());

    // 5. Info cards
    results.extend(validate_info_cards());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if args.json {
        match serde_json::to_string_pretty(&final_chart) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("could not serialize chart data: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Energy Pyramid ───────────────────────────────────────────────────

fn validate_energy_pyramid(config: &ScenarioConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Energy Pyramid ---");
    let mut results = Vec::new();

    for &energy in &config.energy_sweep {
        let levels = compute_energy_levels(energy).as_array();
        let expected = [energy, energy * 0.1, energy * 0.01, energy * 0.001];
        let ok = levels
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| (a - b).abs() <= 1e-9 * b.abs().max(1.0));
        results.push(TestResult {
            name: format!("pyramid_decay_{}", energy),
            passed: ok,
            detail: format!("{:?}", levels),
        });
        if verbose {
            let ticks: Vec<_> = levels.iter().map(|&v| energy_tick(v)).collect();
            println!("  {:>8} kcal -> {}", energy, ticks.join(" / "));
        }
    }

    let zero = compute_energy_levels(0.0).as_array();
    results.push(TestResult {
        name: "pyramid_zero".into(),
        passed: zero.iter().all(|&v| v == 0.0),
        detail: "zero producer energy gives an empty pyramid".into(),
    });

    results
}

// ── 2. Predator-Prey Model ──────────────────────────────────────────────

fn validate_predator_prey() -> Vec<TestResult> {
    println!("--- Predator-Prey Model ---");
    let mut results = Vec::new();

    let mut sim = PredatorPreySimulator::new();
    sim.restart();
    let seeded = sim
        .series()
        .map(|s| (s.times(), s.prey(), s.predators()))
        .unwrap_or_default();
    results.push(TestResult {
        name: "sim_restart_seed".into(),
        passed: seeded == (vec![0], vec![1000.0], vec![50.0]),
        detail: format!("{:?}", seeded),
    });

    let first = sim.step();
    let first_ok = matches!(first, Ok(s)
        if (s.prey - 1000.0).abs() < 1e-9 && (s.predators - 97.5).abs() < 1e-9);
    results.push(TestResult {
        name: "sim_first_step".into(),
        passed: first_ok,
        detail: format!("{:?}", first),
    });

    for _ in 0..50 {
        if let Err(e) = sim.step() {
            log::error!("step failed: {}", e);
        }
    }
    let (len, oldest) = sim
        .series()
        .map(|s| (s.len(), s.first().map(|f| f.time)))
        .unwrap_or((0, None));
    results.push(TestResult {
        name: "sim_fifo_eviction".into(),
        passed: len == SERIES_CAPACITY && oldest == Some(2),
        detail: format!("len={} oldest_t={:?} after 51 steps", len, oldest),
    });

    let mut sim = PredatorPreySimulator::new();
    sim.restart();
    let predators = sim.add_default_predators();
    let clock_unchanged = sim.clock() == 0 && sim.series().map(|s| s.len()) == Some(1);
    results.push(TestResult {
        name: "sim_inject_predators".into(),
        passed: predators == Ok(100.0) && clock_unchanged,
        detail: format!("{:?}", predators),
    });

    let mut sim = PredatorPreySimulator::new();
    sim.restart();
    let prey = sim.spread_default_disease();
    results.push(TestResult {
        name: "sim_prey_disease".into(),
        passed: matches!(prey, Ok(p) if (p - 300.0).abs() < 1e-9),
        detail: format!("{:?}", prey),
    });

    // Non-negativity over a grid of starting states
    let mut negatives = 0;
    for prey in [0.0, 10.0, 500.0, 1000.0, 5000.0] {
        for predators in [0.0, 10.0, 50.0, 500.0, 5000.0] {
            let mut p = Populations { prey, predators };
            for _ in 0..200 {
                p = next_populations(p);
                if p.prey < 0.0 || p.predators < 0.0 {
                    negatives += 1;
                }
            }
        }
    }
    results.push(TestResult {
        name: "sim_non_negative".into(),
        passed: negatives == 0,
        detail: format!("{} negative populations over 25 runs", negatives),
    });

    results
}

// ── 3. Scripted Session ─────────────────────────────────────────────────

fn run_scenario(config: &ScenarioConfig, verbose: bool) -> (Vec<TestResult>, PopulationChartData) {
    println!("--- Scripted Session ---");
    let mut results = Vec::new();
    let mut renderer = RecordingRenderer::default();
    let tick = Duration::from_millis(config.tick_ms);

    let mut steps = 0u32;
    // Host-side model of the step timer, to check the cadence independently
    let mut expected_steps = 0u64;
    let mut carried_ms = 0u64;
    let mut action_errors = Vec::new();
    let mut min_population = f64::INFINITY;
    let mut max_len = 0usize;
    let mut monotonic = true;

    {
        let mut session = PageSession::new(&mut renderer);

        for &energy in &config.energy_sweep {
            if let Err(e) = session.set_producer_energy(energy) {
                action_errors.push(format!("slider {}: {}", energy, e));
            }
        }

        for t in 1..=config.ticks {
            carried_ms += config.tick_ms;
            expected_steps += carried_ms / STEP_INTERVAL_MS;
            carried_ms %= STEP_INTERVAL_MS;
            match session.advance(tick) {
                Ok(n) => steps += n,
                Err(e) => action_errors.push(format!("tick {}: {}", t, e)),
            }

            for action in config.actions_at(t) {
                let outcome = match action {
                    UserAction::AddPredators => session.add_predators().map(|_| ()),
                    UserAction::PreyDisease => session.spread_prey_disease().map(|_| ()),
                    UserAction::Reset => {
                        carried_ms = 0;
                        session.reset_simulation();
                        Ok(())
                    }
                };
                if let Err(e) = outcome {
                    action_errors.push(format!("tick {} {:?}: {}", t, action, e));
                }
                if verbose {
                    println!("  tick {:>4}: {:?}", t, action);
                }
            }

            if let Some(series) = session.simulator().series() {
                max_len = max_len.max(series.len());
                monotonic &= series.times().windows(2).all(|w| w[1] == w[0] + 1);
                for s in series.iter() {
                    min_population = min_population.min(s.prey.min(s.predators));
                }
            }
        }
    }

    results.push(TestResult {
        name: "session_step_cadence".into(),
        passed: steps as u64 == expected_steps,
        detail: format!("{} steps for {} ticks of {} ms", steps, config.ticks, config.tick_ms),
    });
    results.push(TestResult {
        name: "session_actions_ok".into(),
        passed: action_errors.is_empty(),
        detail: if action_errors.is_empty() {
            "all user actions applied".into()
        } else {
            action_errors.join("; ")
        },
    });
    results.push(TestResult {
        name: "session_series_bounded".into(),
        passed: max_len <= SERIES_CAPACITY,
        detail: format!("max series length {}", max_len),
    });
    results.push(TestResult {
        name: "session_time_contiguous".into(),
        passed: monotonic,
        detail: "time labels increase by one per sample".into(),
    });
    results.push(TestResult {
        name: "session_non_negative".into(),
        passed: min_population >= 0.0,
        detail: format!("smallest population seen {:.3}", min_population),
    });

    let expected_pyramid_draws = 1 + config.energy_sweep.len();
    results.push(TestResult {
        name: "session_pyramid_redraws".into(),
        passed: renderer.pyramid_draws == expected_pyramid_draws,
        detail: format!("{} pyramid redraws", renderer.pyramid_draws),
    });

    let chart = renderer
        .population
        .clone()
        .unwrap_or_else(PopulationChartData::empty);
    if verbose {
        if let (Some(prey), Some(predators)) = (chart.prey.last(), chart.predators.last()) {
            println!(
                "  final t={:?}: rabbits={:.1} foxes={:.1} ({} population redraws)",
                chart.times.last(),
                prey,
                predators,
                renderer.population_draws
            );
        }
    }

    (results, chart)
}

// ── 4. Quiz ─────────────────────────────────────────────────────────────

fn validate_quiz() -> Vec<TestResult> {
    println!("--- Quiz ---");
    let mut results = Vec::new();
    let bank = default_questions();

    let mut quiz = Quiz::new(bank.clone());
    let mut flow_errors = 0;
    for q in &bank {
        if quiz.answer(&q.answer).is_err() || quiz.next().is_err() {
            flow_errors += 1;
        }
    }
    results.push(TestResult {
        name: "quiz_perfect_score".into(),
        passed: flow_errors == 0 && quiz.results() == Some((bank.len() as u32, bank.len())),
        detail: format!("{:?}", quiz.results()),
    });

    quiz.restart();
    let mut wrong_flow_errors = 0;
    for q in &bank {
        let wrong = q.options.iter().find(|o| **o != q.answer);
        let answered = wrong.map_or(false, |w| quiz.answer(w).is_ok());
        if !answered || quiz.next().is_err() {
            wrong_flow_errors += 1;
        }
    }
    results.push(TestResult {
        name: "quiz_zero_score".into(),
        passed: wrong_flow_errors == 0 && quiz.results() == Some((0, bank.len())),
        detail: format!("{:?}", quiz.results()),
    });

    results
}

// ── 5. Info Cards ───────────────────────────────────────────────────────

fn validate_info_cards() -> Vec<TestResult> {
    println!("--- Info Cards ---");
    let mut cards = InfoCards::ecosystem_roles();
    let ids: Vec<String> = cards.ids().to_vec();

    let mut exclusive = true;
    for id in &ids {
        cards.toggle(id);
        exclusive &= cards.revealed() == Some(id.as_str());
    }
    let last = ids.last().cloned().unwrap_or_default();
    let closed = cards.toggle(&last).is_none();

    vec![TestResult {
        name: "cards_exclusive_reveal".into(),
        passed: exclusive && closed,
        detail: format!("{} cards, exclusive={} closes={}", ids.len(), exclusive, closed),
    }]
}

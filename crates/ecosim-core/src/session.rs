//! One page session: every interactive component plus the renderer.
//!
//! Mirrors what the page does on load (draw the pyramid, start the
//! simulation) and routes each user action to its component, redrawing the
//! affected chart afterwards.

use std::time::Duration;

use ecosim_logic::chart::{PopulationChartData, PyramidChartData};
use ecosim_logic::info_cards::InfoCards;
use ecosim_logic::pyramid::{EnergyLevels, EnergySlider, PyramidError};
use ecosim_logic::quiz::{AnswerFeedback, Quiz, QuizError, QuizPhase};

use crate::render::Renderer;
use crate::simulator::{PredatorPreySimulator, SimulationError};

pub struct PageSession<R: Renderer> {
    renderer: R,
    slider: EnergySlider,
    simulator: PredatorPreySimulator,
    quiz: Quiz,
    cards: InfoCards,
}

impl<R: Renderer> PageSession<R> {
    /// Session with the default slider, question bank and cards.
    pub fn new(renderer: R) -> Self {
        Self::with_parts(
            renderer,
            EnergySlider::default(),
            Quiz::default(),
            InfoCards::ecosystem_roles(),
        )
    }

    pub fn with_parts(renderer: R, slider: EnergySlider, quiz: Quiz, cards: InfoCards) -> Self {
        let mut session = Self {
            renderer,
            slider,
            simulator: PredatorPreySimulator::new(),
            quiz,
            cards,
        };
        session.redraw_pyramid();
        session.simulator.start();
        session.redraw_population();
        session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn simulator(&self) -> &PredatorPreySimulator {
        &self.simulator
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn cards(&self) -> &InfoCards {
        &self.cards
    }

    pub fn energy_levels(&self) -> EnergyLevels {
        self.slider.levels()
    }

    // ── Energy pyramid ──────────────────────────────────────────────────

    /// Slider input. Returns the (clamped) value actually applied.
    pub fn set_producer_energy(&mut self, value: f64) -> Result<f64, PyramidError> {
        let applied = self.slider.set(value).map_err(|e| {
            log::warn!("rejected producer energy: {}", e);
            e
        })?;
        self.redraw_pyramid();
        Ok(applied)
    }

    // ── Predator-prey simulation ────────────────────────────────────────

    /// Host tick. Redraws only if at least one step was taken.
    pub fn advance(&mut self, elapsed: Duration) -> Result<u32, SimulationError> {
        let steps = self.simulator.advance(elapsed)?;
        if steps > 0 {
            self.redraw_population();
        }
        Ok(steps)
    }

    pub fn reset_simulation(&mut self) {
        self.simulator.restart();
        self.redraw_population();
    }

    pub fn add_predators(&mut self) -> Result<f64, SimulationError> {
        let predators = self.simulator.add_default_predators()?;
        self.redraw_population();
        Ok(predators)
    }

    pub fn spread_prey_disease(&mut self) -> Result<f64, SimulationError> {
        let prey = self.simulator.spread_default_disease()?;
        self.redraw_population();
        Ok(prey)
    }

    // ── Quiz ────────────────────────────────────────────────────────────

    pub fn answer_question(&mut self, option: &str) -> Result<AnswerFeedback, QuizError> {
        self.quiz.answer(option)
    }

    pub fn next_question(&mut self) -> Result<QuizPhase, QuizError> {
        self.quiz.next().cloned()
    }

    pub fn restart_quiz(&mut self) {
        self.quiz.restart();
    }

    // ── Info cards ──────────────────────────────────────────────────────

    pub fn toggle_card(&mut self, id: &str) -> Option<String> {
        self.cards.toggle(id).map(str::to_string)
    }

    fn redraw_pyramid(&mut self) {
        let data = PyramidChartData::from(&self.slider.levels());
        self.renderer.draw_energy_pyramid(&data);
    }

    fn redraw_population(&mut self) {
        let data = self
            .simulator
            .series()
            .map(PopulationChartData::from)
            .unwrap_or_else(PopulationChartData::empty);
        self.renderer.draw_population(&data);
    }
}

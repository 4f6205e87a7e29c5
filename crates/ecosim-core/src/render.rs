//! Rendering seam between the engine and whatever draws the charts.

use ecosim_logic::chart::{PopulationChartData, PyramidChartData};

/// Redraws the charts from current data. Called after every mutation.
pub trait Renderer {
    fn draw_energy_pyramid(&mut self, data: &PyramidChartData);
    fn draw_population(&mut self, data: &PopulationChartData);
}

/// Keeps the most recent frame of each chart and counts redraws.
///
/// Used by the headless harness and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub pyramid: Option<PyramidChartData>,
    pub population: Option<PopulationChartData>,
    pub pyramid_draws: usize,
    pub population_draws: usize,
}

impl Renderer for RecordingRenderer {
    fn draw_energy_pyramid(&mut self, data: &PyramidChartData) {
        self.pyramid = Some(data.clone());
        self.pyramid_draws += 1;
    }

    fn draw_population(&mut self, data: &PopulationChartData) {
        self.population = Some(data.clone());
        self.population_draws += 1;
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_energy_pyramid(&mut self, data: &PyramidChartData) {
        (**self).draw_energy_pyramid(data);
    }

    fn draw_population(&mut self, data: &PopulationChartData) {
        (**self).draw_population(data);
    }
}

//! A drawing surface that owns at most one live chart.

use thiserror::Error;

use super::series::ChartSeries;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot draw an empty series")]
    EmptySeries,

    #[error("chart backend failed: {0}")]
    Backend(String),
}

/// A drawn chart that holds backend resources until destroyed.
pub trait ChartInstance {
    fn destroy(&mut self);
}

/// Draws a dual-axis chart: price line on the left axis, volume bars on the
/// right axis, each point colored by its trend.
pub trait ChartBackend {
    type Chart: ChartInstance;

    fn draw(&mut self, series: &ChartSeries, title: &str) -> Result<Self::Chart, ChartError>;
}

pub struct ChartCanvas<B: ChartBackend> {
    backend: B,
    current: Option<B::Chart>,
}

impl<B: ChartBackend> ChartCanvas<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// Destroy the bound chart, if any, then draw `series`.
    ///
    /// An empty series is rejected before anything is destroyed.
    pub fn render_chart(&mut self, series: &ChartSeries, title: &str) -> Result<(), ChartError> {
        if series.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        self.clear();
        match self.backend.draw(series, title) {
            Ok(chart) => {
                self.current = Some(chart);
                tracing::debug!(points = series.len(), title, "chart drawn");
                Ok(())
            }
            Err(e) => {
                tracing::error!("chart draw failed: {e}");
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        if let Some(mut chart) = self.current.take() {
            chart.destroy();
        }
    }

    pub fn current(&self) -> Option<&B::Chart> {
        self.current.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartCanvas<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

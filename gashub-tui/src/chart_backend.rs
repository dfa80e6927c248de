//! Terminal chart backend.
//!
//! Drawing a chart here means taking a snapshot of the series; the widget
//! below paints the live snapshot every frame. Destroying a chart marks its
//! snapshot dead so nothing paints it again.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};

use gashub_core::chart::{ChartBackend, ChartError, ChartInstance, Rgb, VOLUME_AXIS_TITLE, VWAP_AXIS_TITLE};
use gashub_core::ChartSeries;

use crate::theme::Theme;

/// Columns reserved on the right for the volume axis.
const VOLUME_AXIS_WIDTH: u16 = 9;

/// Share of the price range the tallest volume bar reaches.
const VOLUME_HEIGHT_SHARE: f64 = 0.4;

#[derive(Debug, Default)]
pub struct TerminalChart {
    generation: u64,
}

impl TerminalChart {
    /// Number of charts drawn so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct ChartHandle {
    pub series: ChartSeries,
    pub title: String,
    pub generation: u64,
    live: bool,
}

impl ChartHandle {
    pub fn is_live(&self) -> bool {
        self.live
    }
}

impl ChartInstance for ChartHandle {
    fn destroy(&mut self) {
        self.live = false;
        tracing::trace!(generation = self.generation, "chart destroyed");
    }
}

impl ChartBackend for TerminalChart {
    type Chart = ChartHandle;

    fn draw(&mut self, series: &ChartSeries, title: &str) -> Result<ChartHandle, ChartError> {
        if series.vwap.len() != series.len()
            || series.volume_k.len() != series.len()
            || series.colors.len() != series.len()
        {
            return Err(ChartError::Backend("series vectors differ in length".into()));
        }
        self.generation += 1;
        Ok(ChartHandle {
            series: series.clone(),
            title: title.to_string(),
            generation: self.generation,
            live: true,
        })
    }
}

/// Distinct colors in first-seen order.
fn palette(colors: &[Rgb]) -> Vec<Rgb> {
    let mut out: Vec<Rgb> = Vec::new();
    for c in colors {
        if !out.contains(c) {
            out.push(*c);
        }
    }
    out
}

/// Dual-axis chart: price line and trend-colored points against the left
/// axis, trend-colored volume bars scaled onto the lower part of the plot
/// with their own labels on the right.
pub struct MarketChart<'a> {
    pub handle: &'a ChartHandle,
    pub theme: &'a Theme,
}

impl Widget for MarketChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(true))
            .title(Span::styled(format!(" {} ", self.handle.title), theme.accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);

        if !self.handle.live || inner.width <= VOLUME_AXIS_WIDTH || inner.height < 4 {
            return;
        }
        let series = &self.handle.series;
        let (Some((p_lo, p_hi)), Some((_, v_hi))) = (series.vwap_bounds(), series.volume_bounds())
        else {
            return;
        };

        let pad = ((p_hi - p_lo) * 0.1).max(0.5);
        let (y_lo, y_hi) = (p_lo - pad, p_hi + pad);
        let bar_scale = if v_hi > 0.0 {
            (y_hi - y_lo) * VOLUME_HEIGHT_SHARE / v_hi
        } else {
            0.0
        };

        let line: Vec<(f64, f64)> = series
            .vwap
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();

        // Bars and points, grouped by color since a dataset has one style.
        let mut bars: Vec<(Rgb, Vec<(f64, f64)>)> = Vec::new();
        let mut points: Vec<(Rgb, Vec<(f64, f64)>)> = Vec::new();
        for color in palette(&series.colors) {
            let idx = || {
                series
                    .colors
                    .iter()
                    .enumerate()
                    .filter(move |(_, c)| **c == color)
                    .map(|(i, _)| i)
            };
            bars.push((
                color,
                idx()
                    .map(|i| (i as f64, y_lo + series.volume_k[i] * bar_scale))
                    .collect(),
            ));
            points.push((color, idx().map(|i| (i as f64, series.vwap[i])).collect()));
        }

        let mut datasets = Vec::new();
        for (color, data) in &bars {
            datasets.push(
                Dataset::default()
                    .marker(Marker::HalfBlock)
                    .graph_type(GraphType::Bar)
                    .style(ratatui::style::Style::default().fg(theme.series_color(*color)))
                    .data(data),
            );
        }
        datasets.push(
            Dataset::default()
                .name(VWAP_AXIS_TITLE)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.muted())
                .data(&line),
        );
        for (color, data) in &points {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(ratatui::style::Style::default().fg(theme.series_color(*color)))
                    .data(data),
            );
        }

        let x_max = (series.len().saturating_sub(1)).max(1) as f64;
        let first = series.labels.first().cloned().unwrap_or_default();
        let last = series.labels.last().cloned().unwrap_or_default();
        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(theme.muted())
                    .bounds([0.0, x_max])
                    .labels(vec![Span::raw(first), Span::raw(last)]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(VWAP_AXIS_TITLE, theme.muted()))
                    .style(theme.muted())
                    .bounds([y_lo, y_hi])
                    .labels(vec![
                        Span::raw(format!("{y_lo:.2}")),
                        Span::raw(format!("{:.2}", (y_lo + y_hi) / 2.0)),
                        Span::raw(format!("{y_hi:.2}")),
                    ]),
            );

        let [plot, axis] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(VOLUME_AXIS_WIDTH)])
                .areas(inner);
        chart.render(plot, buf);
        render_volume_axis(axis, buf, v_hi, theme);
    }
}

/// Right-hand axis: title on top, the tallest bar's value where that bar
/// ends, zero at the bottom.
fn render_volume_axis(area: Rect, buf: &mut Buffer, v_hi: f64, theme: &Theme) {
    let style = theme.muted();
    let width = area.width as usize;
    let title: String = VOLUME_AXIS_TITLE.chars().take(width).collect();
    buf.set_string(area.x, area.y, title, style);

    let bottom = area.y + area.height.saturating_sub(2);
    let top_row = bottom.saturating_sub(
        ((area.height.saturating_sub(2)) as f64 * VOLUME_HEIGHT_SHARE).round() as u16,
    );
    if top_row > area.y {
        buf.set_string(area.x + 1, top_row, format!("{v_hi:.1}"), style);
    }
    buf.set_string(area.x + 1, bottom, "0", style);
}

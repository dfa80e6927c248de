//! Chart backend that emits a JSON description of the dual-axis chart.

use serde::Serialize;

use gashub_core::chart::{ChartBackend, ChartError, ChartInstance, Rgb, VOLUME_AXIS_TITLE, VWAP_AXIS_TITLE};
use gashub_core::ChartSeries;

#[derive(Debug, Clone, Serialize)]
pub struct AxisSpec {
    pub id: &'static str,
    pub position: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSpec {
    pub kind: &'static str,
    pub label: &'static str,
    pub axis: &'static str,
    pub data: Vec<f64>,
    pub colors: Vec<Rgb>,
}

/// Serializable chart: shared labels, a price line on the left axis and
/// volume bars on the right axis.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub axes: Vec<AxisSpec>,
    pub datasets: Vec<DatasetSpec>,
}

impl ChartInstance for ChartSpec {
    fn destroy(&mut self) {
        self.datasets.clear();
    }
}

#[derive(Debug, Default)]
pub struct JsonChart;

impl ChartBackend for JsonChart {
    type Chart = ChartSpec;

    fn draw(&mut self, series: &ChartSeries, title: &str) -> Result<ChartSpec, ChartError> {
        Ok(ChartSpec {
            title: title.to_string(),
            labels: series.labels.clone(),
            axes: vec![
                AxisSpec {
                    id: "price",
                    position: "left",
                    title: VWAP_AXIS_TITLE,
                },
                AxisSpec {
                    id: "volume",
                    position: "right",
                    title: VOLUME_AXIS_TITLE,
                },
            ],
            datasets: vec![
                DatasetSpec {
                    kind: "line",
                    label: "VWAP",
                    axis: "price",
                    data: series.vwap.clone(),
                    colors: series.colors.clone(),
                },
                DatasetSpec {
                    kind: "bar",
                    label: "Volume",
                    axis: "volume",
                    data: series.volume_k.clone(),
                    colors: series.colors.clone(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gashub_core::chart::chart_title;
    use gashub_core::{ChartCanvas, TabId};

    #[test]
    fn spec_carries_both_axes_and_trend_colors() {
        let mut canvas = ChartCanvas::new(JsonChart);
        let series = ChartSeries::from_observations(TabId::DayAhead.dataset());
        canvas
            .render_chart(&series, &chart_title(TabId::DayAhead))
            .unwrap();
        let json = serde_json::to_value(canvas.current().unwrap()).unwrap();

        assert_eq!(json["title"], "Day-ahead Market Data");
        assert_eq!(json["axes"][1]["title"], "Volume (thousands MWh/d)");
        assert_eq!(json["datasets"][0]["data"][0], 62.94);
        assert_eq!(json["datasets"][1]["data"][0], 63.641);
        assert_eq!(json["datasets"][0]["colors"][0], "#28a745");
    }

    #[test]
    fn destroy_empties_datasets() {
        let series = ChartSeries::from_observations(TabId::Weeks.dataset());
        let mut spec = JsonChart.draw(&series, "Weeks Market Data").unwrap();
        spec.destroy();
        assert!(spec.datasets.is_empty());
    }
}

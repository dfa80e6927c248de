//! Observations to a dual-axis chart series.

use serde::Serialize;

use crate::market::{Observation, TabId, Trend};

pub const VWAP_AXIS_TITLE: &str = "VWAP (BGN/MWh)";
pub const VOLUME_AXIS_TITLE: &str = "Volume (thousands MWh/d)";

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lower-case `#rrggbb`.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl Trend {
    /// Point and bar color for this trend.
    pub fn color(self) -> Rgb {
        match self {
            Trend::Positive => Rgb(0x28, 0xa7, 0x45),
            Trend::Negative => Rgb(0xdc, 0x35, 0x45),
            Trend::Neutral => Rgb(0x00, 0x00, 0x00),
        }
    }
}

/// Parallel vectors, one entry per observation, in dataset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub vwap: Vec<f64>,
    /// Volume in thousands of MWh.
    pub volume_k: Vec<f64>,
    pub colors: Vec<Rgb>,
}

impl ChartSeries {
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut series = Self {
            labels: Vec::with_capacity(observations.len()),
            vwap: Vec::with_capacity(observations.len()),
            volume_k: Vec::with_capacity(observations.len()),
            colors: Vec::with_capacity(observations.len()),
        };
        for o in observations {
            series.labels.push(o.period.to_string());
            series.vwap.push(o.vwap);
            series.volume_k.push(o.volume as f64 / 1000.0);
            series.colors.push(o.trend().color());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(min, max)` of the price axis, `None` for an empty series.
    pub fn vwap_bounds(&self) -> Option<(f64, f64)> {
        bounds(&self.vwap)
    }

    pub fn volume_bounds(&self) -> Option<(f64, f64)> {
        bounds(&self.volume_k)
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Tab identifier with its first letter upper-cased, then `Market Data`.
pub fn chart_title(tab: TabId) -> String {
    let id = tab.as_str();
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => format!("{}{} Market Data", first.to_uppercase(), chars.as_str()),
        None => "Market Data".to_string(),
    }
}

//! A single market data point and the trend derived from its change value.

use serde::Serialize;

/// One market data point for a trading period.
///
/// `period` is a display label only: it can be a date, an hour, a week
/// number or a month name, so it is never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub period: &'static str,
    /// Traded quantity in MWh.
    pub volume: u64,
    pub trade_count: u32,
    /// Volume-weighted average price in the base currency.
    pub vwap: f64,
    /// Signed change with its sign prefix (`+0.61`, `-0.17`), `0.00` for no
    /// change, or a placeholder when there is no prior reference.
    pub change: &'static str,
    pub reference: Reference,
}

/// Reference price of the previous period, or the `-` absence marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reference {
    Price(f64),
    Absent,
}

impl Reference {
    pub fn display(&self) -> String {
        match self {
            Reference::Price(p) => format_decimal(*p),
            Reference::Absent => "-".to_string(),
        }
    }
}

impl Observation {
    pub fn trend(&self) -> Trend {
        Trend::classify(self.change)
    }
}

/// Period-over-period direction, derived only from the sign prefix of a
/// change string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    /// `+…` is positive, `-…` is negative, anything else is neutral.
    ///
    /// A bare `"-"` (the absence marker used for reference prices) therefore
    /// classifies as negative. Callers never pass it as a change today.
    pub fn classify(change: &str) -> Self {
        if change.starts_with('+') {
            Trend::Positive
        } else if change.starts_with('-') {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Trend::Positive => "↗",
            Trend::Negative => "↘",
            Trend::Neutral => "=",
        }
    }
}

/// Shortest decimal form of a price: `61.0` prints as `61`, `58.70` as `58.7`.
pub fn format_decimal(value: f64) -> String {
    format!("{value}")
}

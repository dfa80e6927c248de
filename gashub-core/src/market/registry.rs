//! Static dataset registry.
//!
//! Datasets are hard-coded sample data, ordered most-recent first. They are
//! never mutated; every consumer borrows `'static` slices.

use serde::{Deserialize, Serialize};

use super::observation::{Observation, Reference};

/// Time-granularity tab selecting which dataset is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabId {
    #[serde(rename = "intraday")]
    Intraday,
    #[default]
    #[serde(rename = "day-ahead")]
    DayAhead,
    #[serde(rename = "weeks")]
    Weeks,
    #[serde(rename = "months")]
    Months,
}

impl TabId {
    pub const ALL: [TabId; 4] = [TabId::Intraday, TabId::DayAhead, TabId::Weeks, TabId::Months];

    pub fn as_str(self) -> &'static str {
        match self {
            TabId::Intraday => "intraday",
            TabId::DayAhead => "day-ahead",
            TabId::Weeks => "weeks",
            TabId::Months => "months",
        }
    }

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "intraday" => Some(TabId::Intraday),
            "day-ahead" => Some(TabId::DayAhead),
            "weeks" => Some(TabId::Weeks),
            "months" => Some(TabId::Months),
            _ => None,
        }
    }

    /// Unknown identifiers select the day-ahead tab.
    pub fn parse_or_default(id: &str) -> Self {
        Self::parse(id).unwrap_or_default()
    }

    /// Translation key for the tab caption.
    pub fn label_key(self) -> &'static str {
        match self {
            TabId::Intraday => "market.tabs.intraday",
            TabId::DayAhead => "market.tabs.day_ahead",
            TabId::Weeks => "market.tabs.weeks",
            TabId::Months => "market.tabs.months",
        }
    }

    pub fn index(self) -> usize {
        match self {
            TabId::Intraday => 0,
            TabId::DayAhead => 1,
            TabId::Weeks => 2,
            TabId::Months => 3,
        }
    }

    pub fn next(self) -> TabId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> TabId {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn dataset(self) -> &'static [Observation] {
        match self {
            TabId::Intraday => INTRADAY,
            TabId::DayAhead => DAY_AHEAD,
            TabId::Weeks => WEEKS,
            TabId::Months => MONTHS,
        }
    }
}

/// Look up a dataset by its raw tab identifier, falling back to day-ahead.
pub fn get_dataset(tab_id: &str) -> &'static [Observation] {
    TabId::parse_or_default(tab_id).dataset()
}

const fn obs(
    period: &'static str,
    volume: u64,
    trade_count: u32,
    vwap: f64,
    change: &'static str,
    reference: Reference,
) -> Observation {
    Observation {
        period,
        volume,
        trade_count,
        vwap,
        change,
        reference,
    }
}

use super::observation::Reference::{Absent, Price};

static INTRADAY: &[Observation] = &[
    obs("2025-08-26 09:00", 12_500, 45, 63.15, "+0.21", Absent),
    obs("2025-08-26 10:00", 15_800, 52, 63.28, "+0.13", Absent),
    obs("2025-08-26 11:00", 14_200, 48, 63.42, "+0.14", Absent),
    obs("2025-08-26 12:00", 16_800, 55, 63.35, "-0.07", Absent),
    obs("2025-08-26 13:00", 15_200, 49, 63.18, "-0.17", Absent),
];

static DAY_AHEAD: &[Observation] = &[
    obs("2025-08-26", 63_641, 209, 62.94, "+0.61", Absent),
    obs("2025-08-25", 51_759, 151, 62.56, "+0.64", Price(62.58)),
    obs("2025-08-24", 48_932, 134, 62.17, "+0.52", Price(62.58)),
    obs("2025-08-23", 45_123, 128, 61.89, "+3.72", Price(61.89)),
    obs("2025-08-22", 42_567, 119, 61.78, "0.00", Price(61.78)),
    obs("2025-08-21", 39_845, 112, 61.95, "-0.18", Price(61.95)),
    obs("2025-08-20", 37_234, 105, 62.12, "-0.17", Price(62.12)),
];

static WEEKS: &[Observation] = &[
    obs("Week 34", 285_000, 850, 62.45, "+1.23", Price(61.22)),
    obs("Week 33", 272_000, 780, 61.22, "-0.85", Price(62.07)),
    obs("Week 32", 298_000, 920, 62.07, "+2.15", Price(59.92)),
    obs("Week 31", 265_000, 750, 59.92, "-1.08", Price(61.00)),
    obs("Week 30", 281_000, 820, 61.00, "+0.75", Price(60.25)),
];

static MONTHS: &[Observation] = &[
    obs("August 2025", 1_150_000, 3200, 62.15, "+3.45", Price(58.70)),
    obs("July 2025", 1_080_000, 2900, 58.70, "-2.10", Price(60.80)),
    obs("June 2025", 1_120_000, 3100, 60.80, "+1.85", Price(58.95)),
    obs("May 2025", 1_050_000, 2800, 58.95, "-1.25", Price(60.20)),
    obs("April 2025", 1_090_000, 3000, 60.20, "+2.75", Price(57.45)),
];

/// A settled contract shown in the settlement table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettlementContract {
    pub contract: &'static str,
    pub price: f64,
    pub volume: u64,
}

static SETTLEMENT: &[SettlementContract] = &[
    SettlementContract { contract: "DA 27.08.2025", price: 62.94, volume: 63_641 },
    SettlementContract { contract: "WD 26.08.2025", price: 63.18, volume: 15_200 },
    SettlementContract { contract: "WE 30-31.08.2025", price: 61.40, volume: 18_250 },
    SettlementContract { contract: "BOM 08.2025", price: 62.94, volume: 24_600 },
    SettlementContract { contract: "W36 2025", price: 62.70, volume: 41_300 },
    SettlementContract { contract: "M 09.2025", price: 63.85, volume: 96_000 },
    SettlementContract { contract: "M 10.2025", price: 65.10, volume: 88_500 },
    SettlementContract { contract: "Q4 2025", price: 67.25, volume: 154_000 },
];

/// Contracts of the settlement table, in publication order.
pub fn settlement_contracts() -> &'static [SettlementContract] {
    SETTLEMENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tabs_resolve_to_their_dataset() {
        assert_eq!(get_dataset("intraday").len(), 5);
        assert_eq!(get_dataset("day-ahead").len(), 7);
        assert_eq!(get_dataset("weeks")[0].period, "Week 34");
        assert_eq!(get_dataset("months")[0].period, "August 2025");
    }

    #[test]
    fn unknown_tabs_fall_back_to_day_ahead() {
        for id in ["", "weekly", "monthly", "DAY-AHEAD", "intraday ", "<script>"] {
            assert_eq!(
                get_dataset(id).as_ptr(),
                DAY_AHEAD.as_ptr(),
                "tab id {id:?} should fall back"
            );
        }
    }

    #[test]
    fn tab_cycle_round_trips() {
        for tab in TabId::ALL {
            assert_eq!(tab.next().prev(), tab);
            assert_eq!(TabId::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(TabId::Months.next(), TabId::Intraday);
    }

    #[test]
    fn day_ahead_is_most_recent_first() {
        let day_ahead = TabId::DayAhead.dataset();
        for pair in day_ahead.windows(2) {
            assert!(pair[0].period > pair[1].period);
        }
    }

    #[test]
    fn intraday_runs_oldest_first() {
        let intraday = TabId::Intraday.dataset();
        for pair in intraday.windows(2) {
            assert!(pair[0].period < pair[1].period);
        }
    }

    #[test]
    fn settlement_has_duplicate_prices() {
        let prices: Vec<f64> = settlement_contracts().iter().map(|c| c.price).collect();
        let dupes = prices.iter().filter(|p| **p == 62.94).count();
        assert_eq!(dupes, 2);
    }
}

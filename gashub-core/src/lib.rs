//! Gas Hub Core: the market-data presentation pipeline.
//!
//! This crate holds everything the viewers share:
//! - Static market datasets keyed by tab identifier
//! - Table rendering (trend classification, cell formatting)
//! - Sort / filter / pagination over rendered rows
//! - Chart series derivation and the chart-backend seam
//! - Currency conversion against an exchange-rate service
//! - Translations, the date-range calendar, preferences and config

pub mod calendar;
pub mod chart;
pub mod config;
pub mod currency;
pub mod i18n;
pub mod market;
pub mod preferences;
pub mod table;

pub use chart::{ChartBackend, ChartCanvas, ChartInstance, ChartSeries};
pub use config::AppConfig;
pub use currency::{convert_prices, Conversion, CurrencyError, RateSource};
pub use i18n::{Language, Translations};
pub use market::{get_dataset, Observation, TabId, Trend};
pub use table::{DisplayRow, DisplayTables, SortKey, TableView};

#[cfg(test)]
mod tests {
    use super::*;

    /// Rate tables and errors cross the worker channel.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Observation>();
        require_sync::<Observation>();
        require_send::<TableView>();
        require_sync::<TableView>();
        require_send::<ChartSeries>();
        require_sync::<ChartSeries>();
        require_send::<currency::RateTable>();
        require_send::<CurrencyError>();
        require_sync::<Translations>();
    }
}

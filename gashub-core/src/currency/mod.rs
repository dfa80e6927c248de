//! Currency conversion of displayed prices.
//!
//! Rates come from an exchange-rate service behind the [`RateSource`] trait.
//! Conversion rewrites the rendered price cells and headers in place, so it
//! is split in two: [`fetch_rate`] does the network round trip and may run on
//! a worker thread, [`apply_rate`] touches presentation state and runs on the
//! thread that owns it.

pub mod convert;
pub mod rates;

pub use convert::{
    apply_rate, convert_prices, fetch_rate, Conversion, BASE_CURRENCY, CURRENCY_OPTIONS,
};
pub use rates::{
    CurrencyError, HttpRateSource, RateSource, RateTable, StaticRateSource, DEFAULT_ENDPOINT,
};

//! Rescale displayed prices by a fetched rate.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::i18n::{Language, Translations};
use crate::table::render::{settlement_price_header, vwap_header};
use crate::table::{parse_float_prefix, DisplayTables, MARKET_VWAP_COLUMN, SETTLEMENT_PRICE_COLUMN};

use super::rates::{CurrencyError, RateSource};

/// Currency the static datasets are quoted in.
pub const BASE_CURRENCY: &str = "BGN";

/// Currencies offered by the currency menu, base first.
pub const CURRENCY_OPTIONS: [&str; 5] = ["BGN", "EUR", "USD", "GBP", "RON"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Conversion {
    /// Target is the base currency; nothing was fetched or changed.
    Unchanged,
    Converted {
        currency: String,
        rate: f64,
        cells: usize,
    },
}

/// Fetch the base-to-`target` rate.
///
/// Errors are logged here; callers only decide how to surface them.
pub fn fetch_rate(source: &dyn RateSource, target: &str) -> Result<f64, CurrencyError> {
    let result = source.latest(BASE_CURRENCY).and_then(|table| {
        table.rate(target).ok_or_else(|| CurrencyError::MissingRate {
            currency: target.to_string(),
        })
    });
    match &result {
        Ok(rate) => tracing::info!(source = source.name(), target, rate, "exchange rate fetched"),
        Err(e) => tracing::error!(source = source.name(), target, "error converting prices: {e}"),
    }
    result
}

/// Multiply every numeric price cell by `rate` and relabel the price
/// headers with `target`. Returns the number of cells rewritten.
///
/// Operates on the displayed text, so applying twice compounds.
pub fn apply_rate(
    tables: &mut DisplayTables,
    target: &str,
    rate: f64,
    translations: &Translations,
    lang: Language,
) -> usize {
    let mut converted = 0;
    for cell in tables
        .market
        .column_cells_mut(MARKET_VWAP_COLUMN)
        .chain(tables.settlement.column_cells_mut(SETTLEMENT_PRICE_COLUMN))
    {
        if let Some(price) = parse_float_prefix(cell) {
            *cell = format_price(price * rate);
            converted += 1;
        }
    }

    if let Some(h) = tables.market.headers.get_mut(MARKET_VWAP_COLUMN) {
        *h = vwap_header(translations, lang, target);
    }
    if let Some(h) = tables.settlement.headers.get_mut(SETTLEMENT_PRICE_COLUMN) {
        *h = settlement_price_header(translations, lang, target);
    }
    converted
}

/// Two-decimal price text. Ties round away from zero, matching how the
/// exchange's site prints converted prices.
pub fn format_price(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        None => format!("{value:.2}"),
    }
}

/// Fetch then apply. On any failure the tables are left untouched.
pub fn convert_prices(
    tables: &mut DisplayTables,
    target: &str,
    source: &dyn RateSource,
    translations: &Translations,
    lang: Language,
) -> Result<Conversion, CurrencyError> {
    if target == BASE_CURRENCY {
        return Ok(Conversion::Unchanged);
    }
    let rate = fetch_rate(source, target)?;
    let cells = apply_rate(tables, target, rate, translations, lang);
    Ok(Conversion::Converted {
        currency: target.to_string(),
        rate,
        cells,
    })
}

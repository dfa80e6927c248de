//! Observations to display rows, and display rows to table body cells.

use serde::Serialize;

use crate::i18n::{Language, Translations};
use crate::market::observation::format_decimal;
use crate::market::{Observation, SettlementContract, Trend};

use super::{TableRow, TableView};

/// An observation paired with its derived trend and formatted volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub observation: Observation,
    pub trend: Trend,
    pub glyph: &'static str,
    pub volume_text: String,
}

impl DisplayRow {
    pub fn from_observation(observation: &Observation, lang: Language) -> Self {
        let trend = observation.trend();
        Self {
            observation: *observation,
            trend,
            glyph: trend.glyph(),
            volume_text: group_thousands(observation.volume, lang.group_separator()),
        }
    }

    /// Change cell text: the raw change followed by the trend glyph.
    pub fn change_text(&self) -> String {
        format!("{} {}", self.observation.change, self.glyph)
    }

    pub fn cells(&self) -> Vec<String> {
        let o = &self.observation;
        vec![
            o.period.to_string(),
            self.volume_text.clone(),
            o.trade_count.to_string(),
            format_decimal(o.vwap),
            self.change_text(),
            o.reference.display(),
        ]
    }
}

pub fn display_rows(observations: &[Observation], lang: Language) -> Vec<DisplayRow> {
    observations
        .iter()
        .map(|o| DisplayRow::from_observation(o, lang))
        .collect()
}

/// Replace the body of `view` with `rows`, in input order.
pub fn render_table(view: &mut TableView, rows: &[DisplayRow]) {
    let body = rows
        .iter()
        .map(|r| TableRow::new(r.cells(), Some(r.trend)))
        .collect();
    view.set_body(body);
    tracing::debug!(rows = rows.len(), "rendered market table");
}

pub fn render_settlement(view: &mut TableView, contracts: &[SettlementContract], lang: Language) {
    let sep = lang.group_separator();
    let body = contracts
        .iter()
        .map(|c| {
            TableRow::new(
                vec![
                    c.contract.to_string(),
                    format_decimal(c.price),
                    group_thousands(c.volume, sep),
                ],
                None,
            )
        })
        .collect();
    view.set_body(body);
}

/// `63641` with `,` becomes `63,641`.
pub fn group_thousands(value: u64, sep: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

pub fn market_headers(translations: &Translations, lang: Language, currency: &str) -> Vec<String> {
    let plain = |key: &str, fallback: &str| {
        translations.get_or(&format!("market.table.headers.{key}"), lang, &[], || {
            fallback.to_string()
        })
    };
    vec![
        plain("date", "Date"),
        plain("volume", "Volume (MWh)"),
        plain("trades", "Trades"),
        vwap_header(translations, lang, currency),
        plain("change", "Change"),
        plain("reference", "Reference price"),
    ]
}

pub fn settlement_headers(
    translations: &Translations,
    lang: Language,
    currency: &str,
) -> Vec<String> {
    let plain = |key: &str, fallback: &str| {
        translations.get_or(&format!("market.settlement.headers.{key}"), lang, &[], || {
            fallback.to_string()
        })
    };
    vec![
        plain("contract", "Contract"),
        settlement_price_header(translations, lang, currency),
        plain("volume", "Volume (MWh)"),
    ]
}

pub(crate) fn vwap_header(translations: &Translations, lang: Language, currency: &str) -> String {
    translations.get_or(
        "market.table.headers.vwap",
        lang,
        &[("currency", currency)],
        || format!("VWAP ({currency}/MWh)"),
    )
}

pub(crate) fn settlement_price_header(
    translations: &Translations,
    lang: Language,
    currency: &str,
) -> String {
    translations.get_or(
        "market.settlement.headers.price",
        lang,
        &[("currency", currency)],
        || format!("Settlement price ({currency}/MWh)"),
    )
}

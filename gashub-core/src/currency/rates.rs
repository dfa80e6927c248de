//! Exchange-rate snapshots and the HTTP client that fetches them.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.exchangerate-api.com/v4";

#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate service returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("exchange rate not available for {currency}")]
    MissingRate { currency: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Rates relative to one base currency: 1 unit of base = `rates[code]` units
/// of `code`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    /// Usable rate for `currency`; absent, zero and non-finite rates are
    /// treated alike.
    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates
            .get(currency)
            .copied()
            .filter(|r| r.is_finite() && *r != 0.0)
    }
}

/// A source of rate snapshots for a base currency.
pub trait RateSource: Send + Sync {
    fn name(&self) -> &str;

    fn latest(&self, base: &str) -> Result<RateTable, CurrencyError>;
}

/// Fetches `GET {endpoint}/latest/{base}`.
pub struct HttpRateSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpRateSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CurrencyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gashub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CurrencyError::Client(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn latest_url(&self, base: &str) -> String {
        format!("{}/latest/{base}", self.endpoint)
    }
}

impl RateSource for HttpRateSource {
    fn name(&self) -> &str {
        &self.endpoint
    }

    fn latest(&self, base: &str) -> Result<RateTable, CurrencyError> {
        let url = self.latest_url(base);
        tracing::debug!(%url, "fetching exchange rates");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| CurrencyError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CurrencyError::HttpStatus {
                status: status.as_u16(),
            });
        }

        resp.json::<RateTable>()
            .map_err(|e| CurrencyError::ResponseFormatChanged(e.to_string()))
    }
}

/// Fixed snapshot, for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    pub table: RateTable,
}

impl StaticRateSource {
    pub fn new<I, S>(rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            table: RateTable {
                base: None,
                date: None,
                rates: rates.into_iter().map(|(c, r)| (c.into(), r)).collect(),
            },
        }
    }
}

impl RateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static"
    }

    fn latest(&self, _base: &str) -> Result<RateTable, CurrencyError> {
        Ok(self.table.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let json = r#"{"provider":"x","base":"BGN","date":"2025-08-26","time_last_updated":1,
                       "rates":{"BGN":1,"EUR":0.511,"USD":0.59}}"#;
        let table: RateTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.base.as_deref(), Some("BGN"));
        assert_eq!(table.rate("EUR"), Some(0.511));
    }

    #[test]
    fn missing_rates_map_is_a_decode_error() {
        assert!(serde_json::from_str::<RateTable>(r#"{"base":"BGN"}"#).is_err());
    }

    #[test]
    fn zero_and_absent_rates_are_unusable() {
        let src = StaticRateSource::new([("EUR", 0.0), ("RON", f64::NAN), ("USD", 0.59)]);
        assert_eq!(src.table.rate("EUR"), None);
        assert_eq!(src.table.rate("RON"), None);
        assert_eq!(src.table.rate("GBP"), None);
        assert_eq!(src.table.rate("USD"), Some(0.59));
    }

    #[test]
    fn url_joins_endpoint_and_base() {
        let src = HttpRateSource::new("http://localhost:9/v4/", Duration::from_secs(1)).unwrap();
        assert_eq!(src.latest_url("BGN"), "http://localhost:9/v4/latest/BGN");
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let src = HttpRateSource::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        assert!(matches!(
            src.latest("BGN"),
            Err(CurrencyError::NetworkUnreachable(_))
        ));
    }
}

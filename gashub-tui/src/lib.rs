//! Gas Hub TUI: terminal viewer for the Balkan gas-exchange market data.
//!
//! Layout, top to bottom:
//! - Header: tab strip, language, theme, currency, date range
//! - Summary cards: daily price, weekly price, trading volume
//! - Market data: market and settlement tables, or the dual-axis chart
//! - Status bar: key hints and the last message
//!
//! Popups (search, calendar, currency, language, help, error history) and the
//! cookie-consent banner draw over the market-data area.

pub mod app;
pub mod chart_backend;
pub mod dispatch;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppContext;
pub use theme::Theme;

//! Application context, owned by the main thread.
//!
//! Every piece of presentation state lives here: language, theme, active
//! tab and view, the rendered tables, the chart canvas and preferences. The
//! rate worker communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveDateTime};

use gashub_core::calendar::CalendarState;
use gashub_core::chart::chart_title;
use gashub_core::currency::{apply_rate, BASE_CURRENCY, CURRENCY_OPTIONS};
use gashub_core::preferences::{CookieChoice, Preferences, ThemeMode};
use gashub_core::{AppConfig, ChartCanvas, ChartSeries, DisplayTables, Language, TabId, TableView, Translations};

use crate::chart_backend::TerminalChart;
use crate::persistence;
use crate::theme::Theme;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Delay before the consent banner is offered.
pub const COOKIE_BANNER_DELAY: Duration = Duration::from_secs(1);

const ERROR_HISTORY_CAP: usize = 50;

/// Market-data presentation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Table,
    Chart,
}

impl View {
    pub fn toggle(self) -> Self {
        match self {
            View::Table => View::Chart,
            View::Chart => View::Table,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            View::Table => "market.view.table",
            View::Chart => "market.view.chart",
        }
    }
}

/// Which table receives sort, filter and page keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Market,
    Settlement,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Market => Focus::Settlement,
            Focus::Settlement => Focus::Market,
        }
    }
}

/// Popup drawn over the main area. Only one at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Search,
    Calendar,
    Currency,
    Language,
    Help,
    ErrorHistory,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Chart,
    Storage,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Chart => "CHART",
            ErrorCategory::Storage => "IO",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// An entry of the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Cursor of a one-column popup menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub cursor: usize,
}

impl MenuState {
    pub fn up(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn down(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }
}

pub struct AppContext {
    pub running: bool,
    pub config: AppConfig,
    pub translations: Translations,
    pub preferences: Preferences,
    pub theme: Theme,

    pub tab: TabId,
    pub view: View,
    pub focus: Focus,
    pub tables: DisplayTables,
    pub chart: ChartCanvas<TerminalChart>,

    /// Option marked selected in the currency menu.
    pub currency: String,
    /// Currency the price columns are currently expressed in.
    pub price_currency: String,
    pub currency_menu: MenuState,
    pub language_menu: MenuState,
    pub calendar: CalendarState,

    pub overlay: Overlay,
    pub search_input: String,
    pub cookie_banner: bool,
    started_at: Instant,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    /// Where preferences are saved; `None` keeps them in memory only.
    pub state_path: Option<PathBuf>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        translations: Translations,
        preferences: Preferences,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        today: NaiveDate,
        state_path: Option<PathBuf>,
    ) -> Self {
        let tab = config.default_tab();
        let theme = Theme::for_mode(preferences.theme_or(config.display.default_theme));
        let tables = DisplayTables::new(tab, &translations, preferences.language, BASE_CURRENCY);
        let mut app = Self {
            running: true,
            translations,
            preferences,
            theme,
            tab,
            view: View::default(),
            focus: Focus::default(),
            tables,
            chart: ChartCanvas::new(TerminalChart::default()),
            currency: BASE_CURRENCY.to_string(),
            price_currency: BASE_CURRENCY.to_string(),
            currency_menu: MenuState::default(),
            language_menu: MenuState::default(),
            calendar: CalendarState::new(today),
            overlay: Overlay::None,
            search_input: String::new(),
            cookie_banner: false,
            started_at: Instant::now(),
            status_message: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
            worker_tx,
            worker_rx,
            state_path,
            config,
        };
        app.apply_entries_per_page(app.config.display.entries_per_page);
        app.render_chart();
        app
    }

    pub fn language(&self) -> Language {
        self.preferences.language
    }

    /// Translated label, or `fallback` on a miss.
    pub fn t(&self, key: &str, fallback: &str) -> String {
        self.translations
            .get_or(key, self.language(), &[], || fallback.to_string())
    }

    pub fn focused_table(&self) -> &TableView {
        match self.focus {
            Focus::Market => &self.tables.market,
            Focus::Settlement => &self.tables.settlement,
        }
    }

    pub fn focused_table_mut(&mut self) -> &mut TableView {
        match self.focus {
            Focus::Market => &mut self.tables.market,
            Focus::Settlement => &mut self.tables.settlement,
        }
    }

    /// Show `tab`: re-render both tables from base values and redraw the
    /// chart. The entries-per-page choices carry over; filters, sort order
    /// and any conversion do not.
    pub fn switch_tab(&mut self, tab: TabId) {
        let market_pp = self.tables.market.pagination().per_page;
        let settlement_pp = self.tables.settlement.pagination().per_page;
        self.tab = tab;
        self.tables = DisplayTables::new(tab, &self.translations, self.language(), BASE_CURRENCY);
        self.tables.market.set_entries_per_page(market_pp);
        self.tables.settlement.set_entries_per_page(settlement_pp);
        self.currency = BASE_CURRENCY.to_string();
        self.price_currency = BASE_CURRENCY.to_string();
        self.currency_menu = MenuState::default();
        self.render_chart();
        tracing::info!(tab = tab.as_str(), "tab switched");
    }

    pub fn render_chart(&mut self) {
        let series = ChartSeries::from_observations(self.tab.dataset());
        if let Err(e) = self.chart.render_chart(&series, &chart_title(self.tab)) {
            self.push_error(ErrorCategory::Chart, e.to_string(), self.tab.as_str().to_string());
        }
    }

    fn apply_entries_per_page(&mut self, per_page: usize) {
        self.tables.market.set_entries_per_page(per_page);
        self.tables.settlement.set_entries_per_page(per_page);
    }

    /// Mark `code` selected and start a conversion. The base currency is a
    /// no-op.
    pub fn choose_currency(&mut self, code: &str) {
        self.currency = code.to_string();
        if let Some(i) = CURRENCY_OPTIONS.iter().position(|c| *c == code) {
            self.currency_menu.cursor = i;
        }
        if code == BASE_CURRENCY {
            self.set_status(format!("Prices shown in {}", self.price_currency));
            return;
        }
        match self.worker_tx.send(WorkerCommand::FetchRate {
            target: code.to_string(),
        }) {
            Ok(()) => self.set_status(format!("Fetching {BASE_CURRENCY}/{code} rate...")),
            Err(_) => self.push_error(
                ErrorCategory::Other,
                "rate worker is not running".into(),
                code.to_string(),
            ),
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::RateFetched { target, rate } => {
                let lang = self.language();
                let cells = apply_rate(&mut self.tables, &target, rate, &self.translations, lang);
                self.price_currency = target.clone();
                self.set_status(format!("Converted {cells} prices to {target} (rate {rate})"));
            }
            WorkerResponse::RateFailed { target, error } => {
                self.push_error(ErrorCategory::Network, format!("error converting prices: {error}"), target);
            }
        }
    }

    pub fn set_language(&mut self, lang: Language) {
        self.preferences.language = lang;
        self.tables.relabel(&self.translations, lang, &self.price_currency);
        self.persist();
        tracing::info!(language = lang.code(), "language changed");
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.theme.mode.toggle();
        self.set_theme(mode);
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = Theme::for_mode(mode);
        self.preferences.theme = Some(mode);
        self.persist();
    }

    pub fn record_cookie_choice(&mut self, choice: CookieChoice) {
        self.preferences.cookie_choice = Some(choice);
        self.cookie_banner = false;
        self.persist();
    }

    /// Time-driven state: shows the consent banner once its delay passed.
    pub fn tick(&mut self, now: Instant) {
        if !self.cookie_banner
            && self.preferences.needs_cookie_banner()
            && now.duration_since(self.started_at) >= COOKIE_BANNER_DELAY
        {
            self.cookie_banner = true;
        }
    }

    /// Save preferences; failures are reported, never fatal.
    pub fn persist(&mut self) {
        let Some(path) = self.state_path.clone() else {
            return;
        };
        if let Err(e) = persistence::save(&path, &persistence::extract(self)) {
            tracing::warn!(path = %path.display(), "failed to save preferences: {e:#}");
            self.push_error(ErrorCategory::Storage, format!("{e:#}"), path.display().to_string());
        }
    }

    /// Record an error; it also becomes the status message.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        self.status_message = Some((message.clone(), StatusLevel::Error));
        self.error_history.push_front(ErrorRecord {
            timestamp: Local::now().naive_local(),
            category,
            message,
            context,
        });
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn app() -> (AppContext, Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let today = NaiveDate::from_ymd_opt(2025, 8, 27).unwrap();
        let app = AppContext::new(
            AppConfig::default(),
            Translations::embedded(),
            Preferences::default(),
            cmd_tx,
            resp_rx,
            today,
            None,
        );
        (app, cmd_rx)
    }

    #[test]
    fn starts_on_configured_tab_with_chart() {
        let (app, _rx) = app();
        assert_eq!(app.tab, TabId::DayAhead);
        assert_eq!(app.theme.mode, ThemeMode::Dark);
        assert_eq!(app.currency, "BGN");
        let chart = app.chart.current().unwrap();
        assert_eq!(chart.title, "Day-ahead Market Data");
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx) = app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("e{i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert_eq!(app.error_history[0].message, "e59");
        assert_eq!(app.status_message.as_ref().unwrap().1, StatusLevel::Error);
    }

    #[test]
    fn base_currency_sends_nothing() {
        let (mut app, rx) = app();
        app.choose_currency("BGN");
        assert!(rx.try_recv().is_err());
        app.choose_currency("EUR");
        assert_eq!(
            rx.try_recv().unwrap(),
            WorkerCommand::FetchRate { target: "EUR".into() }
        );
        assert_eq!(app.currency_menu.cursor, 1);
    }

    #[test]
    fn rate_response_converts_and_failure_does_not() {
        let (mut app, _rx) = app();
        let before = app.tables.clone();
        app.handle_worker_response(WorkerResponse::RateFailed {
            target: "EUR".into(),
            error: "network unreachable: timeout".into(),
        });
        assert_eq!(app.tables, before);
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
        assert_eq!(app.error_history[0].context, "EUR");

        app.handle_worker_response(WorkerResponse::RateFetched {
            target: "EUR".into(),
            rate: 0.5,
        });
        assert_eq!(app.price_currency, "EUR");
        assert_eq!(app.tables.market.rows()[0].cells[3], "31.47");
        assert_eq!(app.tables.market.headers[3], "VWAP (EUR/MWh)");
    }

    #[test]
    fn switch_tab_resets_conversion_but_keeps_page_size() {
        let (mut app, _rx) = app();
        app.tables.market.set_entries_per_page(25);
        app.handle_worker_response(WorkerResponse::RateFetched {
            target: "USD".into(),
            rate: 0.55,
        });
        app.switch_tab(TabId::Weeks);
        assert_eq!(app.price_currency, "BGN");
        assert_eq!(app.tables.market.pagination().per_page, 25);
        assert!(app.tables.market.headers[3].contains("BGN"));
        assert_eq!(app.chart.current().unwrap().title, "Weeks Market Data");
    }

    #[test]
    fn language_switch_keeps_converted_cells() {
        let (mut app, _rx) = app();
        app.handle_worker_response(WorkerResponse::RateFetched {
            target: "EUR".into(),
            rate: 2.0,
        });
        let cells = app.tables.market.rows()[0].cells.clone();
        app.set_language(Language::En);
        assert_eq!(app.tables.market.rows()[0].cells, cells);
        assert_eq!(app.tables.market.headers[3], "VWAP (EUR/MWh)");
    }

    #[test]
    fn cookie_banner_waits_for_delay() {
        let (mut app, _rx) = app();
        let start = app.started_at;
        app.tick(start + Duration::from_millis(500));
        assert!(!app.cookie_banner);
        app.tick(start + COOKIE_BANNER_DELAY);
        assert!(app.cookie_banner);
        app.record_cookie_choice(CookieChoice::Rejected);
        assert!(!app.cookie_banner);
        app.tick(start + Duration::from_secs(5));
        assert!(!app.cookie_banner);
    }

    #[test]
    fn menu_wraps() {
        let mut m = MenuState::default();
        m.up(5);
        assert_eq!(m.cursor, 4);
        m.down(5);
        assert_eq!(m.cursor, 0);
    }
}

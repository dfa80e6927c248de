//! Whole-screen rendering against ratatui's test backend.

use std::sync::mpsc;

use chrono::NaiveDate;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use gashub_core::preferences::Preferences;
use gashub_core::{AppConfig, Language, Translations};
use gashub_tui::app::{AppContext, ErrorCategory, Overlay, View};
use gashub_tui::ui;
use gashub_tui::worker::{WorkerCommand, WorkerResponse};

fn app(lang: Language) -> (AppContext, mpsc::Receiver<WorkerCommand>, mpsc::Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let prefs = Preferences {
        language: lang,
        ..Default::default()
    };
    let app = AppContext::new(
        AppConfig::default(),
        Translations::embedded(),
        prefs,
        cmd_tx,
        resp_rx,
        NaiveDate::from_ymd_opt(2025, 8, 27).unwrap(),
        None,
    );
    (app, cmd_rx, resp_tx)
}

fn screen(app: &AppContext, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn table_view_shows_rows_headers_and_pagination() {
    let (app, _rx, _tx) = app(Language::En);
    let s = screen(&app, 140, 40);
    assert!(s.contains("Day-ahead"), "{s}");
    assert!(s.contains("VWAP (BGN/MWh)"));
    assert!(s.contains("2025-08-26"));
    assert!(s.contains("+0.61 ↗"));
    assert!(s.contains("Showing 1 to 7 of 7 entries"));
    assert!(s.contains("Settlement prices"));
    assert!(s.contains("Daily Price"));
}

#[test]
fn bulgarian_labels_and_separators() {
    let (app, _rx, _tx) = app(Language::Bg);
    let s = screen(&app, 140, 40);
    assert!(s.contains("63 641"));
    assert!(s.contains("Показване на 1 до 7 от 7 записа"));
}

#[test]
fn short_terminal_drops_summary_cards() {
    let (app, _rx, _tx) = app(Language::En);
    let s = screen(&app, 140, 24);
    assert!(!s.contains("Daily Price"));
    assert!(s.contains("2025-08-26"));
}

#[test]
fn chart_view_draws_titled_chart() {
    let (mut app, _rx, _tx) = app(Language::En);
    app.view = View::Chart;
    let s = screen(&app, 120, 40);
    assert!(s.contains("Day-ahead Market Data"));
    assert!(!s.contains("Showing 1 to"));
}

#[test]
fn overlays_render_over_main_area() {
    let (mut app, _rx, _tx) = app(Language::En);

    app.overlay = Overlay::Currency;
    let s = screen(&app, 120, 40);
    assert!(s.contains("Euro"));
    assert!(s.contains("● BGN"));

    app.overlay = Overlay::Calendar;
    let s = screen(&app, 120, 40);
    assert!(s.contains("August 2025"));
    assert!(s.contains("Aug 20, 2025 - Aug 26, 2025"));

    app.overlay = Overlay::Help;
    let s = screen(&app, 120, 60);
    assert!(s.contains("Sort by price"));

    app.push_error(ErrorCategory::Network, "error converting prices".into(), "EUR".into());
    app.overlay = Overlay::ErrorHistory;
    let s = screen(&app, 120, 40);
    assert!(s.contains("[NET]"));
    assert!(s.contains("error converting prices"));
}

#[test]
fn cookie_banner_renders_when_visible() {
    let (mut app, _rx, _tx) = app(Language::En);
    assert!(!screen(&app, 120, 40).contains("[a] Accept"));
    app.cookie_banner = true;
    let s = screen(&app, 120, 40);
    assert!(s.contains("[a] Accept"));
    assert!(s.contains("[r] Reject"));
}

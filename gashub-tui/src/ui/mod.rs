//! Top-level UI layout: header, summary cards, market data, status bar.

pub mod chart_panel;
pub mod cookie_banner;
pub mod header;
pub mod market_panel;
pub mod overlays;
pub mod overview_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::{AppContext, Overlay, View};

/// Summary cards are dropped below this terminal height.
const OVERVIEW_MIN_HEIGHT: u16 = 30;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppContext) {
    let area = f.area();
    f.render_widget(Block::default().style(app.theme.base()), area);

    let overview_height = if area.height >= OVERVIEW_MIN_HEIGHT { 8 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(overview_height),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);
    let main_area = chunks[2];

    header::render(f, chunks[0], app);
    if overview_height > 0 {
        overview_panel::render(f, chunks[1], app);
    }
    match app.view {
        View::Table => market_panel::render(f, main_area, app),
        View::Chart => chart_panel::render(f, main_area, app),
    }
    status_bar::render(f, chunks[3], app);

    if app.cookie_banner {
        cookie_banner::render(f, main_area, app);
    }

    // Overlays on top.
    match app.overlay {
        Overlay::Search => overlays::render_search(f, main_area, app),
        Overlay::Calendar => overlays::render_calendar(f, main_area, app),
        Overlay::Currency => overlays::render_currency(f, main_area, app),
        Overlay::Language => overlays::render_language(f, main_area, app),
        Overlay::Help => overlays::render_help(f, main_area, app),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

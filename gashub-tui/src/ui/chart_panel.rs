//! Chart view of the active tab.

use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppContext;
use crate::chart_backend::MarketChart;

pub fn render(f: &mut Frame, area: Rect, app: &AppContext) {
    match app.chart.current() {
        Some(handle) => f.render_widget(
            MarketChart {
                handle,
                theme: &app.theme,
            },
            area,
        ),
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.border(false));
            f.render_widget(
                Paragraph::new(Span::styled("No chart data.", app.theme.muted())).block(block),
                area,
            );
        }
    }
}

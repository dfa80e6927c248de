//! Consent banner along the bottom of the main area.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppContext;

pub fn render(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let height = 3.min(area.height);
    let banner = Rect::new(area.x, area.y + area.height - height, area.width, height);
    f.render_widget(Clear, banner);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base());
    let line = Line::from(vec![
        Span::styled(
            app.t("cookie.message", "We use cookies to improve your user experience."),
            theme.text(),
        ),
        Span::raw("  "),
        Span::styled(format!("[a] {}", app.t("cookie.accept", "Accept")), theme.accent_bold()),
        Span::raw("  "),
        Span::styled(format!("[r] {}", app.t("cookie.reject", "Reject")), theme.muted()),
    ]);
    f.render_widget(Paragraph::new(line).block(block), banner);
}

//! Bottom status bar: key hints and the last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppContext, StatusLevel};

pub fn render(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let mut spans: Vec<Span> = vec![Span::styled(
        " 1-4:tab v:view c:currency d:dates l:lang t:theme ?:help q:quit",
        theme.muted(),
    )];

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme.accent(),
            StatusLevel::Warning => theme.warning(),
            StatusLevel::Error => theme.negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

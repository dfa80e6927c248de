//! Title line, tab strip and the current language, theme, currency and
//! date range.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use gashub_core::TabId;

use crate::app::AppContext;

pub fn render(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false))
        .title(Span::styled(
            format!(" {} ", app.t("market.title", "Market Data")),
            theme.accent_bold(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [tabs_area, info_area] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(56)]).areas(inner);

    let titles: Vec<String> = TabId::ALL
        .iter()
        .map(|tab| app.t(tab.label_key(), tab.as_str()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(theme.muted())
        .highlight_style(theme.selected())
        .divider("|");
    f.render_widget(tabs, tabs_area);

    let range = app.calendar.range_label().unwrap_or_else(|| "-".into());
    let info = Line::from(vec![
        Span::styled(app.language().to_string(), theme.accent()),
        Span::styled(" | ", theme.muted()),
        Span::styled(app.t(app.theme.mode.label_key(), app.theme.mode.as_str()), theme.text()),
        Span::styled(" | ", theme.muted()),
        Span::styled(app.currency.clone(), theme.accent()),
        Span::styled(" | ", theme.muted()),
        Span::styled(range, theme.text()),
    ])
    .right_aligned();
    f.render_widget(Paragraph::new(info), info_area);
}

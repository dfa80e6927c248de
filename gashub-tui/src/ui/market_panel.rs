//! Market and settlement tables with their pagination footers.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use gashub_core::table::pagination_info;
use gashub_core::{SortKey, TableView};

use crate::app::{AppContext, Focus};

/// Market table column holding the change text.
const CHANGE_COLUMN: usize = 4;

pub fn render(f: &mut Frame, area: Rect, app: &AppContext) {
    let [market, settlement] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let tab_label = app.t(app.tab.label_key(), app.tab.as_str());
    render_table(
        f,
        market,
        app,
        &app.tables.market,
        tab_label,
        app.focus == Focus::Market,
    );
    render_table(
        f,
        settlement,
        app,
        &app.tables.settlement,
        app.t("market.settlement.title", "Settlement prices"),
        app.focus == Focus::Settlement,
    );
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    app: &AppContext,
    view: &TableView,
    title: String,
    focused: bool,
) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(focused))
        .title(Span::styled(
            format!(" {title} "),
            if focused { theme.accent_bold() } else { theme.text() },
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [body, footer] = Layout::vertical([Constraint::Min(2), Constraint::Length(1)]).areas(inner);

    let sorted_column = view.sorted_by().map(|key| match key {
        SortKey::Contract => view.sort_columns().contract,
        SortKey::Price => view.sort_columns().price,
    });
    let header = Row::new(view.headers.iter().enumerate().map(|(i, h)| {
        if Some(i) == sorted_column {
            Cell::from(format!("{h} ▲"))
        } else {
            Cell::from(h.as_str())
        }
    }))
    .style(theme.header_row());

    let rows = view.visible_rows().map(|row| {
        Row::new(row.cells.iter().enumerate().map(|(i, text)| {
            let style = match row.trend {
                Some(trend) if i == CHANGE_COLUMN => Style::default().fg(theme.trend_color(trend)),
                _ => theme.text(),
            };
            Cell::from(Span::styled(text.as_str(), style))
        }))
    });

    let widths = vec![Constraint::Fill(1); view.headers.len().max(1)];
    f.render_widget(Table::new(rows, widths).header(header).column_spacing(1), body);

    let pagination = view.pagination();
    let mut spans = vec![
        Span::styled(pagination_info(view, &app.translations, app.language()), theme.muted()),
        Span::styled(
            format!(
                "  {}/{}",
                pagination.page.min(pagination.page_count(view.matching_count())),
                pagination.page_count(view.matching_count())
            ),
            theme.text(),
        ),
    ];
    let per_page = pagination.per_page.to_string();
    spans.push(Span::styled(
        format!(
            "  {}",
            app.translations.get_or("market.entries", app.language(), &[("count", &per_page)], || {
                format!("{per_page} entries per page")
            })
        ),
        theme.muted(),
    ));
    if !view.filter().is_empty() {
        spans.push(Span::styled(format!("  /{}", view.filter()), theme.warning()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), footer);
}

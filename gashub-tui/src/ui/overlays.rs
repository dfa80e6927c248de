//! Overlay widgets: search, calendar, currency and language menus, help,
//! error history.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use gashub_core::calendar::{day_headers, GRID_CELLS};
use gashub_core::currency::CURRENCY_OPTIONS;
use gashub_core::Language;

use crate::app::{AppContext, Focus, MenuState};
use crate::dispatch::{bindings_for, key_label, Action, Component};
use crate::theme::Theme;
use crate::ui::{centered_fixed, centered_rect};

fn popup_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent())
        .style(theme.base())
        .title(Span::styled(title, theme.accent_bold()))
}

pub fn render_search(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let popup = centered_fixed(50, 3, area);
    f.render_widget(Clear, popup);

    let target = match app.focus {
        Focus::Market => app.t(app.tab.label_key(), app.tab.as_str()),
        Focus::Settlement => app.t("market.settlement.title", "Settlement prices"),
    };
    let block = popup_block(
        format!(" {}: {target} [Enter]keep [Esc]close ", app.t("market.search", "Search")),
        theme,
    );
    let line = Line::from(vec![
        Span::styled("/", theme.muted()),
        Span::styled(app.search_input.as_str(), theme.text()),
        Span::styled("█", theme.accent()),
    ]);
    f.render_widget(Paragraph::new(line).block(block), popup);
}

pub fn render_calendar(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let cal = &app.calendar;
    let popup = centered_fixed(32, 12, area);
    f.render_widget(Clear, popup);

    let block = popup_block(
        format!(" {} ", cal.month_title(&app.translations, app.language())),
        theme,
    )
    .title_bottom(Line::from(Span::styled(" [Enter]pick [<>]month ", theme.muted())));

    let mut lines = vec![Line::from(
        day_headers(&app.translations, app.language())
            .into_iter()
            .map(|d| Span::styled(format!("{d:>3} "), theme.header_row()))
            .collect::<Vec<_>>(),
    )];

    let grid = cal.grid();
    debug_assert_eq!(grid.len(), GRID_CELLS);
    for week in grid.chunks(7) {
        let spans: Vec<Span> = week
            .iter()
            .map(|cell| {
                let mut style = if cell.selected {
                    theme.selected()
                } else if cell.other_month {
                    theme.muted()
                } else {
                    theme.text()
                };
                if cell.today {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                if cell.date == cal.cursor {
                    style = Style::default().fg(theme.background).bg(theme.warning);
                }
                Span::styled(format!("{:>3} ", cell.date.format("%-d")), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let range = cal.range_label().unwrap_or_else(|| "…".into());
    lines.push(Line::from(Span::styled(range, theme.accent())));
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn menu_lines<'a>(
    items: impl Iterator<Item = (String, bool)>,
    menu: MenuState,
    theme: &Theme,
) -> Vec<Line<'a>> {
    items
        .enumerate()
        .map(|(i, (label, selected))| {
            let marker = if selected { "● " } else { "  " };
            let style = if i == menu.cursor {
                theme.selected()
            } else {
                theme.text()
            };
            Line::from(Span::styled(format!("{marker}{label}"), style))
        })
        .collect()
}

pub fn render_currency(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let popup = centered_fixed(36, CURRENCY_OPTIONS.len() as u16 + 2, area);
    f.render_widget(Clear, popup);

    let items = CURRENCY_OPTIONS.iter().map(|code| {
        let name = app.t(&format!("currency.{}", code.to_lowercase()), code);
        (format!("{code}  {name}"), *code == app.currency)
    });
    let block = popup_block(format!(" {} ", app.t("currency.title", "Currency")), theme);
    f.render_widget(
        Paragraph::new(menu_lines(items, app.currency_menu, theme)).block(block),
        popup,
    );
}

fn language_name(lang: Language) -> &'static str {
    match lang {
        Language::Bg => "Български",
        Language::En => "English",
    }
}

pub fn render_language(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let popup = centered_fixed(30, Language::ALL.len() as u16 + 2, area);
    f.render_widget(Clear, popup);

    let items = Language::ALL
        .iter()
        .map(|lang| (format!("{lang}  {}", language_name(*lang)), *lang == app.language()));
    let block = popup_block(
        format!(" {} ", app.t("app.switch_language", "Switch language")),
        theme,
    );
    f.render_widget(
        Paragraph::new(menu_lines(items, app.language_menu, theme)).block(block),
        popup,
    );
}

const HELP_SECTIONS: [Component; 8] = [
    Component::Global,
    Component::Market,
    Component::CookieBanner,
    Component::Search,
    Component::Calendar,
    Component::Currency,
    Component::Language,
    Component::ErrorHistory,
];

/// One line per action; keys bound to the same action share the line.
fn help_lines(component: Component, theme: &Theme) -> Vec<Line<'static>> {
    let mut entries: Vec<(Action, Vec<String>, &'static str)> = Vec::new();
    for b in bindings_for(component) {
        match entries.iter_mut().find(|(a, _, _)| *a == b.action) {
            Some((_, keys, _)) => keys.push(key_label(b.key)),
            None => entries.push((b.action, vec![key_label(b.key)], b.help)),
        }
    }
    entries
        .into_iter()
        .map(|(_, keys, help)| {
            Line::from(vec![
                Span::styled(format!("  {:<10}", keys.join(" ")), theme.accent()),
                Span::styled(help, theme.text()),
            ])
        })
        .collect()
}

pub fn render_help(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let popup = centered_rect(70, 90, area);
    f.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for component in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(component.label(), theme.accent_bold())));
        lines.extend(help_lines(component, theme));
        lines.push(Line::from(""));
    }
    let block = popup_block(format!(" {} [Esc]close ", app.t("app.help", "Help")), theme);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppContext) {
    let theme = &app.theme;
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.negative())
        .style(theme.base())
        .title(Span::styled(
            format!(
                " {} ({}) [Esc]close [j/k]scroll ",
                app.t("app.errors", "Error history"),
                app.error_history.len()
            ),
            theme.negative(),
        ));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No errors recorded.", theme.muted())),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        let style = if i == app.error_scroll {
            theme.negative().add_modifier(Modifier::BOLD)
        } else {
            theme.muted()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme.muted()),
            Span::styled(format!("[{}] ", err.category.label()), theme.warning()),
            Span::styled(err.message.as_str(), style),
        ]));
        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme.muted()),
            ]));
        }
    }
    f.render_widget(Paragraph::new(lines), inner);
}

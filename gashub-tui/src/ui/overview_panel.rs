//! Market summary cards: daily price, weekly price and trading volume.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget};
use ratatui::Frame;

use gashub_core::chart::sparkline::{normalize, DAILY_PRICE, DAILY_VOLUME, WEEKLY_PRICE};
use gashub_core::market::format_decimal;
use gashub_core::table::group_thousands;

use crate::app::AppContext;
use crate::theme::Theme;

/// Height of the normalized plotting range for the price sparklines.
const SPARK_HEIGHT: f64 = 1.0;

/// Bar heights are normalized onto this scale.
const BAR_SCALE: f64 = 100.0;

pub fn render(f: &mut Frame, area: Rect, app: &AppContext) {
    let [day, week, volume] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area);

    let last = |values: &[f64]| values.last().copied().unwrap_or_default();
    let lang = app.language();

    f.render_widget(
        SparkCard {
            title: app.t("market.day.title", "Daily Price"),
            caption: app.t("market.day.date", "Today"),
            value: format!("{} BGN/MWh", format_decimal(last(&DAILY_PRICE))),
            values: &DAILY_PRICE,
            theme: &app.theme,
        },
        day,
    );
    f.render_widget(
        SparkCard {
            title: app.t("market.week.title", "Weekly Price"),
            caption: app.t("market.week.date", "This Week"),
            value: format!("{} BGN/MWh", format_decimal(last(&WEEKLY_PRICE))),
            values: &WEEKLY_PRICE,
            theme: &app.theme,
        },
        week,
    );
    render_volume_card(
        f,
        volume,
        app,
        app.t("market.volume.title", "Trading Volume"),
        format!(
            "{} MWh",
            group_thousands(last(&DAILY_VOLUME) as u64, lang.group_separator())
        ),
    );
}

fn card_block<'a>(title: &'a str, caption: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(false))
        .title(Span::styled(format!(" {title} "), theme.text()))
        .title_bottom(Line::from(Span::styled(format!(" {caption} "), theme.muted())).right_aligned())
}

/// A card with its headline value over a price sparkline.
struct SparkCard<'a> {
    title: String,
    caption: String,
    value: String,
    values: &'a [f64],
    theme: &'a Theme,
}

impl Widget for SparkCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = card_block(&self.title, &self.caption, self.theme);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 {
            return;
        }
        let [value_area, plot] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
        Paragraph::new(Span::styled(self.value, self.theme.accent_bold())).render(value_area, buf);

        let points: Vec<(f64, f64)> = normalize(self.values, SPARK_HEIGHT)
            .into_iter()
            .enumerate()
            .map(|(i, y)| (i as f64, y))
            .collect();
        let x_max = (points.len().saturating_sub(1)).max(1) as f64;
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.theme.accent())
            .data(&points);
        Chart::new(vec![dataset])
            .x_axis(Axis::default().bounds([0.0, x_max]))
            .y_axis(Axis::default().bounds([0.0, SPARK_HEIGHT]))
            .render(plot, buf);
    }
}

fn render_volume_card(f: &mut Frame, area: Rect, app: &AppContext, title: String, value: String) {
    let theme = &app.theme;
    let caption = app.t("market.volume.date", "Today");
    let block = card_block(&title, &caption, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }
    let [value_area, plot] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(Span::styled(value, theme.accent_bold())),
        value_area,
    );

    let bars: Vec<Bar> = normalize(&DAILY_VOLUME, BAR_SCALE)
        .into_iter()
        .map(|h| {
            Bar::default()
                .value(h.round() as u64)
                .text_value(String::new())
                .style(theme.accent())
        })
        .collect();
    let n = bars.len().max(1) as u16;
    let bar_width = (plot.width.saturating_sub(n - 1) / n).max(1);
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .max(BAR_SCALE as u64)
        .bar_width(bar_width)
        .bar_gap(1);
    f.render_widget(chart, plot);
}

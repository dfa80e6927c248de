//! Light and dark palettes for the terminal viewer.
//!
//! Widgets never pick raw colors; they ask the active [`Theme`] for a token
//! or a ready-made style.

use ratatui::style::{Color, Modifier, Style};

use gashub_core::chart::Rgb;
use gashub_core::preferences::ThemeMode;
use gashub_core::Trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub background: Color,
    /// Exchange blue, used for focus and highlights.
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: Color::Rgb(255, 255, 255),
            accent: Color::Rgb(15, 116, 188),
            positive: rgb(Trend::Positive.color()),
            negative: rgb(Trend::Negative.color()),
            warning: Color::Rgb(204, 122, 0),
            muted: Color::Rgb(108, 117, 125),
            text_primary: Color::Rgb(33, 37, 41),
            text_secondary: Color::Rgb(73, 80, 87),
            border: Color::Rgb(222, 226, 230),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(77, 171, 247),
            positive: rgb(Trend::Positive.color()),
            negative: rgb(Trend::Negative.color()),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(134, 142, 150),
            text_primary: Color::Rgb(248, 249, 250),
            text_secondary: Color::Rgb(173, 181, 189),
            border: Color::Rgb(73, 80, 87),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Trend color as drawn on this background. Black neutral points are
    /// lifted to the primary text color on the dark palette.
    pub fn trend_color(&self, trend: Trend) -> Color {
        self.series_color(trend.color())
    }

    pub fn series_color(&self, color: Rgb) -> Color {
        if self.mode == ThemeMode::Dark && color == Trend::Neutral.color() {
            self.text_primary
        } else {
            rgb(color)
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn negative(&self) -> Style {
        Style::default().fg(self.negative)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.accent()
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn header_row(&self) -> Style {
        Style::default()
            .fg(self.text_secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        self.accent().add_modifier(Modifier::REVERSED)
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_colors_are_exact_on_light() {
        let t = Theme::light();
        assert_eq!(t.trend_color(Trend::Positive), Color::Rgb(0x28, 0xa7, 0x45));
        assert_eq!(t.trend_color(Trend::Negative), Color::Rgb(0xdc, 0x35, 0x45));
        assert_eq!(t.trend_color(Trend::Neutral), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn neutral_stays_visible_on_dark() {
        let t = Theme::dark();
        assert_eq!(t.trend_color(Trend::Neutral), t.text_primary);
        assert_eq!(t.trend_color(Trend::Positive), t.positive);
    }

    #[test]
    fn for_mode_matches_constructors() {
        assert_eq!(Theme::for_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::for_mode(ThemeMode::Dark).mode, ThemeMode::Dark);
    }
}

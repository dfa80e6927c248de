//! Date-range picker state.
//!
//! The picker shows a six-week grid for one month. The first click starts a
//! range, the second click closes it (swapping ends if needed), a third click
//! starts over.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::i18n::{Language, Translations};

const MONTH_KEYS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub const DAY_KEYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

pub const GRID_CELLS: usize = 42;

/// One day cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub other_month: bool,
    pub today: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    /// First day of the displayed month.
    view_month: NaiveDate,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub today: NaiveDate,
    /// Keyboard focus inside the grid.
    pub cursor: NaiveDate,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl CalendarState {
    /// Picker opened on `today`'s month with the default published range.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view_month: first_of_month(today),
            start: NaiveDate::from_ymd_opt(2025, 8, 20),
            end: NaiveDate::from_ymd_opt(2025, 8, 26),
            today,
            cursor: today,
        }
    }

    pub fn view_month(&self) -> NaiveDate {
        self.view_month
    }

    pub fn prev_month(&mut self) {
        if let Some(m) = self.view_month.checked_sub_months(Months::new(1)) {
            self.view_month = m;
            self.cursor = m;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(m) = self.view_month.checked_add_months(Months::new(1)) {
            self.view_month = m;
            self.cursor = m;
        }
    }

    /// Move the cursor by `days`, following it across month boundaries.
    pub fn move_cursor(&mut self, days: i64) {
        if let Some(d) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = d;
            self.view_month = first_of_month(d);
        }
    }

    /// Click on `date`. Returns `true` when this click completed a range.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), None) => {
                if date < start {
                    self.end = Some(start);
                    self.start = Some(date);
                } else {
                    self.end = Some(date);
                }
                tracing::debug!(start = ?self.start, end = ?self.end, "date range selected");
                true
            }
            _ => {
                self.start = Some(date);
                self.end = None;
                false
            }
        }
    }

    pub fn select_cursor(&mut self) -> bool {
        self.select(self.cursor)
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Six weeks starting on the Sunday on or before the first of the month.
    pub fn grid(&self) -> Vec<DayCell> {
        let lead = self.view_month.weekday().num_days_from_sunday() as i64;
        let first = self.view_month - Duration::days(lead);
        first
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| DayCell {
                date,
                other_month: date.month() != self.view_month.month()
                    || date.year() != self.view_month.year(),
                today: date == self.today,
                selected: self.is_selected(date),
            })
            .collect()
    }

    /// `Aug 20, 2025 - Aug 26, 2025`, once both ends are set.
    pub fn range_label(&self) -> Option<String> {
        let (start, end) = (self.start?, self.end?);
        Some(format!(
            "{} - {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        ))
    }

    /// Translated month name followed by the year.
    pub fn month_title(&self, translations: &Translations, lang: Language) -> String {
        let idx = self.view_month.month0() as usize;
        let key = MONTH_KEYS[idx];
        let name = translations.get_or(&format!("calendar.months.{key}"), lang, &[], || {
            self.view_month.format("%B").to_string()
        });
        format!("{name} {}", self.view_month.year())
    }
}

/// Weekday column headers, Sunday first.
pub fn day_headers(translations: &Translations, lang: Language) -> Vec<String> {
    DAY_KEYS
        .iter()
        .map(|key| {
            translations.get_or(&format!("calendar.days.{key}"), lang, &[], || {
                key.to_uppercase()
            })
        })
        .collect()
}

//! Sort and filter transforms over a rendered [`TableView`].
//!
//! Both operate on the rendered cells, not on the source observations, so
//! they also see converted prices. Neither removes rows.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{TableRow, TableView};

/// Sort keys offered by the table headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Contract,
    Price,
}

impl SortKey {
    /// Unrecognized keys sort by contract.
    pub fn parse(key: &str) -> Self {
        match key {
            "price" => SortKey::Price,
            _ => SortKey::Contract,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Contract => "contract",
            SortKey::Price => "price",
        }
    }
}

/// Leading-number parse in the manner of a lenient `parseFloat`.
///
/// Skips leading whitespace, accepts an optional sign, digits, one decimal
/// point and an exponent, and ignores whatever follows. `None` when no digits
/// lead the string.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Numeric order on leading numbers. Cells without one sort after every
/// number and keep their relative order.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (parse_float_prefix(a), parse_float_prefix(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cell(row: &TableRow, column: usize) -> &str {
    row.cells.get(column).map_or("", String::as_str)
}

/// Stable ascending sort of every body row by the column behind `key`.
pub fn sort_table(view: &mut TableView, key: SortKey) {
    let columns = view.sort_columns();
    let column = match key {
        SortKey::Contract => columns.contract,
        SortKey::Price => columns.price,
    };
    view.rows_mut().sort_by(|a, b| {
        let (a, b) = (cell(a, column), cell(b, column));
        match key {
            SortKey::Price => compare_numeric(a, b),
            SortKey::Contract => a.cmp(b),
        }
    });
    view.set_sorted_by(key);
    tracing::debug!(key = key.as_str(), column, "sorted table");
}

/// Hide rows whose text does not contain `term`, ignoring case.
pub fn filter_table(view: &mut TableView, term: &str) {
    let needle = term.to_lowercase();
    for row in view.rows_mut().iter_mut() {
        row.matches_filter = needle.is_empty() || row.text().to_lowercase().contains(&needle);
    }
    view.set_filter_text(term);
    view.pagination_mut().page = 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, Translations};
    use crate::market::TabId;
    use crate::table::DisplayTables;

    fn settlement() -> TableView {
        DisplayTables::new(TabId::DayAhead, &Translations::embedded(), Language::En, "BGN").settlement
    }

    fn first_column(view: &TableView) -> Vec<String> {
        view.rows().iter().map(|r| r.cells[0].clone()).collect()
    }

    #[test]
    fn parse_float_prefix_cases() {
        assert_eq!(parse_float_prefix("62.94"), Some(62.94));
        assert_eq!(parse_float_prefix("  -0.17 ↘"), Some(-0.17));
        assert_eq!(parse_float_prefix("+0.61 ↗"), Some(0.61));
        assert_eq!(parse_float_prefix("63,641"), Some(63.0));
        assert_eq!(parse_float_prefix(".5x"), Some(0.5));
        assert_eq!(parse_float_prefix("1e3kg"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("Week 34"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn unknown_keys_sort_by_contract() {
        assert_eq!(SortKey::parse("price"), SortKey::Price);
        assert_eq!(SortKey::parse("volume"), SortKey::Contract);
        assert_eq!(SortKey::parse(""), SortKey::Contract);
    }

    #[test]
    fn price_sort_is_stable_on_duplicates() {
        let mut view = settlement();
        sort_table(&mut view, SortKey::Price);
        let order = first_column(&view);
        let da = order.iter().position(|c| c == "DA 27.08.2025").unwrap();
        let bom = order.iter().position(|c| c == "BOM 08.2025").unwrap();
        // Both settle at 62.94; publication order is kept.
        assert_eq!(bom, da + 1);
        assert_eq!(view.sorted_by(), Some(SortKey::Price));
    }

    #[test]
    fn price_sort_is_ascending() {
        let mut view = settlement();
        sort_table(&mut view, SortKey::Price);
        let prices: Vec<f64> = view
            .rows()
            .iter()
            .map(|r| parse_float_prefix(&r.cells[1]).unwrap())
            .collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn contract_sort_is_lexicographic() {
        let mut view = settlement();
        sort_table(&mut view, SortKey::Contract);
        let mut expected = first_column(&view);
        expected.sort();
        assert_eq!(first_column(&view), expected);
    }

    #[test]
    fn unparseable_prices_sort_last() {
        assert_eq!(compare_numeric("-", "62.94"), Ordering::Greater);
        assert_eq!(compare_numeric("62.94", "n/a"), Ordering::Less);
        assert_eq!(compare_numeric("abc", "xyz"), Ordering::Equal);
        assert_eq!(compare_numeric("1", "2"), Ordering::Less);
    }

    #[test]
    fn empty_filter_shows_all() {
        let mut view = settlement();
        filter_table(&mut view, "");
        assert_eq!(view.matching_count(), view.row_count());
    }

    #[test]
    fn absent_substring_hides_all_without_removing() {
        let mut view = settlement();
        let total = view.row_count();
        filter_table(&mut view, "no such contract");
        assert_eq!(view.matching_count(), 0);
        assert_eq!(view.row_count(), total);
        assert_eq!(view.visible_rows().count(), 0);
    }

    #[test]
    fn filter_ignores_case_and_spans_cells() {
        let mut view = settlement();
        filter_table(&mut view, "bom 08.2025 62.94");
        assert_eq!(view.matching_count(), 1);
        filter_table(&mut view, "q4");
        assert_eq!(view.matching_count(), 1);
    }

    #[test]
    fn filter_resets_to_first_page() {
        let mut view = settlement();
        view.set_entries_per_page(25);
        view.set_entries_per_page(10);
        view.pagination_mut().page = 2;
        filter_table(&mut view, "m");
        assert_eq!(view.pagination().page, 1);
    }
}

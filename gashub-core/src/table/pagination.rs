//! Page window over the rows that match the current filter.

use crate::i18n::{Language, Translations};

use super::TableView;

/// Choices offered by the entries-per-page selector.
pub const ENTRIES_PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// One-based page over matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub per_page: usize,
    pub page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            per_page: ENTRIES_PER_PAGE_OPTIONS[0],
            page: 1,
        }
    }
}

impl Pagination {
    pub fn page_count(&self, matching: usize) -> usize {
        matching.div_ceil(self.per_page.max(1)).max(1)
    }

    /// Half-open index window `[start, end)` into the matching rows.
    pub fn window(&self, matching: usize) -> (usize, usize) {
        let per_page = self.per_page.max(1);
        let page = self.page.clamp(1, self.page_count(matching));
        let start = ((page - 1) * per_page).min(matching);
        let end = (start + per_page).min(matching);
        (start, end)
    }

    /// Next entries-per-page option, wrapping around.
    pub fn next_option(per_page: usize) -> usize {
        let idx = ENTRIES_PER_PAGE_OPTIONS
            .iter()
            .position(|&n| n == per_page)
            .map_or(0, |i| (i + 1) % ENTRIES_PER_PAGE_OPTIONS.len());
        ENTRIES_PER_PAGE_OPTIONS[idx]
    }
}

impl TableView {
    /// Change the page size; the view returns to page 1. Zero is ignored.
    pub fn set_entries_per_page(&mut self, per_page: usize) {
        if per_page == 0 {
            tracing::debug!("ignoring zero entries-per-page");
            return;
        }
        let p = self.pagination_mut();
        p.per_page = per_page;
        p.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        let count = self.pagination().page_count(self.matching_count());
        self.pagination_mut().page = page.clamp(1, count);
    }

    pub fn next_page(&mut self) {
        let page = self.pagination().page;
        self.go_to_page(page + 1);
    }

    pub fn prev_page(&mut self) {
        let page = self.pagination().page;
        self.go_to_page(page.saturating_sub(1));
    }
}

/// "Showing X to Y of Z entries" for the current filter and page.
pub fn pagination_info(view: &TableView, translations: &Translations, lang: Language) -> String {
    let matching = view.matching_count();
    let (start, end) = view.pagination().window(matching);
    let from = if matching == 0 { 0 } else { start + 1 };

    let from = from.to_string();
    let to = end.to_string();
    let total = matching.to_string();
    let mut info = translations.get_or(
        "market.pagination.info",
        lang,
        &[("from", &from), ("to", &to), ("total", &total)],
        || format!("Showing {from} to {to} of {total} entries"),
    );

    if matching < view.row_count() {
        let all = view.row_count().to_string();
        let suffix = translations.get_or(
            "market.pagination.filtered",
            lang,
            &[("all", &all)],
            || format!("(filtered from {all} total entries)"),
        );
        info.push(' ');
        info.push_str(&suffix);
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{filter_table, SortColumns, TableRow};

    fn view_with(n: usize) -> TableView {
        let mut v = TableView::new(vec!["c".into()], SortColumns { contract: 0, price: 0 });
        let rows = (0..n)
            .map(|i| TableRow::new(vec![format!("row {i:02}")], None))
            .collect();
        v.set_body(rows);
        v
    }

    #[test]
    fn window_math() {
        let p = Pagination { per_page: 10, page: 2 };
        assert_eq!(p.window(25), (10, 20));
        assert_eq!(p.page_count(25), 3);
        let last = Pagination { per_page: 10, page: 3 };
        assert_eq!(last.window(25), (20, 25));
        // Out-of-range pages clamp to the last page.
        let far = Pagination { per_page: 10, page: 9 };
        assert_eq!(far.window(25), (20, 25));
        assert_eq!(Pagination::default().window(0), (0, 0));
    }

    #[test]
    fn paging_moves_the_visible_window() {
        let mut v = view_with(23);
        assert_eq!(v.visible_rows().count(), 10);
        v.next_page();
        v.next_page();
        assert_eq!(v.pagination().page, 3);
        assert_eq!(v.visible_rows().count(), 3);
        v.next_page();
        assert_eq!(v.pagination().page, 3);
        v.prev_page();
        assert_eq!(v.visible_rows().next().unwrap().cells[0], "row 10");
        v.go_to_page(0);
        assert_eq!(v.pagination().page, 1);
    }

    #[test]
    fn entries_per_page_updates_status_line() {
        let t = Translations::embedded();
        let mut v = view_with(23);
        assert_eq!(
            pagination_info(&v, &t, Language::En),
            "Showing 1 to 10 of 23 entries"
        );
        v.set_entries_per_page(25);
        assert_eq!(
            pagination_info(&v, &t, Language::En),
            "Showing 1 to 23 of 23 entries"
        );
        v.set_entries_per_page(0);
        assert_eq!(v.pagination().per_page, 25);
    }

    #[test]
    fn status_line_follows_filter() {
        let t = Translations::embedded();
        let mut v = view_with(23);
        filter_table(&mut v, "row 1");
        assert_eq!(
            pagination_info(&v, &t, Language::En),
            "Showing 1 to 10 of 10 entries (filtered from 23 total entries)"
        );
        filter_table(&mut v, "nothing");
        assert_eq!(
            pagination_info(&v, &t, Language::En),
            "Showing 0 to 0 of 0 entries (filtered from 23 total entries)"
        );
        assert_eq!(
            pagination_info(&v, &t, Language::Bg),
            "Показване на 0 до 0 от 0 записа (филтрирани от общо 23 записа)"
        );
    }

    #[test]
    fn next_option_cycles() {
        assert_eq!(Pagination::next_option(10), 25);
        assert_eq!(Pagination::next_option(100), 10);
        assert_eq!(Pagination::next_option(7), 10);
    }
}

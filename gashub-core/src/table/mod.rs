//! Presentation state for the market and settlement tables.
//!
//! A [`TableView`] is the rendered table: header labels plus body rows of
//! display strings. Rows are never removed by interaction; filtering only
//! flips a per-row match flag and pagination is computed over matching rows,
//! so sort, filter and page changes compose without losing data.

pub mod interact;
pub mod pagination;
pub mod render;

pub use interact::{filter_table, parse_float_prefix, sort_table, SortKey};
pub use pagination::{pagination_info, Pagination, ENTRIES_PER_PAGE_OPTIONS};
pub use render::{
    display_rows, group_thousands, market_headers, render_settlement, render_table,
    settlement_headers, DisplayRow,
};

use crate::i18n::{Language, Translations};
use crate::market::{settlement_contracts, TabId, Trend};

/// Market table: date, volume, trades, VWAP, change, reference.
pub const MARKET_VWAP_COLUMN: usize = 3;
/// Settlement table: contract, settlement price, volume.
pub const SETTLEMENT_PRICE_COLUMN: usize = 1;

/// Columns addressed by the two sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortColumns {
    pub contract: usize,
    pub price: usize,
}

/// One rendered body row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Trend of the change cell, when the table has one.
    pub trend: Option<Trend>,
    pub(crate) matches_filter: bool,
}

impl TableRow {
    pub fn new(cells: Vec<String>, trend: Option<Trend>) -> Self {
        Self {
            cells,
            trend,
            matches_filter: true,
        }
    }

    /// Full row text, the way a reader scanning the row sees it.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }

    pub fn matches_filter(&self) -> bool {
        self.matches_filter
    }
}

/// A rendered table and its interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    rows: Vec<TableRow>,
    sort_columns: SortColumns,
    filter: String,
    pagination: Pagination,
    sorted_by: Option<SortKey>,
}

impl TableView {
    pub fn new(headers: Vec<String>, sort_columns: SortColumns) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            sort_columns,
            filter: String::new(),
            pagination: Pagination::default(),
            sorted_by: None,
        }
    }

    /// Replace every body row. Filter text, sort indicator and page reset;
    /// the entries-per-page choice is kept.
    pub fn set_body(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
        self.filter.clear();
        self.sorted_by = None;
        self.pagination.page = 1;
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<TableRow> {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn matching_count(&self) -> usize {
        self.rows.iter().filter(|r| r.matches_filter).count()
    }

    pub fn sort_columns(&self) -> SortColumns {
        self.sort_columns
    }

    pub fn sorted_by(&self) -> Option<SortKey> {
        self.sorted_by
    }

    pub(crate) fn set_sorted_by(&mut self, key: SortKey) {
        self.sorted_by = Some(key);
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub(crate) fn set_filter_text(&mut self, term: &str) {
        self.filter = term.to_string();
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub(crate) fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// Rows shown right now: matching the filter and on the current page.
    pub fn visible_rows(&self) -> impl Iterator<Item = &TableRow> {
        let (start, end) = self.pagination.window(self.matching_count());
        self.rows
            .iter()
            .filter(|r| r.matches_filter)
            .skip(start)
            .take(end - start)
    }

    /// Mutable access to one column's cell in every body row.
    pub fn column_cells_mut(&mut self, column: usize) -> impl Iterator<Item = &mut String> {
        self.rows
            .iter_mut()
            .filter_map(move |r| r.cells.get_mut(column))
    }
}

/// The two tables of the market-data section.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTables {
    pub market: TableView,
    pub settlement: TableView,
}

impl DisplayTables {
    /// Render both tables for `tab` with base-currency headers.
    pub fn new(tab: TabId, translations: &Translations, lang: Language, currency: &str) -> Self {
        let mut market = TableView::new(
            market_headers(translations, lang, currency),
            SortColumns {
                contract: 0,
                price: MARKET_VWAP_COLUMN,
            },
        );
        render_table(&mut market, &display_rows(tab.dataset(), lang));

        let mut settlement = TableView::new(
            settlement_headers(translations, lang, currency),
            SortColumns {
                contract: 0,
                price: SETTLEMENT_PRICE_COLUMN,
            },
        );
        render_settlement(&mut settlement, settlement_contracts(), lang);

        Self { market, settlement }
    }

    /// Re-translate headers without touching body rows.
    pub fn relabel(&mut self, translations: &Translations, lang: Language, currency: &str) {
        self.market.headers = market_headers(translations, lang, currency);
        self.settlement.headers = settlement_headers(translations, lang, currency);
    }
}

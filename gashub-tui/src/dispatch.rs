//! Declarative key bindings and the single place actions take effect.
//!
//! Input handling looks a key up in [`BINDINGS`] for the component that
//! currently owns the keyboard, then hands the resulting [`Action`] to
//! [`apply`]. The help overlay is rendered from the same table.

use crossterm::event::KeyCode;

use gashub_core::currency::CURRENCY_OPTIONS;
use gashub_core::table::{filter_table, sort_table, Pagination};
use gashub_core::preferences::CookieChoice;
use gashub_core::{Language, SortKey, TabId};

use crate::app::{AppContext, Overlay, StatusLevel, View};

/// Who owns the keyboard when a binding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Global,
    /// The focused table, in table view.
    Market,
    CookieBanner,
    Search,
    Calendar,
    Currency,
    Language,
    Help,
    ErrorHistory,
}

impl Component {
    pub fn for_overlay(overlay: Overlay) -> Option<Self> {
        match overlay {
            Overlay::None => None,
            Overlay::Search => Some(Component::Search),
            Overlay::Calendar => Some(Component::Calendar),
            Overlay::Currency => Some(Component::Currency),
            Overlay::Language => Some(Component::Language),
            Overlay::Help => Some(Component::Help),
            Overlay::ErrorHistory => Some(Component::ErrorHistory),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Component::Global => "Global",
            Component::Market => "Tables",
            Component::CookieBanner => "Cookie banner",
            Component::Search => "Search",
            Component::Calendar => "Calendar",
            Component::Currency => "Currency menu",
            Component::Language => "Language menu",
            Component::Help => "Help",
            Component::ErrorHistory => "Error history",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(TabId),
    ToggleView,
    SwitchFocus,
    SortBy(SortKey),
    OpenSearch,
    ClearFilter,
    CycleEntriesPerPage,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    OpenCalendar,
    CalendarMove(i64),
    CalendarPrevMonth,
    CalendarNextMonth,
    CalendarSelect,
    OpenCurrencyMenu,
    OpenLanguageMenu,
    SetLanguage(Language),
    ToggleTheme,
    AcceptCookies,
    RejectCookies,
    OpenHelp,
    OpenErrors,
    /// Cursor or scroll up in the open overlay.
    Up,
    Down,
    /// Pick the highlighted menu entry.
    Confirm,
    CloseOverlay,
}

#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub component: Component,
    pub key: KeyCode,
    pub action: Action,
    pub help: &'static str,
}

const fn bind(component: Component, key: KeyCode, action: Action, help: &'static str) -> Binding {
    Binding {
        component,
        key,
        action,
        help,
    }
}

use Component as C;
use KeyCode as K;

pub const BINDINGS: &[Binding] = &[
    bind(C::Global, K::Char('q'), Action::Quit, "Quit"),
    bind(C::Global, K::Tab, Action::NextTab, "Next tab"),
    bind(C::Global, K::BackTab, Action::PrevTab, "Previous tab"),
    bind(C::Global, K::Char('1'), Action::SelectTab(TabId::Intraday), "Intraday"),
    bind(C::Global, K::Char('2'), Action::SelectTab(TabId::DayAhead), "Day-ahead"),
    bind(C::Global, K::Char('3'), Action::SelectTab(TabId::Weeks), "Weeks"),
    bind(C::Global, K::Char('4'), Action::SelectTab(TabId::Months), "Months"),
    bind(C::Global, K::Char('v'), Action::ToggleView, "Table / chart view"),
    bind(C::Global, K::Char('t'), Action::ToggleTheme, "Toggle theme"),
    bind(C::Global, K::Char('l'), Action::OpenLanguageMenu, "Language"),
    bind(C::Global, K::Char('c'), Action::OpenCurrencyMenu, "Currency"),
    bind(C::Global, K::Char('d'), Action::OpenCalendar, "Date range"),
    bind(C::Global, K::Char('?'), Action::OpenHelp, "Help"),
    bind(C::Global, K::Char('e'), Action::OpenErrors, "Error history"),
    bind(C::Market, K::Char('/'), Action::OpenSearch, "Search"),
    bind(C::Market, K::Char('x'), Action::ClearFilter, "Clear search"),
    bind(C::Market, K::Char('s'), Action::SortBy(SortKey::Contract), "Sort by contract"),
    bind(C::Market, K::Char('p'), Action::SortBy(SortKey::Price), "Sort by price"),
    bind(C::Market, K::Char('f'), Action::SwitchFocus, "Market / settlement table"),
    bind(C::Market, K::Char('m'), Action::CycleEntriesPerPage, "Entries per page"),
    bind(C::Market, K::Right, Action::NextPage, "Next page"),
    bind(C::Market, K::Char(']'), Action::NextPage, "Next page"),
    bind(C::Market, K::Left, Action::PrevPage, "Previous page"),
    bind(C::Market, K::Char('['), Action::PrevPage, "Previous page"),
    bind(C::Market, K::Home, Action::FirstPage, "First page"),
    bind(C::Market, K::End, Action::LastPage, "Last page"),
    bind(C::CookieBanner, K::Char('a'), Action::AcceptCookies, "Accept cookies"),
    bind(C::CookieBanner, K::Char('r'), Action::RejectCookies, "Reject cookies"),
    bind(C::Search, K::Enter, Action::CloseOverlay, "Keep filter"),
    bind(C::Search, K::Esc, Action::CloseOverlay, "Close"),
    bind(C::Calendar, K::Left, Action::CalendarMove(-1), "Previous day"),
    bind(C::Calendar, K::Right, Action::CalendarMove(1), "Next day"),
    bind(C::Calendar, K::Up, Action::CalendarMove(-7), "Previous week"),
    bind(C::Calendar, K::Down, Action::CalendarMove(7), "Next week"),
    bind(C::Calendar, K::PageUp, Action::CalendarPrevMonth, "Previous month"),
    bind(C::Calendar, K::Char('<'), Action::CalendarPrevMonth, "Previous month"),
    bind(C::Calendar, K::PageDown, Action::CalendarNextMonth, "Next month"),
    bind(C::Calendar, K::Char('>'), Action::CalendarNextMonth, "Next month"),
    bind(C::Calendar, K::Enter, Action::CalendarSelect, "Pick day"),
    bind(C::Calendar, K::Esc, Action::CloseOverlay, "Close"),
    bind(C::Currency, K::Up, Action::Up, "Up"),
    bind(C::Currency, K::Down, Action::Down, "Down"),
    bind(C::Currency, K::Enter, Action::Confirm, "Convert prices"),
    bind(C::Currency, K::Esc, Action::CloseOverlay, "Close"),
    bind(C::Language, K::Up, Action::Up, "Up"),
    bind(C::Language, K::Down, Action::Down, "Down"),
    bind(C::Language, K::Enter, Action::Confirm, "Switch language"),
    bind(C::Language, K::Char('b'), Action::SetLanguage(Language::Bg), "Български"),
    bind(C::Language, K::Char('e'), Action::SetLanguage(Language::En), "English"),
    bind(C::Language, K::Esc, Action::CloseOverlay, "Close"),
    bind(C::Help, K::Esc, Action::CloseOverlay, "Close"),
    bind(C::Help, K::Char('?'), Action::CloseOverlay, "Close"),
    bind(C::ErrorHistory, K::Char('k'), Action::Up, "Scroll up"),
    bind(C::ErrorHistory, K::Up, Action::Up, "Scroll up"),
    bind(C::ErrorHistory, K::Char('j'), Action::Down, "Scroll down"),
    bind(C::ErrorHistory, K::Down, Action::Down, "Scroll down"),
    bind(C::ErrorHistory, K::Esc, Action::CloseOverlay, "Close"),
];

pub fn lookup(component: Component, key: KeyCode) -> Option<Action> {
    BINDINGS
        .iter()
        .find(|b| b.component == component && b.key == key)
        .map(|b| b.action)
}

/// Bindings of one component, in table order.
pub fn bindings_for(component: Component) -> impl Iterator<Item = &'static Binding> {
    BINDINGS.iter().filter(move |b| b.component == component)
}

/// Human-readable key name for the help overlay.
pub fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "S-Tab".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Left => "←".into(),
        KeyCode::Right => "→".into(),
        KeyCode::Up => "↑".into(),
        KeyCode::Down => "↓".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PgUp".into(),
        KeyCode::PageDown => "PgDn".into(),
        other => format!("{other:?}"),
    }
}

/// Re-run the filter on the focused table with the search buffer.
pub fn apply_search(app: &mut AppContext) {
    let term = app.search_input.clone();
    filter_table(app.focused_table_mut(), &term);
    if !term.is_empty() && app.focused_table().matching_count() == 0 {
        let msg = app.t("market.no_matches", "No matching entries");
        app.set_warning(msg);
    } else if matches!(app.status_message, Some((_, StatusLevel::Warning))) {
        app.status_message = None;
    }
}

pub fn apply(app: &mut AppContext, action: Action) {
    tracing::trace!(?action, "apply");
    match action {
        Action::Quit => app.running = false,
        Action::NextTab => app.switch_tab(app.tab.next()),
        Action::PrevTab => app.switch_tab(app.tab.prev()),
        Action::SelectTab(tab) => app.switch_tab(tab),
        Action::ToggleView => {
            app.view = app.view.toggle();
            if app.view == View::Chart {
                app.render_chart();
            }
        }
        Action::SwitchFocus => app.focus = app.focus.toggle(),
        Action::SortBy(key) => sort_table(app.focused_table_mut(), key),
        Action::OpenSearch => {
            app.search_input = app.focused_table().filter().to_string();
            app.overlay = Overlay::Search;
        }
        Action::ClearFilter => {
            app.search_input.clear();
            apply_search(app);
        }
        Action::CycleEntriesPerPage => {
            let table = app.focused_table_mut();
            let next = Pagination::next_option(table.pagination().per_page);
            table.set_entries_per_page(next);
        }
        Action::NextPage => app.focused_table_mut().next_page(),
        Action::PrevPage => app.focused_table_mut().prev_page(),
        Action::FirstPage => app.focused_table_mut().go_to_page(1),
        Action::LastPage => {
            let table = app.focused_table_mut();
            let last = table.pagination().page_count(table.matching_count());
            table.go_to_page(last);
        }
        Action::OpenCalendar => app.overlay = Overlay::Calendar,
        Action::CalendarMove(days) => app.calendar.move_cursor(days),
        Action::CalendarPrevMonth => app.calendar.prev_month(),
        Action::CalendarNextMonth => app.calendar.next_month(),
        Action::CalendarSelect => {
            if app.calendar.select_cursor() {
                app.overlay = Overlay::None;
                if let Some(label) = app.calendar.range_label() {
                    app.set_status(label);
                }
            }
        }
        Action::OpenCurrencyMenu => {
            app.currency_menu.cursor = CURRENCY_OPTIONS
                .iter()
                .position(|c| *c == app.currency)
                .unwrap_or(0);
            app.overlay = Overlay::Currency;
        }
        Action::OpenLanguageMenu => {
            app.language_menu.cursor = Language::ALL
                .iter()
                .position(|l| *l == app.language())
                .unwrap_or(0);
            app.overlay = Overlay::Language;
        }
        Action::SetLanguage(lang) => {
            app.overlay = Overlay::None;
            app.set_language(lang);
        }
        Action::ToggleTheme => app.toggle_theme(),
        Action::AcceptCookies => app.record_cookie_choice(CookieChoice::Accepted),
        Action::RejectCookies => app.record_cookie_choice(CookieChoice::Rejected),
        Action::OpenHelp => app.overlay = Overlay::Help,
        Action::OpenErrors => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        Action::Up => match app.overlay {
            Overlay::Currency => app.currency_menu.up(CURRENCY_OPTIONS.len()),
            Overlay::Language => app.language_menu.up(Language::ALL.len()),
            Overlay::ErrorHistory => app.error_scroll = app.error_scroll.saturating_sub(1),
            _ => {}
        },
        Action::Down => match app.overlay {
            Overlay::Currency => app.currency_menu.down(CURRENCY_OPTIONS.len()),
            Overlay::Language => app.language_menu.down(Language::ALL.len()),
            Overlay::ErrorHistory => {
                let max = app.error_history.len().saturating_sub(1);
                app.error_scroll = (app.error_scroll + 1).min(max);
            }
            _ => {}
        },
        Action::Confirm => match app.overlay {
            Overlay::Currency => {
                app.overlay = Overlay::None;
                if let Some(code) = CURRENCY_OPTIONS.get(app.currency_menu.cursor) {
                    app.choose_currency(code);
                }
            }
            Overlay::Language => {
                if let Some(lang) = Language::ALL.get(app.language_menu.cursor) {
                    apply(app, Action::SetLanguage(*lang));
                }
            }
            _ => {}
        },
        Action::CloseOverlay => app.overlay = Overlay::None,
    }
}

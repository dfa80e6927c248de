//! Keyboard input routing: overlays, cookie banner, tables, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppContext, Overlay, View};
use crate::dispatch::{self, Action, Component};

pub fn handle_key(app: &mut AppContext, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        dispatch::apply(app, Action::Quit);
        return;
    }

    // 1. An open overlay consumes every key.
    if let Some(component) = Component::for_overlay(app.overlay) {
        if app.overlay == Overlay::Search && edit_search(app, key.code) {
            return;
        }
        if let Some(action) = dispatch::lookup(component, key.code) {
            dispatch::apply(app, action);
        }
        return;
    }

    // 2. Banner answers, while the banner is up.
    if app.cookie_banner {
        if let Some(action) = dispatch::lookup(Component::CookieBanner, key.code) {
            dispatch::apply(app, action);
            return;
        }
    }

    // 3. Table keys, then global keys.
    let action = if app.view == View::Table {
        dispatch::lookup(Component::Market, key.code)
    } else {
        None
    }
    .or_else(|| dispatch::lookup(Component::Global, key.code));

    if let Some(action) = action {
        dispatch::apply(app, action);
    }
}

/// Text editing inside the search box; the filter follows every edit.
fn edit_search(app: &mut AppContext, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => app.search_input.push(c),
        KeyCode::Backspace => {
            if app.search_input.pop().is_none() {
                return true;
            }
        }
        _ => return false,
    }
    dispatch::apply_search(app);
    true
}

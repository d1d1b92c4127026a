// Keyboard input handling.
//
// Translates crossterm key events into ViewState mutations (page and team
// selection, search text, filters) or a `UserCommand` for the event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use squad_core::player::{Role, KNOWN_ROLES};

use super::{Page, UserCommand, ViewState, CREDIT_STEP, MAX_MIN_CREDITS};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the event loop has to act; everything
/// else is handled by mutating `view_state`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.search_mode {
        handle_search_mode(key_event, view_state);
        return None;
    }

    match key_event.code {
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            view_state.page = Page::ALL[idx];
            debug!("page -> {:?}", view_state.page);
        }

        KeyCode::Right => step_team(view_state, true),
        KeyCode::Left => step_team(view_state, false),
        KeyCode::Tab => view_state.compare_side = 1 - view_state.compare_side,

        KeyCode::Char('/') => {
            view_state.page = Page::Search;
            view_state.search_mode = true;
        }

        KeyCode::Char('r') => cycle_role_filter(view_state),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            view_state.min_credits = (view_state.min_credits + CREDIT_STEP).min(MAX_MIN_CREDITS);
        }
        KeyCode::Char('-') => {
            view_state.min_credits = (view_state.min_credits - CREDIT_STEP).max(0.0);
        }

        // Esc resets every filter
        KeyCode::Esc => {
            view_state.search_text.clear();
            view_state.role_filter = None;
            view_state.min_credits = 0.0;
        }

        KeyCode::Char('q') => return Some(UserCommand::Quit),

        _ => {}
    }
    None
}

/// Search text entry: printable characters append, Backspace deletes,
/// Enter keeps the text, Esc clears it.
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_mode = false;
            view_state.search_text.clear();
        }
        KeyCode::Enter => view_state.search_mode = false,
        KeyCode::Backspace => {
            view_state.search_text.pop();
        }
        KeyCode::Char(c) => view_state.search_text.push(c),
        _ => {}
    }
}

/// Move the team selector of the current page one step, wrapping around.
fn step_team(view_state: &mut ViewState, forward: bool) {
    let n = view_state.teams.len();
    match view_state.page {
        Page::Overview => {
            view_state.overview_team = wrap(view_state.overview_team, n, forward);
        }
        Page::Comparison => {
            let side = view_state.compare_side;
            view_state.compare[side] = wrap(view_state.compare[side], n, forward);
        }
        page if page.has_all_scope() => {
            // one extra slot for "All"
            view_state.scope = wrap(view_state.scope, n + 1, forward);
        }
        _ => {}
    }
}

fn wrap(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

/// None -> WK -> BAT -> BOWL -> ALL -> None
fn cycle_role_filter(view_state: &mut ViewState) {
    view_state.role_filter = match &view_state.role_filter {
        None => Some(KNOWN_ROLES[0].clone()),
        Some(current) => {
            let idx = KNOWN_ROLES.iter().position(|r| r == current);
            match idx {
                Some(i) if i + 1 < KNOWN_ROLES.len() => Some(KNOWN_ROLES[i + 1].clone()),
                _ => None,
            }
        }
    };
    debug!("role filter -> {:?}", view_state.role_filter.as_ref().map(Role::code));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

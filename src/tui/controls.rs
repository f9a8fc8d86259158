//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::data::Country;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char('1') => app.select_country(Country::Benin),
        KeyCode::Char('2') => app.select_country(Country::SierraLeone),
        KeyCode::Char('3') => app.select_country(Country::Togo),
        KeyCode::Char('h') => app.toggle_heatmap(),
        KeyCode::Char('j') | KeyCode::Down => app.next_section(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_section(),
        KeyCode::Char('r') => app.rebuild(),
        _ => {}
    }
}

//! Input handling and keybindings

use crate::app::{ActivePane, App};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use facepick_core::{FontSpec, StyleSlot};

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Handle a key event for the active pane
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<Action> {
    if !matches!(key.code, KeyCode::Modifier(_)) {
        app.clear_status_message();
    }

    // Ctrl+C quits from anywhere
    if matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    ) {
        app.quit();
        return Ok(Action::Quit);
    }

    match app.pane {
        ActivePane::Listing => handle_listing(app, key),
        ActivePane::FacePreview => handle_faces(app, key),
        ActivePane::FaceDetail => handle_detail(app, key),
    }
}

fn handle_listing(app: &mut App, key: KeyEvent) -> Result<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.quit();
            return Ok(Action::Quit);
        }
        KeyCode::Up | KeyCode::Char('k') => app.listing.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.listing.move_down(),
        KeyCode::Enter => {
            if let Some(family) = app.listing.selected_family().map(str::to_string) {
                app.enter_faces(&family);
            }
        }
        _ => {}
    }
    Ok(Action::Continue)
}

fn handle_faces(app: &mut App, key: KeyEvent) -> Result<Action> {
    match key.code {
        KeyCode::Esc => app.back_to_listing(),
        KeyCode::Enter => {
            app.choose_current();
            return Ok(Action::Quit);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(slot) = StyleSlot::from_key(c) {
                app.enter_detail(slot);
            }
        }
        _ => {}
    }
    Ok(Action::Continue)
}

fn handle_detail(app: &mut App, key: KeyEvent) -> Result<Action> {
    match key.code {
        KeyCode::Esc => app.return_to_faces(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.set_detail_spec(FontSpec::Auto),
        _ => {}
    }
    Ok(Action::Continue)
}

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::error::{ClientError, Result};
use shiftdesk_common::virtual_list::SelectionContext;

use super::app::{App, StatusKind};

/// Lines moved per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    // Help popup → any key dismisses
    if app.popup.is_some() {
        app.popup = None;
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('?') => app.toggle_help(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(now),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(now),
        KeyCode::Char('g') => app.select_first(now),
        KeyCode::Char('G') => app.select_last(now),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.scroll_to_end(),
        KeyCode::PageDown => page_scroll(app, 1),
        KeyCode::PageUp => page_scroll(app, -1),
        KeyCode::Enter => app.toggle_detail(now),
        KeyCode::Esc => app.clear_selection(now),

        // Filters
        KeyCode::Char('f') => app.cycle_role_filter(),
        KeyCode::Char('b') => app.toggle_hide_fully_booked(),
        KeyCode::Char('o') => app.toggle_order(),
        KeyCode::Char('r') => app.reload(),

        KeyCode::Char('y') => copy_to_clipboard(app)?,
        KeyCode::Char('x') => app.dismiss_banner(),
        _ => {}
    }
    Ok(())
}

/// Handle a mouse event. Only the wheel does anything.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let delta = match mouse.kind {
        MouseEventKind::ScrollDown => WHEEL_STEP,
        MouseEventKind::ScrollUp => -WHEEL_STEP,
        _ => return,
    };
    let disabled = app.scroll_disabled();
    app.surface.wheel(delta, disabled);
}

/// Scroll a full container height in `direction`
fn page_scroll(app: &mut App, direction: i32) {
    let page = i32::from(app.surface.viewport().container_height);
    let disabled = app.scroll_disabled();
    app.surface.wheel(direction * page, disabled);
}

fn copy_to_clipboard(app: &mut App) -> Result<()> {
    match app.copy_selected() {
        Ok(()) => {
            let text = match app.selection.selected_id() {
                Some(id) => format!("Copied shift {id} to clipboard"),
                None => "Copied to clipboard".to_string(),
            };
            app.set_status(text, StatusKind::Success);
            Ok(())
        }
        // Not fatal for the session; report and carry on
        Err(err @ (ClientError::NothingSelected | ClientError::Clipboard(_))) => {
            app.set_status(err.to_string(), StatusKind::Error);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::ui::ScreenLayout;

/// Where the `e` key writes the current state.
pub const EXPORT_FILE: &str = "statusboard_export.json";

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: u16 = 3;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Focus
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus_prev();
            } else {
                app.focus_next();
            }
        }
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Left | KeyCode::Char('h') => app.focus_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.focus_next(),
        KeyCode::Char('1') => app.focus(0),
        KeyCode::Char('2') => app.focus(1),

        // Scrolling within the focused panel
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),

        // Fetch now
        KeyCode::Char('r') => app.refresh_all(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// The wheel scrolls whichever panel is under the pointer, a left click focuses it.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, layout: &ScreenLayout) {
    let target = layout.panel_at(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if let Some(panel) = target.and_then(|i| app.panels.get_mut(i)) {
                panel.scroll_up(WHEEL_LINES);
            }
        }
        MouseEventKind::ScrollDown => {
            if let Some(panel) = target.and_then(|i| app.panels.get_mut(i)) {
                panel.scroll_down(WHEEL_LINES);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(i) = target {
                app.focus(i);
            }
        }
        _ => {}
    }
}

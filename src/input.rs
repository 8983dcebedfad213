use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::models::Screen;

/// Applies one key press to the app.
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return;
        }
        _ => {}
    }

    match app.screen() {
        Screen::Welcome => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.start_stream(),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.navigate_by(1),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => app.navigate_by(-1),
            _ => {}
        },
        Screen::Stream => {}
        Screen::Debug => match key.code {
            KeyCode::Char('a') => {
                app.spawn_popup(now);
            }
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                app.toggle_auto_spawn();
            }
            KeyCode::Char('c') => {
                app.clear();
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.navigate_by(1),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => app.navigate_by(-1),
            _ => {}
        },
    }
}

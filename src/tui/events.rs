use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppScreen, AppState};

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Key(key_event) = event {
        if key_event.code == KeyCode::Char('q') && key_event.modifiers == KeyModifiers::NONE {
            state.should_quit = true;
            return;
        }

        match state.screen {
            AppScreen::PictureList => handle_picture_list(key_event, state),
            AppScreen::PictureDetail => handle_picture_detail(key_event, state),
        }
    }
}

fn handle_picture_list(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char('r') => state.retry(),
        KeyCode::Esc => state.should_quit = true,
        // The remaining keys only make sense once pictures are shown.
        _ if !state.has_pictures() => {}
        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor = state.cursor.saturating_sub(1);
            state.clamp_cursor();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.cursor += 1;
            state.clamp_cursor();
        }
        KeyCode::Home => {
            state.cursor = 0;
            state.clamp_cursor();
        }
        KeyCode::End => {
            state.cursor = usize::MAX;
            state.clamp_cursor();
        }
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('t') => {
            state.view_model.sort_title_wise();
            state.clamp_cursor();
            state.set_status("Sorted by title");
        }
        KeyCode::Char('d') => {
            state.view_model.sort_date_wise();
            state.clamp_cursor();
            state.set_status("Sorted by date, newest first");
        }
        _ => {}
    }
}

fn handle_picture_detail(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => state.close_detail(),
        KeyCode::Up | KeyCode::Char('k') => {
            state.detail_scroll = state.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.detail_scroll = state.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('f') => {
            if let Some(picture) = state.view_model.selected_picture().cloned() {
                state.view_model.add_favourite(&picture);
                state.set_status("Favourites: feature coming soon...");
            }
        }
        _ => {}
    }
}

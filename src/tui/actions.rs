use super::state::{AppScreen, AppState};

/// Apply finished fetches and keep the screens consistent with the result.
pub fn process_state(state: &mut AppState) {
    if !state.view_model.poll() {
        return;
    }

    state.clamp_cursor();
    if state.screen == AppScreen::PictureDetail && state.view_model.selected_picture().is_none() {
        state.screen = AppScreen::PictureList;
    }
}

use crate::{ApodViewModel, FetchState};

/// Rows the key handlers assume are visible when scrolling the list.
/// The renderer corrects the offset if the table is shorter.
pub(crate) const LIST_SCROLL_ROWS: usize = 10;

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Loading indicator, error screen or picture list, depending on the fetch state.
    PictureList,
    /// Detail view of the selected picture.
    PictureDetail,
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Owner of the fetch state, display list and selection.
    pub(crate) view_model: ApodViewModel,
    /// Feed base URL, shown in the status bar.
    pub(crate) api_url: String,
    /// Highlighted row in the picture list.
    pub(crate) cursor: usize,
    /// First picture-list row shown in the table.
    pub(crate) list_scroll: usize,
    /// Scroll offset of the explanation on the detail screen.
    pub(crate) detail_scroll: u16,
    /// Transient message shown in the status bar.
    pub(crate) status_message: Option<String>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl AppState {
    /// Create the application state around an already started view-model.
    pub fn new(view_model: ApodViewModel, api_url: impl Into<String>) -> Self {
        Self {
            screen: AppScreen::PictureList,
            view_model,
            api_url: api_url.into(),
            cursor: 0,
            list_scroll: 0,
            detail_scroll: 0,
            status_message: None,
            should_quit: false,
        }
    }

    /// Whether the picture list is currently shown with data.
    pub(crate) fn has_pictures(&self) -> bool {
        matches!(self.view_model.api_state(), FetchState::Success(_))
            && !self.view_model.recent_pictures().is_empty()
    }

    /// Keep the cursor inside the display list and scrolled into view.
    pub(crate) fn clamp_cursor(&mut self) {
        let len = self.view_model.recent_pictures().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        ensure_selection_visible(self.cursor, &mut self.list_scroll, LIST_SCROLL_ROWS, len);
    }

    /// Open the detail screen for the highlighted picture.
    pub(crate) fn open_selected(&mut self) {
        if self.has_pictures() && self.view_model.select_index(self.cursor) {
            self.detail_scroll = 0;
            self.screen = AppScreen::PictureDetail;
        }
    }

    /// Leave the detail screen and clear the selection.
    pub(crate) fn close_detail(&mut self) {
        self.view_model.reset_selected_picture();
        self.screen = AppScreen::PictureList;
        self.clear_status();
    }

    pub(crate) fn retry(&mut self) {
        self.view_model.retry();
        self.cursor = 0;
        self.list_scroll = 0;
        self.screen = AppScreen::PictureList;
        self.clear_status();
    }

    /// Clear any status message.
    pub(crate) fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Set a status message.
    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

/// Move `scroll` so that `selection` lies inside a window of `visible_rows`.
pub(crate) fn ensure_selection_visible(
    selection: usize,
    scroll: &mut usize,
    visible_rows: usize,
    total_rows: usize,
) {
    if visible_rows == 0 {
        return;
    }

    if selection < *scroll {
        *scroll = selection;
    } else if selection >= *scroll + visible_rows {
        *scroll = selection - visible_rows.saturating_sub(1);
    }

    *scroll = (*scroll).min(total_rows.saturating_sub(1));
}

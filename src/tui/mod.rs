//! Terminal browser for the picture feed.

pub mod actions;
pub mod events;
pub mod state;
pub mod terminal;
pub mod ui;

pub use actions::process_state;
pub use events::handle_event;
pub use state::AppState;
pub use terminal::{restore_terminal, setup_terminal, Tui};
pub use ui::render;

#[cfg(test)]
pub(crate) mod test_support;

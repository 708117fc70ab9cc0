//! Astronomy Picture of the Day TUI Application
//!
//! A terminal user interface for browsing the APOD feed.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event;
use log::info;

use apod_client::tui::{
    handle_event, process_state, render, restore_terminal, setup_terminal, AppState,
};
use apod_client::{logging, ApodClient, ApodConfig, ApodViewModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApodConfig::from_env()?;
    logging::initialize(&config.log_file);
    info!("starting apod-tui against {}", config.base_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let client = ApodClient::new(&config)?;
    let view_model = ApodViewModel::new(Arc::new(client), runtime.handle().clone());
    let mut state = AppState::new(view_model, config.base_url.clone());

    let mut terminal = setup_terminal()?;

    loop {
        terminal.draw(|f| render(f, &state))?;

        process_state(&mut state);

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, &mut state);
        }
    }

    restore_terminal(&mut terminal)?;
    info!("apod-tui exiting");
    Ok(())
}

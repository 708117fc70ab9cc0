//! Logger initialization.
//!
//! The terminal is owned by the TUI while it runs, so the binary logs to a
//! file only. Tests log to the terminal.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Install a file logger at `path`, truncating any previous log.
///
/// If the file cannot be created a warning is printed to stderr and the
/// process runs without logging.
pub fn initialize(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            return;
        }
    };

    let loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(LevelFilter::Info, build_config(), file)];
    let _ = CombinedLogger::init(loggers);
}

/// Initializes a terminal logger for tests.
///
/// Safe to call repeatedly; later calls are no-ops.
pub fn initialize_for_tests() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

//! Astronomy Picture of the Day client library for Rust.
//!
//! Fetches NASA's [APOD](https://api.nasa.gov) feed and exposes it through a
//! small view-model: the state of the latest request, the list of image
//! entries sorted by title, and the picture the user selected. A terminal
//! browser built on the view-model ships as the `apod-tui` binary.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use apod_client::{ApodClient, ApodConfig, ApodViewModel, FetchState};
//!
//! # async fn run() -> apod_client::Result<()> {
//! let client = ApodClient::new(&ApodConfig::from_env()?)?;
//! let mut vm = ApodViewModel::new(Arc::new(client), tokio::runtime::Handle::current());
//!
//! vm.settle().await;
//! if let FetchState::Success(_) = vm.api_state() {
//!     for p in vm.recent_pictures() {
//!         println!("{}: {}", p.display_date(), p.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod tui;
pub mod viewmodel;

// Re-export the main public types at the crate root for convenience.
pub use client::{ApodClient, PictureSource, APOD_ENDPOINT};
pub use config::ApodConfig;
pub use error::{ApodApiError, ErrorCopy, FailureKind, Result, GENERIC_ERROR, NETWORK_ERROR};
pub use models::Picture;
pub use viewmodel::{ApodViewModel, FetchState, RequestToken};

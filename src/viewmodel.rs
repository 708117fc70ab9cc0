//! The fetch state machine behind the picture browser.
//!
//! [`ApodViewModel`] owns three observable values: the [`FetchState`] of the
//! latest request, the derived display list and the current selection. All
//! writes happen through `&mut self`, so whoever owns the view-model is the
//! single writer; fetches run on a tokio runtime and hand their results back
//! over a channel that [`ApodViewModel::poll`] drains.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use log::{debug, info, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::client::PictureSource;
use crate::error::{ApodApiError, ErrorCopy, FailureKind, Result};
use crate::models::Picture;

/// Outcome of the most recent fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    /// Raw feed payload, unfiltered and in feed order.
    Success(Vec<Picture>),
    Error {
        title: &'static str,
        message: &'static str,
    },
}

impl FetchState {
    fn from_copy(copy: ErrorCopy) -> Self {
        FetchState::Error {
            title: copy.title,
            message: copy.message,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

/// Identifies one issued fetch; only the latest one may publish.
pub type RequestToken = u64;

struct Completion {
    token: RequestToken,
    result: Result<Vec<Picture>>,
}

/// Keep image entries only, ordered by title.
pub fn derive_display_list(raw: &[Picture]) -> Vec<Picture> {
    let mut list: Vec<Picture> = raw.iter().filter(|p| p.is_image()).cloned().collect();
    sort_by_title(&mut list);
    list
}

/// Ascending by title; ties keep their relative order.
pub fn sort_by_title(list: &mut [Picture]) {
    list.sort_by(|a, b| a.title.cmp(&b.title));
}

/// Newest first; ties keep their relative order.
pub fn sort_by_date_desc(list: &mut [Picture]) {
    list.sort_by(|a, b| b.date.cmp(&a.date));
}

/// State holder for the picture browser.
pub struct ApodViewModel {
    source: Arc<dyn PictureSource>,
    runtime: Handle,
    state: FetchState,
    recent: Vec<Picture>,
    selected: Option<usize>,
    latest_token: RequestToken,
    in_flight: Option<JoinHandle<()>>,
    completion_tx: UnboundedSender<Completion>,
    completion_rx: UnboundedReceiver<Completion>,
}

impl ApodViewModel {
    /// Create the view-model and immediately start the first fetch.
    pub fn new(source: Arc<dyn PictureSource>, runtime: Handle) -> Self {
        let (completion_tx, completion_rx) = unbounded_channel();
        let mut vm = Self {
            source,
            runtime,
            state: FetchState::Loading,
            recent: Vec::new(),
            selected: None,
            latest_token: 0,
            in_flight: None,
            completion_tx,
            completion_rx,
        };
        vm.fetch_pictures();
        vm
    }

    // -- observers -----------------------------------------------------------

    pub fn api_state(&self) -> &FetchState {
        &self.state
    }

    /// The derived display list: image entries of the last successful fetch.
    pub fn recent_pictures(&self) -> &[Picture] {
        &self.recent
    }

    pub fn selected_picture(&self) -> Option<&Picture> {
        self.selected.and_then(|i| self.recent.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Token of the most recently issued fetch.
    pub fn latest_token(&self) -> RequestToken {
        self.latest_token
    }

    // -- commands ------------------------------------------------------------

    /// Return to `Loading` and issue a fresh fetch, whatever the current state.
    pub fn retry(&mut self) {
        info!("retry requested in state {}", state_name(&self.state));
        self.fetch_pictures();
    }

    /// Select `picture` if it is part of the display list.
    ///
    /// Returns `false` and leaves the selection untouched otherwise.
    pub fn select_picture(&mut self, picture: &Picture) -> bool {
        match self.recent.iter().position(|p| p == picture) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => {
                debug!("ignoring selection of unknown picture {:?}", picture.title);
                false
            }
        }
    }

    /// Select the picture at `index` of the display list.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.recent.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn reset_selected_picture(&mut self) {
        self.selected = None;
    }

    pub fn sort_title_wise(&mut self) {
        let selected = self.selected_picture().cloned();
        sort_by_title(&mut self.recent);
        self.reselect(selected);
    }

    pub fn sort_date_wise(&mut self) {
        let selected = self.selected_picture().cloned();
        sort_by_date_desc(&mut self.recent);
        self.reselect(selected);
    }

    pub fn add_favourite(&mut self, picture: &Picture) {
        debug!("favourites not supported yet, ignoring add of {:?}", picture.title);
    }

    pub fn remove_favourite(&mut self, picture: &Picture) {
        debug!("favourites not supported yet, ignoring removal of {:?}", picture.title);
    }

    // -- driving -------------------------------------------------------------

    /// Apply every completion that has landed so far without blocking.
    ///
    /// Returns `true` if the published state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait until the latest fetch has been applied.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            match self.completion_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    // -- internals -----------------------------------------------------------

    fn fetch_pictures(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        self.latest_token += 1;
        let token = self.latest_token;
        self.state = FetchState::Loading;
        debug!("fetch {token} started");

        let source = Arc::clone(&self.source);
        let tx = self.completion_tx.clone();
        self.in_flight = Some(self.runtime.spawn(async move {
            // A panicking source still has to move the state out of Loading.
            let result = AssertUnwindSafe(source.fetch_pictures())
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(ApodApiError::TaskFailed(panic_message(&*panic))));
            let _ = tx.send(Completion { token, result });
        }));
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.token != self.latest_token {
            debug!(
                "discarding stale fetch {} (latest is {})",
                completion.token, self.latest_token
            );
            return false;
        }
        self.in_flight = None;

        match completion.result {
            Ok(pictures) if !pictures.is_empty() => {
                let selected = self.selected_picture().cloned();
                self.recent = derive_display_list(&pictures);
                self.reselect(selected);
                info!(
                    "fetch {} succeeded: {} entries, {} displayable",
                    completion.token,
                    pictures.len(),
                    self.recent.len()
                );
                self.state = FetchState::Success(pictures);
            }
            Ok(_) => {
                warn!("fetch {} returned no pictures", completion.token);
                self.state = FetchState::from_copy(FailureKind::Other.copy());
            }
            Err(e) => {
                warn!("fetch {} failed: {e}", completion.token);
                self.state = FetchState::from_copy(e.kind().copy());
            }
        }
        true
    }

    /// Point the selection at `previous` in the current list, or clear it.
    fn reselect(&mut self, previous: Option<Picture>) {
        self.selected = previous.and_then(|p| self.recent.iter().position(|q| *q == p));
    }
}

impl Drop for ApodViewModel {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}

fn state_name(state: &FetchState) -> &'static str {
    match state {
        FetchState::Loading => "Loading",
        FetchState::Success(_) => "Success",
        FetchState::Error { .. } => "Error",
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::state::AppState;
use crate::{ApodApiError, ApodViewModel, Picture, PictureSource, Result};

/// Answers every fetch with the same canned result.
pub(crate) struct FixedSource(pub Option<Vec<Picture>>);

#[async_trait]
impl PictureSource for FixedSource {
    async fn fetch_pictures(&self) -> Result<Vec<Picture>> {
        self.0
            .clone()
            .ok_or_else(|| ApodApiError::Network("offline".into()))
    }
}

pub(crate) fn picture(title: &str, date: &str) -> Picture {
    Picture {
        title: title.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        explanation: format!("All about {title}."),
        media_type: "image".to_string(),
        url: format!("https://apod.example/{title}.jpg"),
        hdurl: None,
        copyright: None,
    }
}

/// App state whose first fetch has already been applied.
pub(crate) async fn settled_state(pictures: Option<Vec<Picture>>) -> AppState {
    let source: Arc<dyn PictureSource> = Arc::new(FixedSource(pictures));
    let mut vm = ApodViewModel::new(source, tokio::runtime::Handle::current());
    vm.settle().await;
    AppState::new(vm, "http://apod.test")
}

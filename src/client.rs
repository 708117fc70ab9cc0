use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response};

use crate::config::ApodConfig;
use crate::error::{ApodApiError, Result};
use crate::models::Picture;

/// Feed endpoint, relative to the configured base URL.
pub const APOD_ENDPOINT: &str = "/planetary/apod";

// ---------------------------------------------------------------------------
// Picture source seam
// ---------------------------------------------------------------------------

/// Anything that can produce one batch of pictures per call.
///
/// [`ApodClient`] is the HTTP implementation; the view-model only depends on
/// this trait.
#[async_trait]
pub trait PictureSource: Send + Sync {
    async fn fetch_pictures(&self) -> Result<Vec<Picture>>;
}

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Shared logic for building a configured [`Client`] and making requests.
struct BaseClient {
    base_url: String,
    http: Client,
}

impl BaseClient {
    fn new(config: &ApodConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApodApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the full URL for a given endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Map the status code to an error or hand back the raw body.
    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status().as_u16();
        let body = response.text().await?;

        if (200..300).contains(&status) {
            return Ok(body);
        }

        let message = error_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
        Err(ApodApiError::Status { status, message })
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<String> {
        let resp = self.http.get(self.url(endpoint)).query(query).send().await?;
        self.handle_response(resp).await
    }
}

/// Pull a human-readable message out of an API error body.
///
/// The API gateway answers with either `{"error": {"message": ...}}` or
/// `{"code": ..., "msg": ...}`.
fn error_message(body: &str) -> Option<String> {
    let data: serde_json::Value = serde_json::from_str(body).ok()?;
    data.get("msg")
        .or_else(|| data.get("error").and_then(|e| e.get("message")))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// HTTP client for the Astronomy Picture of the Day feed.
///
/// ```no_run
/// use apod_client::{ApodClient, ApodConfig};
///
/// # async fn run() -> apod_client::Result<()> {
/// let client = ApodClient::new(&ApodConfig::default())?;
/// for picture in client.fetch_pictures().await? {
///     println!("{}: {}", picture.date, picture.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApodClient {
    base: BaseClient,
    api_key: String,
    count: u32,
}

impl ApodClient {
    /// Create a new client from the given configuration.
    pub fn new(config: &ApodConfig) -> Result<Self> {
        Ok(Self {
            base: BaseClient::new(config)?,
            api_key: config.api_key.clone(),
            count: config.count,
        })
    }

    /// Fetch one batch of pictures, in the order the feed returned them.
    ///
    /// Performs exactly one request. An empty array is reported as
    /// [`ApodApiError::EmptyFeed`].
    pub async fn fetch_pictures(&self) -> Result<Vec<Picture>> {
        let query = [
            ("api_key", self.api_key.clone()),
            ("count", self.count.to_string()),
        ];
        debug!("GET {}{APOD_ENDPOINT} count={}", self.base.base_url, self.count);

        let body = self.base.get(APOD_ENDPOINT, &query).await.map_err(|e| {
            warn!("APOD request failed: {e}");
            e
        })?;

        let pictures: Vec<Picture> = serde_json::from_str(&body).map_err(|e| {
            warn!("APOD response could not be decoded: {e}");
            ApodApiError::Decode(e.to_string())
        })?;
        if pictures.is_empty() {
            warn!("APOD response contained no entries");
            return Err(ApodApiError::EmptyFeed);
        }

        debug!("APOD response contained {} entries", pictures.len());
        Ok(pictures)
    }
}

#[async_trait]
impl PictureSource for ApodClient {
    async fn fetch_pictures(&self) -> Result<Vec<Picture>> {
        ApodClient::fetch_pictures(self).await
    }
}

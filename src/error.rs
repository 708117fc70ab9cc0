use thiserror::Error;

/// Error type for APOD feed operations.
///
/// - `Network`: transport failures such as refused connections or timeouts
/// - `Status`: any non-2xx status code
/// - `Decode`: body is not JSON or an entry is missing a required field
/// - `EmptyFeed`: the feed answered with an empty array
/// - `Config`: invalid configuration value
/// - `Client`: the HTTP client could not be built
/// - `TaskFailed`: the fetch task panicked before producing a result
#[derive(Debug, Error)]
pub enum ApodApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Decode(String),

    #[error("Feed returned no pictures")]
    EmptyFeed,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

impl ApodApiError {
    /// Collapse the error into one of the two user-visible failure kinds.
    pub fn kind(&self) -> FailureKind {
        match self {
            ApodApiError::Network(_) => FailureKind::Network,
            _ => FailureKind::Other,
        }
    }
}

impl From<reqwest::Error> for ApodApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return ApodApiError::Client(err.to_string());
        }
        if err.is_decode() {
            return ApodApiError::Decode(err.to_string());
        }
        ApodApiError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApodApiError>;

/// The failure categories the presentation layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Other,
}

/// Fixed title/message pair shown on the error screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCopy {
    pub title: &'static str,
    pub message: &'static str,
}

pub const GENERIC_ERROR: ErrorCopy = ErrorCopy {
    title: "Oops! Something went wrong!",
    message: "Please refresh the page and try again",
};

pub const NETWORK_ERROR: ErrorCopy = ErrorCopy {
    title: "No network connection",
    message: "Please check your network and try again",
};

impl FailureKind {
    pub fn copy(self) -> ErrorCopy {
        match self {
            FailureKind::Network => NETWORK_ERROR,
            FailureKind::Other => GENERIC_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_errors_classify_as_network() {
        assert_eq!(
            ApodApiError::Network("connection refused".into()).kind(),
            FailureKind::Network
        );
        assert_eq!(
            ApodApiError::Status {
                status: 500,
                message: "HTTP 500".into()
            }
            .kind(),
            FailureKind::Other
        );
        assert_eq!(ApodApiError::Decode("eof".into()).kind(), FailureKind::Other);
        assert_eq!(ApodApiError::EmptyFeed.kind(), FailureKind::Other);
        assert_eq!(
            ApodApiError::TaskFailed("panicked".into()).kind(),
            FailureKind::Other
        );
    }

    #[test]
    fn each_kind_has_distinct_copy() {
        assert_eq!(FailureKind::Network.copy(), NETWORK_ERROR);
        assert_eq!(FailureKind::Other.copy(), GENERIC_ERROR);
        assert_ne!(NETWORK_ERROR.title, GENERIC_ERROR.title);
    }
}

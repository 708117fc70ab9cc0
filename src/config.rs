use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ApodApiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_COUNT: u32 = 20;
/// Upper bound accepted by the APOD `count` parameter.
pub const MAX_COUNT: u32 = 100;

/// Settings for reaching the APOD feed.
///
/// Values are read from the environment by [`ApodConfig::from_env`]:
///
/// | Variable                    | Default                |
/// |-----------------------------|------------------------|
/// | `APOD_BASE_URL`             | `https://api.nasa.gov` |
/// | `NASA_API_KEY`              | `DEMO_KEY`             |
/// | `APOD_COUNT`                | `20`                   |
/// | `APOD_CONNECT_TIMEOUT_SECS` | `10`                   |
/// | `APOD_TIMEOUT_SECS`         | `30`                   |
/// | `APOD_LOG_FILE`             | `./apod.log`           |
#[derive(Debug, Clone, PartialEq)]
pub struct ApodConfig {
    pub base_url: String,
    pub api_key: String,
    /// Number of random entries requested per fetch.
    pub count: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            count: DEFAULT_COUNT,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            log_file: PathBuf::from("./apod.log"),
        }
    }
}

impl ApodConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing or blank keys fall back to the defaults; malformed numbers are
    /// rejected with [`ApodApiError::Config`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let count = match get("APOD_COUNT") {
            Some(raw) => parse_number("APOD_COUNT", &raw)?,
            None => defaults.count,
        };
        if count == 0 || count > MAX_COUNT {
            return Err(ApodApiError::Config(format!(
                "APOD_COUNT must be between 1 and {MAX_COUNT}, got {count}"
            )));
        }

        let connect_timeout = match get("APOD_CONNECT_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("APOD_CONNECT_TIMEOUT_SECS", &raw)?,
            None => defaults.connect_timeout,
        };
        let request_timeout = match get("APOD_TIMEOUT_SECS") {
            Some(raw) => parse_timeout("APOD_TIMEOUT_SECS", &raw)?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            base_url: get("APOD_BASE_URL").unwrap_or(defaults.base_url),
            api_key: get("NASA_API_KEY").unwrap_or(defaults.api_key),
            count,
            connect_timeout,
            request_timeout,
            log_file: get("APOD_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| ApodApiError::Config(format!("{key} is not a valid number: {raw:?}")))
}

/// A zero timeout would fail every request before it is sent.
fn parse_timeout(key: &str, raw: &str) -> Result<Duration> {
    match parse_number(key, raw)? {
        0 => Err(ApodApiError::Config(format!("{key} must be at least 1 second"))),
        secs => Ok(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ApodConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApodConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = ApodConfig::from_lookup(lookup(&[
            ("APOD_BASE_URL", "http://localhost:8080"),
            ("NASA_API_KEY", " secret "),
            ("APOD_COUNT", "5"),
            ("APOD_TIMEOUT_SECS", "3"),
            ("APOD_LOG_FILE", "/tmp/apod.log"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.count, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.log_file, PathBuf::from("/tmp/apod.log"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ApodConfig::from_lookup(lookup(&[("NASA_API_KEY", "   ")])).unwrap();
        assert_eq!(config.api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn rejects_malformed_and_out_of_range_counts() {
        let err = ApodConfig::from_lookup(lookup(&[("APOD_COUNT", "many")])).unwrap_err();
        assert!(matches!(err, ApodApiError::Config(_)));

        let err = ApodConfig::from_lookup(lookup(&[("APOD_COUNT", "0")])).unwrap_err();
        assert!(matches!(err, ApodApiError::Config(_)));

        let err = ApodConfig::from_lookup(lookup(&[("APOD_COUNT", "101")])).unwrap_err();
        assert!(matches!(err, ApodApiError::Config(_)));
    }

    #[test]
    fn rejects_malformed_timeout() {
        let err =
            ApodConfig::from_lookup(lookup(&[("APOD_TIMEOUT_SECS", "-1")])).unwrap_err();
        assert!(matches!(err, ApodApiError::Config(_)));
    }

    #[test]
    fn rejects_zero_timeouts() {
        let err =
            ApodConfig::from_lookup(lookup(&[("APOD_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ApodApiError::Config(_)));

        let err = ApodConfig::from_lookup(lookup(&[("APOD_CONNECT_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ApodApiError::Config(_)));
    }
}

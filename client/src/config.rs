//! Client configuration from environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend when `LIFIT_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Cloudinary upload API root; `{base}/{cloud}/image/upload` is the endpoint
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Unsigned upload preset of the LiFit Cloudinary account
pub const DEFAULT_UPLOAD_PRESET: &str = "TesteLifit";

pub const DEFAULT_FEED_PAGE_SIZE: usize = 15;
pub const DEFAULT_TOKEN_RETRY_MS: u64 = 100;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend root, without trailing slash
    pub api_url: String,
    /// JSON file the session token is mirrored to
    pub token_file: PathBuf,
    pub feed_page_size: usize,
    /// Delay before the one-shot token re-read in the request interceptor
    pub token_retry_delay: Duration,
    pub search_debounce: Duration,
    /// Whole-request timeout; `None` keeps reqwest's default (no timeout)
    pub request_timeout: Option<Duration>,
    pub upload: UploadConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    pub base_url: String,
    pub cloud_name: Option<String>,
    pub upload_preset: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token_file: PathBuf::from(".lifit/session.json"),
            feed_page_size: DEFAULT_FEED_PAGE_SIZE,
            token_retry_delay: Duration::from_millis(DEFAULT_TOKEN_RETRY_MS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            request_timeout: None,
            upload: UploadConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            cloud_name: None,
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let api_url = env::var("LIFIT_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let token_file = env::var("LIFIT_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_file);

        let feed_page_size = parse_var("LIFIT_FEED_PAGE_SIZE", DEFAULT_FEED_PAGE_SIZE)
            .map_err(|_| "LIFIT_FEED_PAGE_SIZE must be a valid number")?;

        let token_retry_ms = parse_var("LIFIT_TOKEN_RETRY_MS", DEFAULT_TOKEN_RETRY_MS)
            .map_err(|_| "LIFIT_TOKEN_RETRY_MS must be a valid number of milliseconds")?;

        let debounce_ms = parse_var("LIFIT_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)
            .map_err(|_| "LIFIT_SEARCH_DEBOUNCE_MS must be a valid number of milliseconds")?;

        let request_timeout = match env::var("LIFIT_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.parse()
                    .map_err(|_| "LIFIT_REQUEST_TIMEOUT_SECS must be a valid number of seconds")?,
            )),
            Err(_) => None,
        };

        let upload = UploadConfig {
            base_url: env::var("LIFIT_CLOUDINARY_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_UPLOAD_BASE_URL.to_string()),
            cloud_name: env::var("LIFIT_CLOUDINARY_CLOUD").ok().filter(|c| !c.is_empty()),
            upload_preset: env::var("LIFIT_CLOUDINARY_PRESET")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_PRESET.to_string()),
        };

        Ok(Self {
            api_url,
            token_file,
            feed_page_size,
            token_retry_delay: Duration::from_millis(token_retry_ms),
            search_debounce: Duration::from_millis(debounce_ms),
            request_timeout,
            upload,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err("LIFIT_API_URL must start with http:// or https://".to_string());
        }

        if self.feed_page_size == 0 || self.feed_page_size > 100 {
            return Err("LIFIT_FEED_PAGE_SIZE must be between 1 and 100".to_string());
        }

        if self.token_retry_delay > Duration::from_secs(5) {
            return Err("LIFIT_TOKEN_RETRY_MS must not exceed 5000".to_string());
        }

        if self.request_timeout == Some(Duration::ZERO) {
            return Err("LIFIT_REQUEST_TIMEOUT_SECS must be greater than zero".to_string());
        }

        if self.upload.upload_preset.trim().is_empty() {
            return Err("LIFIT_CLOUDINARY_PRESET must not be empty".to_string());
        }

        Ok(())
    }

    /// Config pointing at a test server, with no token retry delay
    pub fn for_base_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_retry_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, T::Err> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse(),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feed_page_size, 15);
        assert_eq!(config.token_retry_delay, Duration::from_millis(100));
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.api_url = "localhost:8080".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.feed_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.request_timeout = Some(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_for_base_url_strips_trailing_slash() {
        let config = ClientConfig::for_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.token_retry_delay, Duration::ZERO);
    }
}

//! Client configuration.
//!
//! The API key is passed in explicitly. The env var names are shared with
//! the CLI, which reads them through clap.

use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com";
pub const ARTICLE_SEARCH_PATH: &str = "/svc/search/v2/articlesearch.json";
pub const TIMES_TAGS_PATH: &str = "/svc/suggest/v1/timestags";

pub const API_KEY_ENV: &str = "NYT_API_KEY";
pub const BASE_URL_ENV: &str = "NYT_API_BASE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Applied by transports; the core never waits on anything.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The key every request carries; empty means unconfigured.
    pub(crate) fn require_api_key(&self) -> Result<&str, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(&self.api_key)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

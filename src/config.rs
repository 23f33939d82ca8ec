//! Client configuration.

use reqwest::Url;
use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default ActorHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.actorhub.ai";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of attempts per call.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ACTORHUB_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "ACTORHUB_BASE_URL";

/// SDK version reported in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings fixed at client construction.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Total attempts per call, including the first. 0 behaves like 1.
    pub max_retries: u32,
    /// Backoff before retry `n` is `backoff_base * 2^n`, capped at `max_backoff`.
    pub backoff_base: Duration,
    pub max_backoff: Duration,
    pub user_agent: String,
    /// Transport to use instead of building a fresh one.
    pub http_client: Option<reqwest::Client>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"*****")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff_base", &self.backoff_base)
            .field("max_backoff", &self.max_backoff)
            .field("user_agent", &self.user_agent)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: Duration::from_secs(1),
            max_backoff: Duration::from_secs(10),
            user_agent: format!("actorhub-rust/{}", VERSION),
            http_client: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reads the API key and optional base URL from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            Error::InvalidConfig(format!("{} environment variable is not set", API_KEY_ENV))
        })?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Sets the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, base: Duration, max: Duration) -> Self {
        self.backoff_base = base;
        self.max_backoff = max;
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Checks the fields a request cannot be built without.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("API key must not be empty".to_string()));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidConfig(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "Base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("Timeout must be greater than zero".to_string()));
        }
        if self.backoff_base > self.max_backoff {
            return Err(Error::InvalidConfig(
                "Backoff base must not exceed the backoff ceiling".to_string(),
            ));
        }
        Ok(())
    }
}

//! Error taxonomy returned by every client call.

use serde_json::{Map, Value};
use std::fmt;

/// Result alias used throughout the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fields shared by every error the API itself reported.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiErrorInfo {
    pub message: String,
    pub status: u16,
    /// Correlation id from the `X-Request-ID` response header, empty when absent.
    pub request_id: String,
    /// Parsed JSON error body, when the server sent an object.
    pub response_data: Option<Map<String, Value>>,
}

impl ApiErrorInfo {
    pub fn new(message: impl Into<String>, status: u16, request_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            request_id: request_id.into(),
            response_data: None,
        }
    }

    pub fn with_response_data(mut self, data: Option<Map<String, Value>>) -> Self {
        self.response_data = data;
        self
    }
}

impl fmt::Display for ApiErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if self.status > 0 {
            write!(f, " (HTTP {})", self.status)?;
        }
        if !self.request_id.is_empty() {
            write!(f, " [Request ID: {}]", self.request_id)?;
        }
        Ok(())
    }
}

/// Errors produced by [`crate::Client`] and the dispatcher behind it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP 401.
    #[error("{0}")]
    Authentication(ApiErrorInfo),

    /// HTTP 404.
    #[error("{0}")]
    NotFound(ApiErrorInfo),

    /// HTTP 422, or a request rejected locally before it was sent.
    #[error("{info}")]
    Validation {
        info: ApiErrorInfo,
        errors: Option<Map<String, Value>>,
    },

    /// HTTP 429. `retry_after` is the server's hint in seconds (0 when absent).
    #[error("{info}")]
    RateLimit { info: ApiErrorInfo, retry_after: u64 },

    /// HTTP 5xx.
    #[error("{0}")]
    Server(ApiErrorInfo),

    /// Any other 4xx.
    #[error("{0}")]
    Api(ApiErrorInfo),

    /// The request never produced an HTTP response (connect, DNS, timeout, body read).
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A success response whose body did not match the expected shape.
    #[error("Failed to decode response{}: {}", request_suffix(.request_id), .source)]
    Decode {
        #[source]
        source: serde_json::Error,
        request_id: String,
    },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The caller's cancellation token fired.
    #[error("Request cancelled")]
    Cancelled,
}

fn request_suffix(request_id: &str) -> String {
    if request_id.is_empty() {
        String::new()
    } else {
        format!(" [Request ID: {}]", request_id)
    }
}

impl Error {
    /// Builds a validation failure that was detected before any network call.
    pub fn local_validation(message: impl Into<String>) -> Self {
        Error::Validation {
            info: ApiErrorInfo::new(message, 422, ""),
            errors: None,
        }
    }

    /// Shared API error fields, for variants the server classified.
    pub fn info(&self) -> Option<&ApiErrorInfo> {
        match self {
            Error::Authentication(info)
            | Error::NotFound(info)
            | Error::Server(info)
            | Error::Api(info) => Some(info),
            Error::Validation { info, .. } | Error::RateLimit { info, .. } => Some(info),
            _ => None,
        }
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            other => other.info().map(|info| info.status),
        }
    }

    /// Correlation id, empty when the server did not send one.
    pub fn request_id(&self) -> &str {
        match self {
            Error::Decode { request_id, .. } => request_id,
            other => other.info().map(|info| info.request_id.as_str()).unwrap_or(""),
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Only rate limiting and server-side failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimit { .. } | Error::Server(_))
    }
}

//! The dispatcher: sends a request, classifies the answer, retries transient failures.

use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::classify::{classify, decode, request_id};
use super::retry::RetryPolicy;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Request header carrying the credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A single API call: verb, server-relative path, query and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn query(mut self, pairs: Vec<(&str, String)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.to_string(), v)));
        self
    }

    /// Serializes `payload` as the JSON body. Fails before anything is sent.
    pub fn json<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(payload).map_err(Error::Serialization)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Owns the transport and the read-only settings every call shares.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct Dispatcher {
    client: Client,
    base_url: Arc<str>,
    api_key: HeaderValue,
    user_agent: HeaderValue,
    timeout: Duration,
    policy: RetryPolicy,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| Error::InvalidConfig("API key contains invalid characters".to_string()))?;
        api_key.set_sensitive(true);
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| Error::InvalidConfig("User agent contains invalid characters".to_string()))?;

        let client = match config.http_client.clone() {
            Some(client) => client,
            None => Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(client_build_error)?,
        };

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            api_key,
            user_agent,
            timeout: config.timeout,
            policy: RetryPolicy::from_config(&config),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `request`, retrying rate-limit and server failures with backoff.
    ///
    /// Returns `Ok(None)` for a success with an empty body. Cancelling `cancel`
    /// aborts both an in-flight attempt and a pending backoff with
    /// [`Error::Cancelled`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let attempts = self.policy.attempts();
        let mut attempt = 0;

        loop {
            match self.send_once(request, cancel, attempt).await {
                Err(e) if e.is_retryable() && self.policy.has_next(attempt) => {
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        "{} {}: attempt {}/{} failed ({}), retrying in {}ms...",
                        request.method,
                        request.path,
                        attempt + 1,
                        attempts,
                        e,
                        delay.as_millis()
                    );

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            debug!("{} {}: cancelled during backoff", request.method, request.path);
                            return Err(Error::Cancelled);
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }

                    attempt += 1;
                }
                Err(e) => {
                    debug!("{} {}: giving up: {}", request.method, request.path, e);
                    return Err(e);
                }
                Ok(result) => return Ok(result),
            }
        }
    }

    /// Single attempt without retry.
    async fn send_once<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        cancel: &CancellationToken,
        attempt: u32,
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(
            "{} {} (attempt {}/{})",
            request.method,
            url,
            attempt + 1,
            self.policy.attempts()
        );

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(API_KEY_HEADER, self.api_key.clone())
            .header(USER_AGENT, self.user_agent.clone())
            .timeout(self.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, headers, body))
        };

        let (status, headers, body) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            exchanged = exchange => exchanged?,
        };

        let request_id = request_id(&headers);
        debug!(
            "{} {} -> {} ({} bytes, request id '{}')",
            request.method,
            url,
            status.as_u16(),
            body.len(),
            request_id
        );

        classify(status, &headers, &body)?;
        decode(&body, &request_id)
    }
}

fn client_build_error(e: reqwest::Error) -> Error {
    Error::InvalidConfig(format!("Failed to build HTTP client: {}", e))
}

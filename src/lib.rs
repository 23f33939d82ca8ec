//! Async client for the ActorHub.ai API.
//!
//! ActorHub protects identities from unauthorized AI-generated content. This
//! crate verifies images against protected identities, checks consent, browses
//! the marketplace and buys licenses.
//!
//! ```no_run
//! use actorhub::{ActorHubApi, Client, Error, VerifyRequest};
//!
//! # async fn run() -> actorhub::Result<()> {
//! let client = Client::new("your-api-key")?;
//! let result = client
//!     .verify(&VerifyRequest::from_url("https://example.com/image.jpg"))
//!     .await;
//!
//! match result {
//!     Ok(response) if response.protected => println!("Protected identity detected"),
//!     Ok(_) => println!("No protected identities"),
//!     Err(Error::RateLimit { retry_after, .. }) => println!("Retry after {}s", retry_after),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Rate-limit (429) and server (5xx) failures are retried with exponential
//! backoff; every other failure is returned on first occurrence.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod models;

pub use client::{ActorHubApi, Client};
pub use config::ClientConfig;
pub use error::{ApiErrorInfo, Error, Result};
pub use models::*;
pub use tokio_util::sync::CancellationToken;

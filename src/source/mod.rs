//! Polling sources for dashboard panels.
//!
//! This module provides the pieces that turn an endpoint path into a live,
//! self-refreshing JSON value:
//!
//! - [`ApiBase`] / [`Endpoint`]: where a path is requested
//! - [`Fetcher`]: a single GET-and-decode, implemented over HTTP by [`HttpFetcher`]
//! - [`PollSubscription`]: a timer plus a last-value slot for one endpoint

mod endpoint;
mod http;
mod subscription;

#[cfg(test)]
pub(crate) mod testing;

pub use endpoint::{ApiBase, Endpoint, EndpointError, FALLBACK_ORIGIN};
pub use http::{HttpFetcher, DEFAULT_TIMEOUT};
pub use subscription::{fetch_once, settle, PollSubscription, DEFAULT_PERIOD};

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A failed fetch or decode.
///
/// The variants exist for diagnostics only. Pollers treat every variant the
/// same way: the failure is dropped and the previous value stays displayed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The request did not complete within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Trait for fetching the current JSON document behind an endpoint.
///
/// Implementations issue one request per call and never retry; the poller's
/// timer is the only retry mechanism.
///
/// # Example
///
/// ```no_run
/// use statusboard::{ApiBase, Endpoint, Fetcher, HttpFetcher};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let endpoint = Endpoint::resolve(&ApiBase::Fallback, "/status").unwrap();
/// let fetcher = HttpFetcher::new(Duration::from_secs(10));
/// match fetcher.fetch(&endpoint).await {
///     Ok(value) => println!("{}", value),
///     Err(e) => eprintln!("poll failed: {}", e),
/// }
/// # });
/// ```
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    /// GET the endpoint and decode the body as JSON.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError>;
}

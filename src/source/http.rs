//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{trace, warn};

use super::{Endpoint, FetchError, Fetcher};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches endpoints with plain `GET` requests: no headers, no query, no body.
///
/// A response counts as a success only when the status is 2xx and the body
/// decodes as JSON.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        // Fall back to the default client if the builder fails; Client::new() is infallible
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP client builder failed, using defaults without timeout");
                Client::new()
            });
        Self { client }
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, FetchError> {
        trace!(endpoint = %endpoint, "GET");

        let response = self.client.get(endpoint.url().clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ApiBase;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the origin to hit.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    /// Client that never routes loopback traffic through an environment proxy.
    fn local_fetcher(timeout: Duration) -> HttpFetcher {
        let client = Client::builder().timeout(timeout).no_proxy().build().unwrap();
        HttpFetcher::with_client(client)
    }

    fn endpoint(origin: &str, path: &str) -> Endpoint {
        let base = ApiBase::from_origin(Some(origin)).unwrap();
        Endpoint::resolve(&base, path).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_json_body() {
        let origin = serve_once("200 OK", r#"{"agents":[{"name":"weather","running":true}]}"#).await;
        let fetcher = local_fetcher(DEFAULT_TIMEOUT);

        let value = fetcher.fetch(&endpoint(&origin, "/status")).await.unwrap();
        assert_eq!(value["agents"][0]["name"], "weather");
        assert_eq!(value["agents"][0]["running"], true);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let origin = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let fetcher = local_fetcher(DEFAULT_TIMEOUT);

        let err = fetcher.fetch(&endpoint(&origin, "/status")).await.unwrap_err();
        assert_eq!(err, FetchError::Status(500));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let origin = serve_once("200 OK", "<html>not json</html>").await;
        let fetcher = local_fetcher(DEFAULT_TIMEOUT);

        let err = fetcher.fetch(&endpoint(&origin, "/messages")).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = local_fetcher(DEFAULT_TIMEOUT);
        let err = fetcher.fetch(&endpoint(&format!("http://{}", addr), "/status")).await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept and hold the connection without ever answering
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let fetcher = local_fetcher(Duration::from_millis(100));
        let err = fetcher.fetch(&endpoint(&format!("http://{}", addr), "/status")).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }

    #[tokio::test]
    async fn test_new_applies_configured_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let fetcher = HttpFetcher::new(Duration::from_millis(100));
        let err = fetcher.fetch(&endpoint(&format!("http://{}", addr), "/status")).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout);
    }
}

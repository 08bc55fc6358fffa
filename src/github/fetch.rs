// src/github/fetch.rs
// =============================================================================
// This module downloads a file from GitHub.
//
// Strategy:
// - One GET per download, no retries
// - The whole body is read into memory before it is returned
// - Redirects are followed (archive links bounce to codeload.github.com)
//
// Failure classification:
//   403 + x-ratelimit-remaining: 0  -> UpstreamRateLimited
//   404                             -> UpstreamNotFound
//   any other non-2xx or I/O error  -> UpstreamFailure
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};

use crate::error::ProxyError;

/// User-Agent sent with every upstream request.
pub const USER_AGENT: &str = "GitProxy/1.0.0";

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

// Fetches files on behalf of download requests
//
// Cloning is cheap: clones share one connection pool.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    // Creates a fetcher with the fixed User-Agent
    //
    // Parameters:
    //   timeout: upper bound for a whole upstream request, None = no limit
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Ok(Self::with_client(client))
    }

    // Wraps an already configured client (tests point it at a mock server)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    // Downloads the body at `url` as raw bytes
    //
    // Returns: the complete body, or the classified ProxyError
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ProxyError> {
        // Connection, DNS and TLS failures all land in UpstreamFailure
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProxyError::UpstreamFailure(e.to_string()))?;

        let response = check_status(response)?;

        // Buffer the whole file; there is no size cap
        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::UpstreamFailure(e.to_string()))?;

        Ok(body.to_vec())
    }
}

// Passes 2xx responses through, turns everything else into an error
fn check_status(response: Response) -> Result<Response, ProxyError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    // GitHub reports the remaining quota on every response
    let quota_exhausted = response
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    Err(classify_failure(status, quota_exhausted))
}

// Maps a failed status to the error the client will see
fn classify_failure(status: StatusCode, quota_exhausted: bool) -> ProxyError {
    match status {
        StatusCode::FORBIDDEN if quota_exhausted => ProxyError::UpstreamRateLimited,
        StatusCode::NOT_FOUND => ProxyError::UpstreamNotFound,
        other => ProxyError::UpstreamFailure(format!("HTTP {}", other.as_u16())),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does fetch_bytes return Result<_, ProxyError> and not anyhow?
//    - The caller needs to know WHICH failure happened (404 vs 429 vs 500)
//    - anyhow::Error would hide that behind a message string
//
// 2. What is a match guard?
//    - `StatusCode::FORBIDDEN if quota_exhausted =>` only matches when the
//      condition is also true
//    - A 403 without the quota header falls through to the last arm
//
// 3. What does .bytes().await return?
//    - A `Bytes` buffer holding the full body
//    - .to_vec() copies it into a plain Vec<u8>
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rate_limit() {
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, true),
            ProxyError::UpstreamRateLimited
        ));
    }

    #[test]
    fn test_classify_plain_forbidden() {
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, false),
            ProxyError::UpstreamFailure(_)
        ));
    }

    #[test]
    fn test_classify_not_found() {
        assert!(matches!(
            classify_failure(StatusCode::NOT_FOUND, false),
            ProxyError::UpstreamNotFound
        ));
    }

    #[test]
    fn test_classify_server_error() {
        match classify_failure(StatusCode::BAD_GATEWAY, false) {
            ProxyError::UpstreamFailure(msg) => assert_eq!(msg, "HTTP 502"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/file.bin")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_body(vec![0u8, 1, 2, 255])
            .create_async()
            .await;

        let fetcher = Fetcher::new(None).unwrap();
        let bytes = fetcher
            .fetch_bytes(&format!("{}/file.bin", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, vec![0u8, 1, 2, 255]);
    }

    #[tokio::test]
    async fn test_fetch_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/limited")
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .create_async()
            .await;

        let fetcher = Fetcher::new(None).unwrap();
        let result = fetcher.fetch_bytes(&format!("{}/limited", server.url())).await;
        assert!(matches!(result, Err(ProxyError::UpstreamRateLimited)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 9 (discard) is closed on test machines
        let fetcher = Fetcher::new(Some(Duration::from_secs(5))).unwrap();
        let result = fetcher.fetch_bytes("http://127.0.0.1:9/x").await;
        assert!(matches!(result, Err(ProxyError::UpstreamFailure(_))));
    }
}

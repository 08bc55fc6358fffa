// src/proxy/download.rs
// =============================================================================
// GET /api/download?url=<token>
//
// Steps:
// 1. Read the token from the query string
// 2. Decrypt it back into a GitHub URL
// 3. Work out the filename from the URL
// 4. Download the file from GitHub
// 5. Send the bytes back as an attachment
//
// Every failure becomes a ProxyError, which renders itself as a JSON
// `{"error": ...}` body with the matching status code.
// =============================================================================

use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::http::header;
use axum::response::Response;

use super::content_type::content_type_for;
use super::{first_query_value, AppState};
use crate::error::ProxyError;
use crate::github::filename_from_url;

// Handles one download request
//
// Parameters:
//   state: the shared codec and fetcher (cloned by axum for each request)
//   query: the raw query string, e.g. "url=abc123"
//
// Returns: the file as an attachment, or a ProxyError that renders as JSON
pub async fn handle(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    // Only the first `url` pair counts; an empty value is the same as none
    let token = first_query_value(query.as_deref(), "url")
        .filter(|token| !token.is_empty())
        .ok_or(ProxyError::MissingToken)?;

    // Turn the token back into the GitHub URL it hides
    let github_url = state.codec.decrypt(&token)?;
    let filename = filename_from_url(&github_url);

    // The real URL only ever appears at debug level
    tracing::debug!(url = %github_url, %filename, "proxying download");

    // The one suspension point: wait for GitHub to send the whole file
    let body = state.fetcher.fetch_bytes(&github_url).await?;

    tracing::info!(%filename, bytes = body.len(), "download relayed");

    attachment(body, &filename)
}

// Wraps downloaded bytes in a response that browsers save as a file
//
// Headers set:
//   Content-Type: picked from the filename extension
//   Content-Disposition: attachment; filename="<name>"
//   Content-Length: exact size of the buffered body
fn attachment(body: Vec<u8>, filename: &str) -> Result<Response, ProxyError> {
    Response::builder()
        .header(header::CONTENT_TYPE, content_type_for(filename))
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .map_err(|e| ProxyError::Internal(format!("building response: {}", e)))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is RawQuery?
//    - An axum extractor that hands over the query string untouched
//    - Option<String>: None when the URL has no '?' at all
//    - We decode it ourselves so repeated keys can't make extraction fail
//
// 2. What does `?` do inside a handler?
//    - Returns the ProxyError early
//    - axum calls ProxyError::into_response() to build the JSON error
//
// 3. Why Response::builder()?
//    - Lets us set several headers before attaching the body
//    - .body(...) returns a Result because a header value could be invalid
// -----------------------------------------------------------------------------

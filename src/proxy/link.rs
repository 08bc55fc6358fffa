// src/proxy/link.rs
// =============================================================================
// GET /api/link?url=<github url>
//
// The server-side version of "paste a GitHub URL, get a proxy link back".
// It only consumes the codec; nothing is stored.
//
// Response: {"token": "...", "link": "<origin>/api/download?url=<token>"}
// =============================================================================

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{first_query_value, AppState};
use crate::error::{error_response, ProxyError};

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub token: String,
    pub link: String,
}

pub async fn handle(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ProxyError> {
    let Some(url) = first_query_value(query.as_deref(), "url").filter(|u| !u.is_empty()) else {
        return Ok(error_response(StatusCode::BAD_REQUEST, "Please enter a GitHub URL"));
    };

    let token = state.codec.encrypt(&url)?;
    let link = download_link(&state.origin, &token);

    Ok(Json(LinkResponse { token, link }).into_response())
}

// Builds the shareable link for a token
//
// Example:
//   ("https://dl.example.com/", "abc") -> "https://dl.example.com/api/download?url=abc"
pub fn download_link(origin: &str, token: &str) -> String {
    format!("{}/api/download?url={}", origin.trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_link() {
        assert_eq!(
            download_link("http://localhost:3000", "abc"),
            "http://localhost:3000/api/download?url=abc"
        );
        assert_eq!(
            download_link("https://dl.example.com/", "abc"),
            "https://dl.example.com/api/download?url=abc"
        );
    }
}

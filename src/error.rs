// src/error.rs
// =============================================================================
// Errors that can end a single proxy request.
//
// Every variant maps to one HTTP status and one fixed, short message. The
// message is all the client ever sees; the underlying cause (if any) is only
// written to the log.
// =============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The URL handed to the codec is empty or not a GitHub URL.
    #[error("invalid GitHub URL")]
    InvalidInput,

    /// The download request carried no token.
    #[error("missing url parameter")]
    MissingToken,

    /// The token could not be turned back into a GitHub URL.
    ///
    /// Bad base64, a wrong key, tampering, and a non-GitHub plaintext all end
    /// up here with no further detail.
    #[error("failed to decrypt token")]
    Decryption,

    #[error("upstream returned 404")]
    UpstreamNotFound,

    #[error("upstream rate limit exhausted")]
    UpstreamRateLimited,

    #[error("upstream request failed: {0}")]
    UpstreamFailure(String),

    /// Something broke inside the proxy itself (cipher, response building).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput | ProxyError::MissingToken | ProxyError::Decryption => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::UpstreamNotFound => StatusCode::NOT_FOUND,
            ProxyError::UpstreamRateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::UpstreamFailure(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the JSON `error` field.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::InvalidInput => "Please enter a valid GitHub URL",
            ProxyError::MissingToken => "Missing URL parameter",
            ProxyError::Decryption => "Invalid URL parameter",
            ProxyError::UpstreamNotFound => "The requested file does not exist",
            ProxyError::UpstreamRateLimited => {
                "GitHub API rate limit exceeded. Please try again later."
            }
            ProxyError::UpstreamFailure(_) => "Failed to download file",
            ProxyError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::UpstreamFailure(_) | ProxyError::Internal(_) => {
                tracing::error!(error = %self, "request failed")
            }
            _ => tracing::warn!(error = %self, "request rejected"),
        }

        error_response(self.status(), self.public_message())
    }
}

// Builds the `{"error": "..."}` body used by every failing endpoint
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

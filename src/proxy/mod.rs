// src/proxy/mod.rs
// =============================================================================
// This module is the HTTP face of gitproxy.
//
// Routes:
//   GET /api/download?url=<token>     -> the file bytes, or {"error": ...}
//   GET /api/link?url=<github url>    -> {"token": ..., "link": ...}
//   anything else                     -> 404 {"error": "Not found"}
//
// Submodules:
// - download: Decrypts a token and relays the GitHub file
// - link: Turns a GitHub URL into a shareable link
// - content_type: Filename extension -> Content-Type
//
// Rust concepts:
// - Arc: Shares the read-only codec between all requests
// - State extractor: axum hands every handler a clone of AppState
// =============================================================================

mod content_type;
mod download;
mod link;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use url::form_urlencoded;

use crate::codec::UrlCodec;
use crate::error::error_response;
use crate::github::Fetcher;

pub use link::download_link;

// Everything a request handler needs. Nothing in here is mutated after
// startup, so requests never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<UrlCodec>,
    pub fetcher: Fetcher,
    pub origin: Arc<str>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/download", get(download::handle))
        .route("/api/link", get(link::handle))
        .fallback(not_found)
        .with_state(state)
}

// Returns the first value of `name` in a raw query string
//
// Repeated keys are fine: "url=a&url=b" gives Some("a").
// Percent-escapes and '+' are decoded.
//
// Example:
//   (Some("url=abc&x=1"), "url") -> Some("abc")
//   (None, "url")                -> None
fn first_query_value(query: Option<&str>, name: &str) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

// Serves the router until Ctrl-C is pressed
pub async fn serve(bind: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    tracing::info!(addr = %bind, origin = %state.origin, "gitproxy listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("gitproxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
    }
}

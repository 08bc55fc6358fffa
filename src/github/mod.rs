// src/github/mod.rs
// =============================================================================
// This module holds everything that knows about GitHub itself.
//
// Submodules:
// - links: Hostname validation and filename inference (pure, no network)
// - fetch: Downloading a file from GitHub and classifying failures
// =============================================================================

mod fetch;
mod links;

pub use fetch::{Fetcher, USER_AGENT};
pub use links::{filename_from_url, is_valid_github_url};

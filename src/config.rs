// src/config.rs
// =============================================================================
// Settings shared by every command, checked once at startup.
//
// The secret is wrapped in SecretString as soon as it leaves clap so it
// never shows up in Debug output or logs.
// =============================================================================

use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

pub struct Config {
    pub secret: SecretString,
    pub origin: String,
}

impl Config {
    pub fn new(secret: String, origin: &str) -> Result<Self> {
        let secret = SecretString::from(secret);
        if secret.expose_secret().trim().is_empty() {
            bail!("the shared secret must not be empty");
        }

        let parsed = Url::parse(origin).with_context(|| format!("invalid origin '{}'", origin))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("origin must be an http(s) URL, got '{}'", origin);
        }

        Ok(Self {
            secret,
            origin: origin.trim_end_matches('/').to_string(),
        })
    }
}

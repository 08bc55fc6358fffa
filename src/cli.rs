// src/cli.rs
// =============================================================================
// This file defines the command-line interface using the `clap` crate.
//
// Every flag can also come from a GITPROXY_* environment variable, which is
// how the server is usually configured in a container.
//
// Commands:
//   gitproxy serve             Run the download proxy
//   gitproxy link <url>        Print a shareable proxy link for a GitHub URL
//   gitproxy encrypt <url>     Print only the token
//   gitproxy decrypt <token>   Print the GitHub URL behind a token
// =============================================================================

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "gitproxy",
    version = "0.1.0",
    about = "Share GitHub downloads without revealing where they come from",
    long_about = "gitproxy turns GitHub archive, release, and raw-file URLs into opaque links. \
                  Fetching a link streams the file through the proxy; the GitHub URL stays hidden."
)]
pub struct Cli {
    /// Shared secret used to encrypt and decrypt link tokens
    ///
    /// Tokens only decrypt under the secret that created them, so every
    /// instance serving the same links needs the same value.
    #[arg(long, env = "GITPROXY_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Public origin that links are built from (e.g., https://dl.example.com)
    #[arg(long, env = "GITPROXY_ORIGIN", default_value = "http://localhost:3000")]
    pub origin: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP proxy
    ///
    /// Example: gitproxy serve --bind 0.0.0.0:8080
    Serve {
        /// Address to listen on
        #[arg(long, env = "GITPROXY_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// Give up on an upstream download after this many seconds
        ///
        /// Unset means no explicit limit.
        #[arg(long, env = "GITPROXY_TIMEOUT_SECS")]
        timeout_secs: Option<u64>,
    },

    /// Print a shareable proxy link for a GitHub URL
    ///
    /// Example: gitproxy link https://github.com/user/repo/archive/refs/heads/main.zip
    Link {
        /// GitHub URL (github.com, *.github.com, or raw.githubusercontent.com)
        url: String,
    },

    /// Print the token for a GitHub URL
    Encrypt {
        /// GitHub URL to encrypt
        url: String,
    },

    /// Print the GitHub URL behind a token
    Decrypt {
        /// Token taken from a proxy link's `url` parameter
        token: String,
    },
}

// src/main.rs
// =============================================================================
// This is the entry point of gitproxy.
//
// What happens here:
// 1. Set up logging (RUST_LOG, defaults to "info")
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = rejected input, 2 = error)
//
// Logs go to stderr so that `gitproxy link` / `encrypt` / `decrypt` print
// nothing but their result on stdout.
// =============================================================================

mod cli;
mod codec;
mod config;
mod error;
mod github;
mod proxy;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use codec::UrlCodec;
use config::Config;
use github::Fetcher;
use proxy::AppState;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = success
//   Ok(1) = the URL or token given on the command line was rejected
//   Err   = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = Config::new(cli.secret, &cli.origin)?;
    let codec = UrlCodec::new(&config.secret);

    match cli.command {
        Commands::Serve { bind, timeout_secs } => {
            let fetcher = Fetcher::new(timeout_secs.map(Duration::from_secs))?;
            tracing::info!(user_agent = github::USER_AGENT, ?timeout_secs, "upstream client ready");

            let state = AppState {
                codec: Arc::new(codec),
                fetcher,
                origin: Arc::from(config.origin.as_str()),
            };
            proxy::serve(bind, state).await?;
            Ok(0)
        }
        Commands::Link { url } => Ok(print_result(
            codec.encrypt(&url).map(|token| proxy::download_link(&config.origin, &token)),
        )),
        Commands::Encrypt { url } => Ok(print_result(codec.encrypt(&url))),
        Commands::Decrypt { token } => Ok(print_result(codec.decrypt(&token))),
    }
}

// Prints a codec result and turns it into an exit code
fn print_result(result: Result<String, error::ProxyError>) -> i32 {
    match result {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

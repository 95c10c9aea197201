//! AI provider reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ axum (CORS, trace, X-Accel-Buffering)
//!                 │
//!                 ├─ GET /                      → static text
//!                 └─ pipeline
//!                       authenticate /{api_key}  → 401
//!                       /custom-model-proxy?url= → direct forward
//!                       route table match        → rewrite + sanitize
//!                                                  → bounded forward (504 on deadline)
//!                       no match                 → 404
//! ```
//!
//! The API key comes from the `API_KEY` environment variable (or `[auth]` in
//! the config file); the process refuses to start without it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ai_proxy::lifecycle::{start, StartupOptions};

#[derive(Parser)]
#[command(name = "ai-proxy")]
#[command(about = "Authenticated reverse proxy for AI provider APIs", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. 127.0.0.1:8787).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = StartupOptions {
        config_path: cli.config,
        bind_address: cli.bind,
    };

    match start(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ai-proxy: {}", e);
            ExitCode::FAILURE
        }
    }
}

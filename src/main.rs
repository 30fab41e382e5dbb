//! CLI binary.
//!
//! A thin wrapper around the `url_verdict` library:
//! - `serve` runs the HTTP API
//! - `check <URL>` performs a one-shot detection and prints the result
//!
//! All core functionality lives in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use url_verdict::initialization::{init_crypto_provider, init_logger_with};
use url_verdict::notify::TelegramNotifier;
use url_verdict::server::{serve, AppState};
use url_verdict::{Config, DetectionEngine, LogFormat, LogLevel};

#[derive(Parser)]
#[command(name = "url_verdict", version, about = "Phishing URL detection service")]
struct Cli {
    /// Classifier model file (JSON weights)
    #[arg(long, default_value = "model.json", global = true)]
    model: std::path::PathBuf,

    /// Whitelist CSV file
    #[arg(long, default_value = "whitelist.csv", global = true)]
    whitelist: std::path::PathBuf,

    /// Page fetch timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    timeout: u64,

    /// Signal worker pool size
    #[arg(long, default_value_t = 8, global = true)]
    workers: usize,

    /// Skip WHOIS lookups (faster, three signals degrade to estimates)
    #[arg(long, global = true)]
    fast: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Bind port
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Classify a single URL and print the result as JSON
    Check {
        /// The URL to classify
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env keeps the Telegram credentials out of the shell history
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;
    init_crypto_provider();

    let config = Config {
        model_path: cli.model.clone(),
        whitelist_path: cli.whitelist.clone(),
        fetch_timeout_seconds: cli.timeout,
        worker_pool_size: cli.workers,
        fast_mode: cli.fast,
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
        ..Default::default()
    };

    let engine = match DetectionEngine::new(config) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            eprintln!("url_verdict error: {e}");
            process::exit(1);
        }
    };

    match cli.command {
        Command::Serve { port } => {
            let state = AppState {
                engine,
                notifier: TelegramNotifier::from_env().map(Arc::new),
            };
            serve(port, state).await?;
        }
        Command::Check { url } => match engine.detect(&url).await {
            Ok(result) => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Err(e) => {
                eprintln!("url_verdict error: {e:#}");
                process::exit(1);
            }
        },
    }

    Ok(())
}

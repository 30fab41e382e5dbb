//! Configuration types.
//!
//! Defines the runtime configuration struct and the enums used for
//! command-line argument parsing.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_PORT, DEFAULT_USER_AGENT, DEFAULT_WORKER_POOL_SIZE, FETCH_TIMEOUT_SECS,
    MAX_REDIRECT_HOPS, MAX_RESPONSE_BODY_SIZE,
};

/// Logging level, from most restrictive (Error) to most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Runtime configuration for the detection engine and the HTTP API.
///
/// Constructed from CLI arguments in the binary, or programmatically with
/// `..Default::default()` when embedding the library.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the classifier model file (JSON weights).
    pub model_path: PathBuf,

    /// Path to the persisted whitelist CSV.
    pub whitelist_path: PathBuf,

    /// Page fetch timeout in seconds.
    pub fetch_timeout_seconds: u64,

    /// Maximum redirect hops considered when resolving the chain.
    pub max_redirect_hops: usize,

    /// Response body size cap in bytes.
    pub max_body_bytes: usize,

    /// Size of the signal worker pool.
    pub worker_pool_size: usize,

    /// Fast mode: skip WHOIS lookups. The three WHOIS-dependent signals
    /// degrade to heuristic estimates.
    pub fast_mode: bool,

    /// HTTP User-Agent header value.
    pub user_agent: String,

    /// Bind port for the HTTP API.
    pub port: u16,

    /// Log level.
    pub log_level: LogLevel,

    /// Log format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            whitelist_path: PathBuf::from("whitelist.csv"),
            fetch_timeout_seconds: FETCH_TIMEOUT_SECS,
            max_redirect_hops: MAX_REDIRECT_HOPS,
            max_body_bytes: MAX_RESPONSE_BODY_SIZE,
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            fast_mode: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Validates settings that would otherwise fail in confusing ways deep
    /// inside the pipeline.
    pub fn validate(&self) -> Result<(), crate::error_handling::DetectError> {
        use crate::error_handling::DetectError;

        if self.fetch_timeout_seconds == 0 {
            return Err(DetectError::Configuration(
                "fetch timeout must be at least 1 second".into(),
            ));
        }
        if self.worker_pool_size == 0 {
            return Err(DetectError::Configuration(
                "worker pool size must be at least 1".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(DetectError::Configuration(
                "body size cap must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

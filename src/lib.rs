//! url_verdict: phishing URL detection.
//!
//! Classifies a URL as phishing or legitimate by combining a pretrained
//! statistical classifier over thirty ternary signals (derived from the URL
//! text, DNS/WHOIS records, and fetched page content) with a weighted
//! red-flag scoring layer for lookalike domains and lexical lures.
//!
//! # Example
//!
//! ```no_run
//! use url_verdict::{Config, DetectionEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DetectionEngine::new(Config::default())?;
//! let verdict = engine.detect("https://secure-login.example.xyz").await?;
//! println!(
//!     "{}: {:.2}% phishing",
//!     verdict.url, verdict.phishing_percentage
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! A Tokio runtime. Use `#[tokio::main]` or call from an async context.

#![warn(missing_docs)]

mod app;
pub mod classifier;
pub mod config;
pub mod detection;
mod dns;
pub mod error_handling;
mod fetch;
pub mod initialization;
pub mod notify;
pub mod scoring;
pub mod server;
pub mod signals;
mod tls;
pub mod whitelist;
mod whois;

pub use classifier::{Classifier, LinearClassifier};
pub use config::{Config, LogFormat, LogLevel};
pub use detection::{DetectionEngine, DetectionResult, FeatureReport};
pub use error_handling::DetectError;
pub use fetch::{ResolvedTarget, TlsProbe, WhoisState};
pub use signals::{FeatureVector, Signal, SignalName, FEATURE_COUNT};

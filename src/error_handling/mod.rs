//! Error type definitions.
//!
//! The detection pipeline distinguishes failures that are absorbed locally
//! (network and parse problems inside a signal become the value -1) from
//! failures that abort startup or reject a request outright.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Errors surfaced by the detection pipeline.
///
/// `Fetch` and `Parse` never reach callers of `detect()`: they are caught at
/// the stage that produced them and degrade the affected signal to the
/// phishing-indicative default. `ClassifierUnavailable` and `Configuration`
/// are fatal at startup. `InvalidUrl` is the only per-request error.
#[derive(Error, Debug)]
pub enum DetectError {
    /// The input URL could not be parsed or uses an unsupported scheme.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A network operation failed (connect, timeout, DNS, TLS).
    #[error("fetch failure: {0}")]
    Fetch(String),

    /// A payload could not be parsed (HTML, WHOIS response).
    #[error("parse failure: {0}")]
    Parse(String),

    /// The classifier model could not be loaded or is malformed.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Required configuration is missing or inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_error_display() {
        let err = DetectError::InvalidUrl("not a url".into());
        assert_eq!(err.to_string(), "invalid url: not a url");

        let err = DetectError::ClassifierUnavailable("model.json missing".into());
        assert!(err.to_string().contains("classifier unavailable"));
    }

    #[test]
    fn test_fetch_and_parse_messages() {
        assert!(DetectError::Fetch("timed out".into())
            .to_string()
            .starts_with("fetch failure"));
        assert!(DetectError::Parse("bad html".into())
            .to_string()
            .starts_with("parse failure"));
    }
}

//! Configuration constants.
//!
//! Operational parameters used throughout the pipeline: timeouts, size
//! limits, retry policy, and the default HTTP identity.

use std::time::Duration;

/// Per-request page fetch timeout in seconds (default).
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Overall bound for resolving one URL into a [`crate::fetch::ResolvedTarget`].
/// Covers redirect resolution, body download, WHOIS, DNS and the TLS probe,
/// which all run concurrently.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

/// DNS query timeout in seconds. Most queries complete in under a second;
/// failing fast here keeps slow resolvers from dominating request latency.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// TCP connection timeout in seconds (TLS probe).
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// TLS handshake timeout in seconds.
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

/// WHOIS query timeout in seconds, applied per server round-trip.
pub const WHOIS_TIMEOUT_SECS: u64 = 8;

/// Per-signal computation timeout. Signal functions are CPU-bound over an
/// already-resolved target, so this only trips on pathological inputs.
pub const SIGNAL_TIMEOUT: Duration = Duration::from_secs(2);

/// Default size of the signal worker pool.
pub const DEFAULT_WORKER_POOL_SIZE: usize = 8;

/// Maximum response body size in bytes (2MB). Bodies are streamed and
/// truncated at this cap so large pages cannot stall a request.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum number of redirect hops to follow when resolving the chain.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Maximum accepted input URL length.
pub const MAX_URL_LENGTH: usize = 2048;

// Retry strategy for page fetches. Retries apply only to 429/5xx statuses;
// connection errors and other statuses are terminal.
/// Initial delay in milliseconds before the first retry.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which the retry delay is multiplied on each attempt.
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Maximum number of attempts, including the initial one.
pub const RETRY_MAX_ATTEMPTS: usize = 3;

/// HTTP statuses that trigger a retry.
pub const RETRIABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Ports considered standard for web traffic; anything else is suspicious.
pub const STANDARD_PORTS: [u16; 4] = [80, 443, 8080, 8443];

/// Default User-Agent string for HTTP requests. A browser-like identity
/// avoids trivially different content being served to the scanner.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Number of entries retained by the in-memory detection history.
pub const HISTORY_CAPACITY: usize = 100;

/// Default bind port for the HTTP API.
pub const DEFAULT_PORT: u16 = 8080;

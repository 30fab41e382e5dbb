//! Application initialization and resource setup.
//!
//! Functions to initialize the shared resources of the detection engine:
//! HTTP clients, DNS resolver, public-suffix extractor, logger, and the
//! rustls crypto provider.

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use rustls::crypto::{ring::default_provider, CryptoProvider};
use tokio::sync::Semaphore;

pub use client::{init_client, init_redirect_client};
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes a semaphore bounding the signal worker pool.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrently computing signals
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Initializes the Public Suffix List extractor used for registrable-domain
/// and subdomain decomposition.
pub fn init_extractor() -> Arc<psl::List> {
    Arc::new(psl::List)
}

/// Initializes the crypto provider for TLS operations.
///
/// Must be called before any TLS connections are established. The return
/// value is ignored because reinstalling the provider is harmless.
pub fn init_crypto_provider() {
    let _ = CryptoProvider::install_default(default_provider());
}

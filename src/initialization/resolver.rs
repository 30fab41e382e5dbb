//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for A-record existence checks.
///
/// Uses the default resolver configuration with aggressive timeouts so a
/// slow or unresponsive DNS server fails fast instead of stalling the
/// request.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if construction fails.
pub fn init_resolver() -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // ndots = 0 prevents search-domain appending on bare hostnames
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}

//! DNS existence checks.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_TIMEOUT_SECS;

/// Resolves an A/AAAA record for a host, returning the first address.
///
/// Absence of a record is itself signal input, so failures are reported as
/// `None` rather than errors. The lookup is bounded by its own timeout on
/// top of the resolver's internal one.
pub async fn resolve_a_record(resolver: &TokioAsyncResolver, host: &str) -> Option<IpAddr> {
    // An IP literal trivially "resolves" to itself.
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Some(ip);
    }

    let lookup = tokio::time::timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS + 1),
        resolver.lookup_ip(host),
    )
    .await;

    match lookup {
        Ok(Ok(response)) => response.iter().next(),
        Ok(Err(e)) => {
            log::debug!("DNS lookup failed for {host}: {e}");
            None
        }
        Err(_) => {
            log::debug!("DNS lookup timed out for {host}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ip_literal_resolves_to_itself() {
        let resolver = crate::initialization::init_resolver().unwrap();
        let ip = resolve_a_record(&resolver, "127.0.0.1").await;
        assert_eq!(ip, Some("127.0.0.1".parse().unwrap()));
    }
}

//! URL resolution.
//!
//! Turns a validated URL into a [`ResolvedTarget`]: parsed network identity
//! plus fetched page summary, WHOIS record, DNS existence, and TLS probe
//! outcome. The four network lookups run concurrently and each degrades to
//! its absent form on failure; only a malformed URL aborts resolution.

pub mod content;
mod page;
mod target;

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

pub use content::PageContent;
pub use page::{fetch_page, resolve_redirect_chain, FetchedPage};
pub use target::{decompose_host, HostParts, ResolvedTarget, TlsProbe, WhoisState};

use crate::config::{Config, RESOLVE_TIMEOUT, WHOIS_TIMEOUT_SECS};
use crate::error_handling::DetectError;

/// Shared resources needed to resolve URLs.
#[derive(Clone)]
pub struct ResolverContext {
    /// HTTP client for page downloads (redirects handled manually).
    pub client: Arc<reqwest::Client>,
    /// HTTP client with redirects disabled, for chain resolution.
    pub redirect_client: Arc<reqwest::Client>,
    /// DNS resolver.
    pub resolver: Arc<TokioAsyncResolver>,
    /// Public Suffix List extractor.
    pub extractor: Arc<psl::List>,
}

/// Resolves a URL into a [`ResolvedTarget`].
///
/// Page fetch, WHOIS, DNS, and the TLS probe run concurrently under the
/// overall resolve timeout. Each failure is absorbed: the page summary,
/// WHOIS record, or probe outcome simply stays absent and the dependent
/// signals take their fail-suspicious defaults.
///
/// # Errors
///
/// Only `DetectError::InvalidUrl`, when the URL itself cannot be parsed.
pub async fn build_resolved_target(
    ctx: &ResolverContext,
    url: &str,
    config: &Config,
) -> Result<ResolvedTarget, DetectError> {
    let mut base = ResolvedTarget::from_url(url, &ctx.extractor)?;

    let page_fut = async {
        match tokio::time::timeout(
            RESOLVE_TIMEOUT,
            fetch_page(
                &ctx.client,
                &ctx.redirect_client,
                url,
                config.max_redirect_hops,
                config.max_body_bytes,
            ),
        )
        .await
        {
            Ok(Ok(fetched)) => Some(fetched),
            Ok(Err(e)) => {
                log::debug!("Page fetch failed for {url}: {e}");
                None
            }
            Err(_) => {
                log::debug!("Page fetch timed out for {url}");
                None
            }
        }
    };

    let whois_fut = async {
        if base.is_ip_host {
            return WhoisState::Absent;
        }
        if config.fast_mode {
            return WhoisState::Skipped;
        }
        let Some(domain) = base.registrable_domain.as_deref() else {
            return WhoisState::Absent;
        };
        // Two server round-trips (IANA referral + registry) plus slack.
        let limit = Duration::from_secs(WHOIS_TIMEOUT_SECS * 2 + 2);
        match tokio::time::timeout(limit, crate::whois::lookup_whois(domain)).await {
            Ok(Some(record)) => WhoisState::Record(record),
            Ok(None) => WhoisState::Absent,
            Err(_) => {
                log::debug!("WHOIS lookup timed out for {domain}");
                WhoisState::Absent
            }
        }
    };

    let dns_fut = crate::dns::resolve_a_record(&ctx.resolver, &base.host);

    let tls_fut = async {
        if base.scheme != "https" {
            return TlsProbe::NotAttempted;
        }
        match crate::tls::probe_tls(&base.host).await {
            Ok(()) => TlsProbe::Established,
            Err(e) => {
                log::debug!("TLS probe failed for {}: {e}", base.host);
                TlsProbe::Failed
            }
        }
    };

    let (fetched, whois, resolved_ip, tls) = tokio::join!(page_fut, whois_fut, dns_fut, tls_fut);

    let host = base.host.clone();
    base.page = fetched.map(|f| {
        content::summarize(&f.body, &f.final_url, &host, f.status, f.redirect_count())
    });
    base.whois = whois;
    base.dns_a_record = resolved_ip.is_some();
    base.resolved_ip = resolved_ip;
    base.tls = tls;

    Ok(base)
}

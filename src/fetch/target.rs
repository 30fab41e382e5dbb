//! The resolved view of a queried URL.
//!
//! A [`ResolvedTarget`] is built once per request and then shared read-only
//! by every signal computation. Network failures during construction degrade
//! the affected field to its absent form; they never abort the pipeline.

use std::net::IpAddr;

use psl::Psl;

use crate::error_handling::DetectError;
use crate::fetch::content::PageContent;
use crate::whois::WhoisRecord;

/// Outcome of the TLS probe for the target host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsProbe {
    /// A webpki-verified handshake completed.
    Established,
    /// The URL claims https but the verified handshake failed.
    Failed,
    /// The URL is not https; no probe was attempted.
    NotAttempted,
}

/// WHOIS lookup state for the target domain.
#[derive(Debug, Clone)]
pub enum WhoisState {
    /// A record was retrieved and parsed.
    Record(WhoisRecord),
    /// The lookup failed, returned nothing usable, or the host is an
    /// IP literal.
    Absent,
    /// Fast mode: the lookup was skipped; dependent signals estimate.
    Skipped,
}

/// Public-suffix-aware decomposition of a hostname.
#[derive(Debug, Clone, Default)]
pub struct HostParts {
    /// Subdomain chain, e.g. `"a.b"` for `a.b.example.co.uk`.
    pub subdomain: Option<String>,
    /// Domain label, e.g. `"example"`.
    pub domain: Option<String>,
    /// Public suffix, e.g. `"co.uk"`.
    pub suffix: Option<String>,
}

impl HostParts {
    /// The registrable domain (`domain.suffix`), when both parts are known.
    pub fn registrable(&self) -> Option<String> {
        match (&self.domain, &self.suffix) {
            (Some(d), Some(s)) => Some(format!("{d}.{s}")),
            (Some(d), None) => Some(d.clone()),
            _ => None,
        }
    }

    /// Number of subdomain labels (`www` counts as one).
    pub fn subdomain_depth(&self) -> usize {
        match &self.subdomain {
            Some(s) if !s.is_empty() => s.split('.').count(),
            _ => 0,
        }
    }
}

/// Decomposes a bare hostname against the Public Suffix List.
///
/// Suffix-rule accuracy matters here: several signals (subdomain depth,
/// hyphenated domain label) read these parts, and naive dot-counting gets
/// multi-part suffixes like `co.uk` wrong.
pub fn decompose_host(extractor: &psl::List, host: &str) -> HostParts {
    let host = host.trim_matches('.');
    let Some(domain) = extractor.domain(host.as_bytes()) else {
        // Single labels and hosts the list cannot split
        return HostParts {
            subdomain: None,
            domain: if host.is_empty() {
                None
            } else {
                Some(host.to_string())
            },
            suffix: None,
        };
    };

    let registrable = String::from_utf8_lossy(domain.as_bytes()).into_owned();
    let suffix = String::from_utf8_lossy(domain.suffix().as_bytes()).into_owned();

    let label = registrable
        .strip_suffix(&suffix)
        .map(|s| s.trim_end_matches('.').to_string())
        .filter(|s| !s.is_empty());
    let subdomain = host
        .strip_suffix(&registrable)
        .map(|s| s.trim_end_matches('.').to_string())
        .filter(|s| !s.is_empty());

    HostParts {
        subdomain,
        domain: label,
        suffix: Some(suffix),
    }
}

/// Everything the signal extractor needs to know about one URL.
///
/// Immutable after construction. Fields that depend on the network are
/// optional and default to their absent form when the corresponding lookup
/// fails or is skipped.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The normalized input URL.
    pub url: String,
    /// URL scheme, lower-cased.
    pub scheme: String,
    /// Hostname, lower-cased, without port.
    pub host: String,
    /// Explicit port, if one was given in the URL.
    pub port: Option<u16>,
    /// Whether the host is an IPv4/IPv6 literal.
    pub is_ip_host: bool,
    /// Registrable domain (`example.co.uk`), absent for IP literals.
    pub registrable_domain: Option<String>,
    /// Domain label without the suffix (`example`).
    pub domain_label: Option<String>,
    /// Public suffix (`co.uk`).
    pub suffix: Option<String>,
    /// Subdomain chain (`a.b`), absent when the host is a root domain.
    pub subdomain: Option<String>,
    /// Fetched page summary; `None` when the fetch failed.
    pub page: Option<PageContent>,
    /// WHOIS state for the registrable domain.
    pub whois: WhoisState,
    /// Whether an A record resolved for the host.
    pub dns_a_record: bool,
    /// First resolved address, when DNS succeeded.
    pub resolved_ip: Option<IpAddr>,
    /// TLS probe outcome.
    pub tls: TlsProbe,
}

impl ResolvedTarget {
    /// Builds the network-free skeleton of a target from a normalized URL.
    ///
    /// Parses scheme, host, port, and the public-suffix decomposition. The
    /// network-dependent fields start in their absent form and are filled in
    /// by [`crate::fetch::build_resolved_target`].
    ///
    /// # Errors
    ///
    /// Returns `DetectError::InvalidUrl` if the URL cannot be parsed or has
    /// no host.
    pub fn from_url(url: &str, extractor: &psl::List) -> Result<Self, DetectError> {
        let parsed =
            url::Url::parse(url).map_err(|e| DetectError::InvalidUrl(format!("{url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| DetectError::InvalidUrl(format!("{url}: no host")))?
            .trim_end_matches('.')
            .to_lowercase();

        let is_ip_host = host.parse::<IpAddr>().is_ok()
            || matches!(
                parsed.host(),
                Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_))
            );

        let parts = if is_ip_host {
            HostParts::default()
        } else {
            decompose_host(extractor, &host)
        };

        Ok(Self {
            url: url.to_string(),
            scheme: parsed.scheme().to_lowercase(),
            host,
            port: parsed.port(),
            is_ip_host,
            registrable_domain: parts.registrable(),
            domain_label: parts.domain.clone(),
            suffix: parts.suffix.clone(),
            subdomain: parts.subdomain.clone(),
            page: None,
            whois: WhoisState::Absent,
            dns_a_record: false,
            resolved_ip: None,
            tls: TlsProbe::NotAttempted,
        })
    }

    /// Number of subdomain labels on the host.
    pub fn subdomain_depth(&self) -> usize {
        match &self.subdomain {
            Some(s) if !s.is_empty() => s.split('.').count(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_extractor;

    #[test]
    fn test_from_url_basic_decomposition() {
        let extractor = init_extractor();
        let target = ResolvedTarget::from_url("https://www.example.co.uk/path", &extractor).unwrap();
        assert_eq!(target.scheme, "https");
        assert_eq!(target.host, "www.example.co.uk");
        assert_eq!(target.registrable_domain.as_deref(), Some("example.co.uk"));
        assert_eq!(target.subdomain.as_deref(), Some("www"));
        assert_eq!(target.subdomain_depth(), 1);
        assert!(!target.is_ip_host);
    }

    #[test]
    fn test_from_url_ip_literal() {
        let extractor = init_extractor();
        let target = ResolvedTarget::from_url("http://192.168.1.10/login", &extractor).unwrap();
        assert!(target.is_ip_host);
        assert!(target.registrable_domain.is_none());
        assert_eq!(target.subdomain_depth(), 0);
    }

    #[test]
    fn test_from_url_explicit_port() {
        let extractor = init_extractor();
        let target = ResolvedTarget::from_url("http://example.com:8081/", &extractor).unwrap();
        assert_eq!(target.port, Some(8081));
    }

    #[test]
    fn test_from_url_rejects_hostless() {
        let extractor = init_extractor();
        assert!(ResolvedTarget::from_url("data:text/plain,hello", &extractor).is_err());
    }

    #[test]
    fn test_subdomain_depth_counts_labels() {
        let extractor = init_extractor();
        let target =
            ResolvedTarget::from_url("https://a.b.c.example.com/", &extractor).unwrap();
        assert_eq!(target.subdomain_depth(), 3);
    }

    #[test]
    fn test_host_parts_registrable() {
        let parts = HostParts {
            subdomain: None,
            domain: Some("example".into()),
            suffix: Some("com".into()),
        };
        assert_eq!(parts.registrable().as_deref(), Some("example.com"));
    }
}

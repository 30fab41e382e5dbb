//! Reputation signals: redirect behavior, operational markers, and known
//! bad hosting.

use std::net::IpAddr;

use crate::fetch::ResolvedTarget;
use crate::signals::Signal;

/// Hosting providers and zones with a long abuse record.
const SUSPICIOUS_HOSTS: [&str; 12] = [
    "at.ua",
    "usa.cc",
    "baltazarpresentes.com.br",
    "pe.hu",
    "esy.es",
    "hol.es",
    "sweddy.com",
    "myjino.ru",
    "96.lt",
    "000webhost.com",
    "freehosting.com",
    "freehostia.com",
];

pub(crate) fn website_forwarding(target: &ResolvedTarget) -> Signal {
    match &target.page {
        Some(page) => match page.redirect_count {
            0 | 1 => Signal::Legitimate,
            2..=4 => Signal::Ambiguous,
            _ => Signal::Phishing,
        },
        None => Signal::Phishing,
    }
}

/// Analytics tooling implies an operated site; lure pages rarely bother.
pub(crate) fn website_traffic(target: &ResolvedTarget) -> Signal {
    match &target.page {
        Some(page) => match page.analytics_markers {
            n if n >= 2 => Signal::Legitimate,
            1 => Signal::Ambiguous,
            _ => Signal::Phishing,
        },
        None => Signal::Phishing,
    }
}

/// Established sites link their social presence.
pub(crate) fn page_rank(target: &ResolvedTarget) -> Signal {
    match &target.page {
        Some(page) => match page.social_markers {
            n if n >= 3 => Signal::Legitimate,
            n if n >= 1 => Signal::Ambiguous,
            _ => Signal::Phishing,
        },
        None => Signal::Phishing,
    }
}

fn is_non_public_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}

/// Known-abusive hosting substrings and non-public addresses for a public
/// site are both strong phishing markers.
pub(crate) fn stats_report(target: &ResolvedTarget) -> Signal {
    if SUSPICIOUS_HOSTS.iter().any(|h| target.host.contains(h)) {
        return Signal::Phishing;
    }
    if let Some(ip) = target.resolved_ip {
        if is_non_public_ip(ip) {
            return Signal::Phishing;
        }
    }
    Signal::Legitimate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::content::summarize;
    use crate::initialization::init_extractor;

    fn target(url: &str) -> ResolvedTarget {
        let extractor = init_extractor();
        ResolvedTarget::from_url(url, &extractor).unwrap()
    }

    fn with_redirects(count: usize) -> ResolvedTarget {
        let mut t = target("https://example.com/");
        t.page = Some(summarize(
            "<html></html>",
            "https://example.com/",
            "example.com",
            200,
            count,
        ));
        t
    }

    #[test]
    fn test_forwarding_boundaries() {
        assert_eq!(website_forwarding(&with_redirects(1)), Signal::Legitimate);
        assert_eq!(website_forwarding(&with_redirects(4)), Signal::Ambiguous);
        assert_eq!(website_forwarding(&with_redirects(5)), Signal::Phishing);
    }

    #[test]
    fn test_forwarding_without_page() {
        assert_eq!(
            website_forwarding(&target("https://example.com/")),
            Signal::Phishing
        );
    }

    #[test]
    fn test_stats_report_suspicious_host() {
        assert_eq!(
            stats_report(&target("http://login.esy.es/bank")),
            Signal::Phishing
        );
        assert_eq!(
            stats_report(&target("https://example.com/")),
            Signal::Legitimate
        );
    }

    #[test]
    fn test_stats_report_private_ip() {
        let mut t = target("https://example.com/");
        t.resolved_ip = Some("10.0.0.5".parse().unwrap());
        assert_eq!(stats_report(&t), Signal::Phishing);

        t.resolved_ip = Some("93.184.216.34".parse().unwrap());
        assert_eq!(stats_report(&t), Signal::Legitimate);
    }

    #[test]
    fn test_traffic_and_page_rank_without_page() {
        let t = target("https://example.com/");
        assert_eq!(website_traffic(&t), Signal::Phishing);
        assert_eq!(page_rank(&t), Signal::Phishing);
    }
}

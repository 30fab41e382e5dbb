//! Transport signal: https usage and certificate verification.

use crate::fetch::{ResolvedTarget, TlsProbe};
use crate::signals::Signal;

/// https with a verified handshake scores 1, https that failed verification
/// scores 0, plain http scores -1.
pub(crate) fn https(target: &ResolvedTarget) -> Signal {
    if target.scheme != "https" {
        return Signal::Phishing;
    }
    match target.tls {
        TlsProbe::Established => Signal::Legitimate,
        TlsProbe::Failed | TlsProbe::NotAttempted => Signal::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_extractor;

    fn target(url: &str, tls: TlsProbe) -> ResolvedTarget {
        let extractor = init_extractor();
        let mut t = ResolvedTarget::from_url(url, &extractor).unwrap();
        t.tls = tls;
        t
    }

    #[test]
    fn test_verified_https() {
        assert_eq!(
            https(&target("https://example.com/", TlsProbe::Established)),
            Signal::Legitimate
        );
    }

    #[test]
    fn test_unverifiable_https() {
        assert_eq!(
            https(&target("https://example.com/", TlsProbe::Failed)),
            Signal::Ambiguous
        );
    }

    #[test]
    fn test_plain_http() {
        assert_eq!(
            https(&target("http://example.com/", TlsProbe::NotAttempted)),
            Signal::Phishing
        );
    }
}

//! WHOIS- and DNS-derived signals.
//!
//! An absent WHOIS record scores -1 everywhere. In fast mode the lookup is
//! skipped and these signals fall back to coarse heuristic estimates so the
//! vector stays complete at lower latency.

use crate::fetch::{ResolvedTarget, WhoisState};
use crate::signals::Signal;

/// Suffixes whose registries enforce enough process that a fast-mode
/// estimate leans legitimate.
const COMMON_SUFFIXES: [&str; 5] = ["com", "org", "net", "edu", "gov"];

fn has_common_suffix(target: &ResolvedTarget) -> bool {
    target
        .suffix
        .as_deref()
        .map(|s| COMMON_SUFFIXES.contains(&s))
        .unwrap_or(false)
}

/// Registration span of at least a year reads as a real operation; phishing
/// domains are typically registered for the minimum term.
pub(crate) fn domain_reg_len(target: &ResolvedTarget) -> Signal {
    match &target.whois {
        WhoisState::Record(record) => match record.registration_months() {
            Some(months) if months >= 12 => Signal::Legitimate,
            _ => Signal::Phishing,
        },
        WhoisState::Skipped => {
            if has_common_suffix(target) {
                Signal::Legitimate
            } else {
                Signal::Phishing
            }
        }
        WhoisState::Absent => Signal::Phishing,
    }
}

/// The registered name should cover the queried registrable domain.
pub(crate) fn abnormal_url(target: &ResolvedTarget) -> Signal {
    match &target.whois {
        WhoisState::Record(record) => {
            let matches = record
                .domain_name
                .as_deref()
                .zip(target.registrable_domain.as_deref())
                .map(|(registered, queried)| registered.contains(queried))
                .unwrap_or(false);
            if matches {
                Signal::Legitimate
            } else {
                Signal::Phishing
            }
        }
        WhoisState::Skipped => {
            if target.host.is_empty() {
                Signal::Phishing
            } else {
                Signal::Legitimate
            }
        }
        WhoisState::Absent => Signal::Phishing,
    }
}

pub(crate) fn age_of_domain(target: &ResolvedTarget) -> Signal {
    match &target.whois {
        WhoisState::Record(record) => match record.age_months(chrono::Utc::now()) {
            Some(months) if months >= 6 => Signal::Legitimate,
            _ => Signal::Phishing,
        },
        WhoisState::Skipped => {
            let long_label = target
                .domain_label
                .as_deref()
                .map(|label| label.len() > 8)
                .unwrap_or(false);
            if long_label && has_common_suffix(target) {
                Signal::Legitimate
            } else {
                Signal::Phishing
            }
        }
        WhoisState::Absent => Signal::Phishing,
    }
}

/// DNS existence combined with domain age: both good → 1, resolvable but
/// young or unknown age → 0, unresolvable → -1.
pub(crate) fn dns_record(target: &ResolvedTarget) -> Signal {
    if !target.dns_a_record {
        return Signal::Phishing;
    }
    if age_of_domain(target) == Signal::Legitimate {
        Signal::Legitimate
    } else {
        Signal::Ambiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_extractor;
    use crate::whois::WhoisRecord;
    use chrono::{Duration, Utc};

    fn target(url: &str, whois: WhoisState) -> ResolvedTarget {
        let extractor = init_extractor();
        let mut t = ResolvedTarget::from_url(url, &extractor).unwrap();
        t.whois = whois;
        t
    }

    fn record(age_days: i64, span_days: i64) -> WhoisRecord {
        let creation = Utc::now() - Duration::days(age_days);
        WhoisRecord {
            domain_name: Some("example.com".into()),
            creation_date: Some(creation),
            expiration_date: Some(creation + Duration::days(span_days)),
            registrar: None,
        }
    }

    #[test]
    fn test_reg_len_long_registration() {
        let t = target(
            "https://example.com/",
            WhoisState::Record(record(400, 800)),
        );
        assert_eq!(domain_reg_len(&t), Signal::Legitimate);
    }

    #[test]
    fn test_reg_len_short_registration() {
        let t = target(
            "https://example.com/",
            WhoisState::Record(record(10, 200)),
        );
        assert_eq!(domain_reg_len(&t), Signal::Phishing);
    }

    #[test]
    fn test_reg_len_absent_whois() {
        let t = target("https://example.com/", WhoisState::Absent);
        assert_eq!(domain_reg_len(&t), Signal::Phishing);
    }

    #[test]
    fn test_reg_len_fast_mode_estimate() {
        assert_eq!(
            domain_reg_len(&target("https://example.com/", WhoisState::Skipped)),
            Signal::Legitimate
        );
        assert_eq!(
            domain_reg_len(&target("https://example.xyz/", WhoisState::Skipped)),
            Signal::Phishing
        );
    }

    #[test]
    fn test_age_of_domain_old_and_new() {
        let old = target(
            "https://example.com/",
            WhoisState::Record(record(365, 730)),
        );
        assert_eq!(age_of_domain(&old), Signal::Legitimate);

        let fresh = target(
            "https://example.com/",
            WhoisState::Record(record(30, 365)),
        );
        assert_eq!(age_of_domain(&fresh), Signal::Phishing);
    }

    #[test]
    fn test_abnormal_url_match_and_mismatch() {
        let t = target(
            "https://example.com/",
            WhoisState::Record(record(365, 730)),
        );
        assert_eq!(abnormal_url(&t), Signal::Legitimate);

        let mut mismatched = record(365, 730);
        mismatched.domain_name = Some("something-else.net".into());
        let t = target("https://example.com/", WhoisState::Record(mismatched));
        assert_eq!(abnormal_url(&t), Signal::Phishing);
    }

    #[test]
    fn test_dns_record_combination() {
        let mut t = target(
            "https://example.com/",
            WhoisState::Record(record(365, 730)),
        );
        t.dns_a_record = true;
        assert_eq!(dns_record(&t), Signal::Legitimate);

        let mut t = target(
            "https://example.com/",
            WhoisState::Record(record(30, 365)),
        );
        t.dns_a_record = true;
        assert_eq!(dns_record(&t), Signal::Ambiguous);

        let t = target("https://example.com/", WhoisState::Absent);
        assert_eq!(dns_record(&t), Signal::Phishing);
    }
}

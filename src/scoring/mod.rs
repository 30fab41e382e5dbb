//! Risk scoring and blending.
//!
//! Six weighted red flags are assessed on top of the classifier output.
//! The blend is multiplicative on the residual: flags can only erode the
//! remaining safety margin, never push a low base probability negative,
//! and the result stays in [0,100] no matter how many flags trigger.

mod lookalike;

use strum_macros::{Display, EnumIter};

use crate::fetch::ResolvedTarget;
use crate::whitelist::{fuzzy_match, WhitelistSnapshot};

pub use lookalike::{has_confusable_chars, typosquat_of, POPULAR_DOMAINS};

/// Top-level domains with an outsized abuse share.
pub const SUSPICIOUS_TLDS: [&str; 10] = [
    "xyz", "top", "gq", "ml", "cf", "tk", "pw", "work", "support", "info",
];

/// Credential and payment lure words matched against the host.
pub const SUSPICIOUS_KEYWORDS: [&str; 14] = [
    "login", "secure", "update", "verify", "account", "banking", "signin", "webmail", "support",
    "admin", "pay", "confirm", "auth", "wallet",
];

/// A weighted boolean risk indicator applied after classifier scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum RedFlag {
    /// Near-misspelling of a whitelisted domain.
    FuzzyTypo,
    /// Confusable characters in the host.
    Homoglyph,
    /// Near-misspelling of a globally popular domain.
    Typosquat,
    /// Abused top-level domain.
    SuspiciousTld,
    /// Three or more subdomain labels.
    ExcessiveSubdomain,
    /// Credential/payment lure word in the host.
    SuspiciousKeyword,
}

impl RedFlag {
    /// Fixed weight of this flag. The weights over all flags sum to 1.0, so
    /// the combined score is itself a fraction of the residual.
    pub fn weight(self) -> f64 {
        match self {
            RedFlag::FuzzyTypo => 0.35,
            RedFlag::Homoglyph => 0.25,
            RedFlag::Typosquat => 0.20,
            RedFlag::SuspiciousTld => 0.10,
            RedFlag::ExcessiveSubdomain => 0.05,
            RedFlag::SuspiciousKeyword => 0.05,
        }
    }

    /// User-facing warning text for a triggered flag.
    pub fn warning(self) -> &'static str {
        match self {
            RedFlag::FuzzyTypo => {
                "Domain closely resembles a whitelisted domain (possible institutional typosquat)"
            }
            RedFlag::Homoglyph => "Domain contains confusable characters (homoglyph attack)",
            RedFlag::Typosquat => "Domain resembles a globally popular domain (typosquatting)",
            RedFlag::SuspiciousTld => "Domain uses a frequently abused top-level domain",
            RedFlag::ExcessiveSubdomain => "Domain has an excessive number of subdomains",
            RedFlag::SuspiciousKeyword => "Domain contains a suspicious keyword",
        }
    }
}

/// The set of red flags triggered for one target.
#[derive(Debug, Clone, Default)]
pub struct RedFlagAssessment {
    triggered: Vec<RedFlag>,
}

impl RedFlagAssessment {
    /// Combined score in [0,1]: the sum of triggered flag weights.
    pub fn score(&self) -> f64 {
        self.triggered.iter().map(|f| f.weight()).sum()
    }

    /// Flags that triggered, in assessment order.
    pub fn triggered(&self) -> &[RedFlag] {
        &self.triggered
    }

    /// Whether a particular flag triggered.
    pub fn has(&self, flag: RedFlag) -> bool {
        self.triggered.contains(&flag)
    }

    /// Warning texts for all triggered flags.
    pub fn warnings(&self) -> Vec<&'static str> {
        self.triggered.iter().map(|f| f.warning()).collect()
    }

    #[cfg(test)]
    pub(crate) fn with_flags(triggered: Vec<RedFlag>) -> Self {
        Self { triggered }
    }
}

/// Assesses all six red flags for a resolved target.
///
/// Only string work against the already-resolved identity and the current
/// whitelist snapshot; no network access.
pub fn assess_red_flags(
    extractor: &psl::List,
    target: &ResolvedTarget,
    whitelist: &WhitelistSnapshot,
) -> RedFlagAssessment {
    let mut triggered = Vec::new();

    if fuzzy_match(extractor, &target.host, whitelist).is_some() {
        triggered.push(RedFlag::FuzzyTypo);
    }

    if has_confusable_chars(&target.host) {
        triggered.push(RedFlag::Homoglyph);
    }

    if let Some(registrable) = target.registrable_domain.as_deref() {
        if typosquat_of(registrable).is_some() {
            triggered.push(RedFlag::Typosquat);
        }
    }

    if let Some(suffix) = target.suffix.as_deref() {
        let last_label = suffix.rsplit('.').next().unwrap_or(suffix);
        if SUSPICIOUS_TLDS.contains(&last_label) {
            triggered.push(RedFlag::SuspiciousTld);
        }
    }

    // Depth 2 already scores 0 in the subdomain signal; only 3+ flags here.
    if target.subdomain_depth() >= 3 {
        triggered.push(RedFlag::ExcessiveSubdomain);
    }

    if SUSPICIOUS_KEYWORDS.iter().any(|kw| target.host.contains(kw)) {
        triggered.push(RedFlag::SuspiciousKeyword);
    }

    RedFlagAssessment { triggered }
}

/// Blends the classifier output with the red-flag score.
///
/// `phishing_pct` is the classifier's phishing probability in [0,100].
/// The triggered flags consume a fraction of the residual safety margin:
/// `final = p + (100 - p) * score`. The result is clamped to [0,100] and
/// returned as `(safe, phishing)`, rounded to two decimals.
pub fn blend(phishing_pct: f64, assessment: &RedFlagAssessment) -> (f64, f64) {
    let blended = phishing_pct + (100.0 - phishing_pct) * assessment.score();
    let phishing = round2(blended.clamp(0.0, 100.0));
    let safe = round2(100.0 - phishing);
    (safe, phishing)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_extractor;
    use crate::whitelist::WhitelistSnapshot;
    use strum::IntoEnumIterator;

    fn target(url: &str) -> ResolvedTarget {
        let extractor = init_extractor();
        ResolvedTarget::from_url(url, &extractor).unwrap()
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = RedFlag::iter().map(|f| f.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_flags_with_zero_base_yield_certainty() {
        let assessment = RedFlagAssessment::with_flags(RedFlag::iter().collect());
        let (safe, phishing) = blend(0.0, &assessment);
        assert_eq!(phishing, 100.0);
        assert_eq!(safe, 0.0);
    }

    #[test]
    fn test_no_flags_pass_classifier_through() {
        let (safe, phishing) = blend(37.5, &RedFlagAssessment::default());
        assert_eq!(phishing, 37.5);
        assert_eq!(safe, 62.5);
    }

    #[test]
    fn test_blend_consumes_residual_only() {
        let assessment = RedFlagAssessment::with_flags(vec![RedFlag::Typosquat]);
        // 80 + 20 * 0.20 = 84
        let (safe, phishing) = blend(80.0, &assessment);
        assert_eq!(phishing, 84.0);
        assert_eq!(safe, 16.0);
    }

    #[test]
    fn test_assess_suspicious_tld_and_keyword() {
        let extractor = init_extractor();
        let whitelist = WhitelistSnapshot::default();
        let assessment = assess_red_flags(
            &extractor,
            &target("http://login-update.example.xyz/"),
            &whitelist,
        );
        assert!(assessment.has(RedFlag::SuspiciousTld));
        assert!(assessment.has(RedFlag::SuspiciousKeyword));
        assert!(!assessment.has(RedFlag::ExcessiveSubdomain));
    }

    #[test]
    fn test_assess_excessive_subdomains() {
        let extractor = init_extractor();
        let whitelist = WhitelistSnapshot::default();

        let deep = assess_red_flags(
            &extractor,
            &target("http://a.b.c.example.com/"),
            &whitelist,
        );
        assert!(deep.has(RedFlag::ExcessiveSubdomain));

        // Two labels score ambiguous in the signal but do not flag here
        let two = assess_red_flags(&extractor, &target("http://a.b.example.com/"), &whitelist);
        assert!(!two.has(RedFlag::ExcessiveSubdomain));
    }

    #[test]
    fn test_assess_typosquat_flag() {
        let extractor = init_extractor();
        let whitelist = WhitelistSnapshot::default();
        let assessment =
            assess_red_flags(&extractor, &target("http://goog1e.com/"), &whitelist);
        assert!(assessment.has(RedFlag::Typosquat));

        let clean = assess_red_flags(&extractor, &target("http://google.com/"), &whitelist);
        assert!(!clean.has(RedFlag::Typosquat));
    }

    // Blend bounds hold for any base probability and any flag subset.
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_blend_bounds(p in 0.0f64..=100.0, mask in 0u8..64) {
            let flags: Vec<RedFlag> = RedFlag::iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, f)| f)
                .collect();
            let assessment = RedFlagAssessment::with_flags(flags);
            let (safe, phishing) = blend(p, &assessment);

            prop_assert!((0.0..=100.0).contains(&safe));
            prop_assert!((0.0..=100.0).contains(&phishing));
            prop_assert!((safe + phishing - 100.0).abs() < 1e-6);
            // Flags never lower the phishing score.
            prop_assert!(phishing + 1e-6 >= (p * 100.0).round() / 100.0);
        }
    }
}

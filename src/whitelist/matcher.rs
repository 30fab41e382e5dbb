//! Fuzzy trust-list matching.
//!
//! Catches one- and two-character misspellings of trusted domains, the
//! typosquats of institutional sites (internet banking portals and the
//! like) that a global popular-domain list would never carry.

use strsim::levenshtein;

use crate::fetch::decompose_host;
use crate::whitelist::WhitelistSnapshot;

/// Edit-distance window for a fuzzy hit. Distance 0 is an exact match and
/// handled before this matcher runs; beyond 2 is not similar enough.
const MIN_DISTANCE: usize = 1;
const MAX_DISTANCE: usize = 2;

/// Finds a whitelisted domain the queried host is a near-misspelling of.
///
/// Rules: the host and a listed domain match when either
/// - both are root domains and their edit distance is 1 or 2, or
/// - both carry a subdomain, share the same registrable root, and the full
///   hostnames are within edit distance 1 or 2.
///
/// Exactly whitelisted hosts never match (that case short-circuits the
/// whole scoring engine upstream).
///
/// # Returns
///
/// The matched whitelist domain, or `None`.
pub fn fuzzy_match(
    extractor: &psl::List,
    host: &str,
    snapshot: &WhitelistSnapshot,
) -> Option<String> {
    if snapshot.contains(host) {
        return None;
    }

    let host = host.to_lowercase();
    let queried = decompose_host(extractor, &host);
    let queried_root = queried.registrable();
    let queried_has_sub = queried.subdomain_depth() > 0;

    for listed in snapshot.domains() {
        let listed_parts = decompose_host(extractor, listed);
        let listed_has_sub = listed_parts.subdomain_depth() > 0;

        let candidate = match (queried_has_sub, listed_has_sub) {
            (false, false) => true,
            (true, true) => queried_root.is_some() && queried_root == listed_parts.registrable(),
            _ => false,
        };
        if !candidate {
            continue;
        }

        let distance = levenshtein(&host, listed);
        if (MIN_DISTANCE..=MAX_DISTANCE).contains(&distance) {
            log::debug!("Fuzzy whitelist hit: {host} ~ {listed} (distance {distance})");
            return Some(listed.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_extractor;
    use crate::whitelist::{WhitelistEntry, WhitelistSnapshot};

    fn snapshot(domains: &[&str]) -> WhitelistSnapshot {
        let entries = domains
            .iter()
            .map(|d| WhitelistEntry {
                domain: d.to_string(),
                description: String::new(),
            })
            .collect();
        WhitelistSnapshot::from_entries(entries)
    }

    #[test]
    fn test_root_domain_typo_matches() {
        let extractor = init_extractor();
        let list = snapshot(&["securebank.com"]);
        assert_eq!(
            fuzzy_match(&extractor, "secure-bank.com", &list),
            Some("securebank.com".to_string())
        );
    }

    #[test]
    fn test_exact_member_is_not_fuzzy() {
        let extractor = init_extractor();
        let list = snapshot(&["securebank.com"]);
        assert_eq!(fuzzy_match(&extractor, "securebank.com", &list), None);
    }

    #[test]
    fn test_distance_beyond_two_does_not_match() {
        let extractor = init_extractor();
        let list = snapshot(&["securebank.com"]);
        assert_eq!(fuzzy_match(&extractor, "sekurebnk.org", &list), None);
    }

    #[test]
    fn test_subdomains_require_same_root() {
        let extractor = init_extractor();
        // Different registrable roots, so the subdomain rule does not apply
        let list = snapshot(&["b.securebank.com"]);
        assert_eq!(fuzzy_match(&extractor, "a.secure-bank.com", &list), None);
    }

    #[test]
    fn test_subdomain_typo_same_root_matches() {
        let extractor = init_extractor();
        let list = snapshot(&["ib.securebank.com"]);
        assert_eq!(
            fuzzy_match(&extractor, "lb.securebank.com", &list),
            Some("ib.securebank.com".to_string())
        );
    }

    #[test]
    fn test_root_vs_subdomain_never_compared() {
        let extractor = init_extractor();
        let list = snapshot(&["securebank.com"]);
        assert_eq!(fuzzy_match(&extractor, "m.securebank.com", &list), None);
    }
}

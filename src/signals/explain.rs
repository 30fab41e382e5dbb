//! Human-readable explanations for signal outcomes.
//!
//! One entry per (signal, outcome) pair, used verbatim in API responses.

use crate::signals::{Signal, SignalName};

/// Explanation for a signal outcome, keyed by name and value.
pub fn explanation(name: SignalName, signal: Signal) -> &'static str {
    let [good, mid, bad] = triple(name);
    match signal {
        Signal::Legitimate => good,
        Signal::Ambiguous => mid,
        Signal::Phishing => bad,
    }
}

fn triple(name: SignalName) -> [&'static str; 3] {
    use SignalName::*;
    match name {
        UsingIp => [
            "The host is a regular domain name rather than a raw IP address.",
            "No clear verdict on IP usage.",
            "The host is a raw IP address, a pattern common in phishing URLs.",
        ],
        LongUrl => [
            "The URL has a reasonable length.",
            "The URL is somewhat long; review it carefully.",
            "The URL is very long, which is often used to hide the real destination.",
        ],
        ShortUrl => [
            "The URL does not use a link-shortening service.",
            "No clear verdict on link shortening.",
            "The URL uses a link shortener, which can conceal the real destination.",
        ],
        AtSymbol => [
            "The URL does not contain an '@' symbol.",
            "No clear verdict on '@' usage.",
            "The URL contains '@', which makes browsers discard everything before it.",
        ],
        DoubleSlashRedirect => [
            "The URL path does not embed a second '//'.",
            "No clear verdict on embedded redirects.",
            "The URL embeds '//' after the scheme, a common redirect trick.",
        ],
        PrefixSuffix => [
            "The domain name does not use a hyphen.",
            "No clear verdict on hyphen usage.",
            "The domain uses a hyphen, often added to imitate a real brand.",
        ],
        SubDomains => [
            "The host has at most one subdomain.",
            "The host has two subdomains; look closer.",
            "The host has many subdomains, a common way to fake a trusted name.",
        ],
        Https => [
            "The site uses HTTPS with a verifiable certificate.",
            "The site claims HTTPS but the certificate could not be verified.",
            "The site does not use HTTPS.",
        ],
        DomainRegLen => [
            "The domain is registered for more than a year ahead.",
            "The registration period is unclear.",
            "The domain registration is short or unknown, which is risky.",
        ],
        Favicon => [
            "The favicon is served from the site's own domain.",
            "No clear verdict on the favicon.",
            "The favicon is missing or served from a foreign domain.",
        ],
        NonStdPort => [
            "The site uses a standard web port.",
            "No clear verdict on the port.",
            "The site uses a non-standard port, which is unusual for public sites.",
        ],
        HttpsDomainUrl => [
            "The host name does not embed the token 'https'.",
            "No clear verdict on the host name.",
            "The host name embeds 'https' to fake a secure appearance.",
        ],
        RequestUrl => [
            "Most page resources load from the site's own domain.",
            "A notable share of resources load from other domains.",
            "Most resources load from foreign domains, typical of cloned pages.",
        ],
        AnchorUrl => [
            "Most links stay on this site.",
            "Some links lead away from this site.",
            "Most links lead away from this site or go nowhere.",
        ],
        LinksInScriptTags => [
            "Script and stylesheet references stay on this site.",
            "Some script and stylesheet references are external.",
            "Most script and stylesheet references are external.",
        ],
        ServerFormHandler => [
            "Forms submit to the site's own domain.",
            "Some forms submit to a different domain.",
            "Forms submit nowhere or to a blank handler, typical of credential traps.",
        ],
        InfoEmail => [
            "No suspicious mail handlers found on the page.",
            "No clear verdict on mail usage.",
            "The page wires input to a mail handler, typical of data harvesting.",
        ],
        AbnormalUrl => [
            "The URL matches the domain's registration records.",
            "No clear verdict against registration records.",
            "The URL does not match the domain's registration records.",
        ],
        WebsiteForwarding => [
            "The URL reaches its destination with at most one redirect.",
            "The URL goes through several redirects.",
            "The URL goes through many redirects, which hides the destination.",
        ],
        StatusBarCust => [
            "The page does not manipulate the status bar.",
            "No clear verdict on status bar behavior.",
            "The page rewrites the status bar to hide the real link target.",
        ],
        DisableRightClick => [
            "Right-click works normally on the page.",
            "No clear verdict on right-click behavior.",
            "The page disables right-click, often to block inspection.",
        ],
        UsingPopupWindow => [
            "The page does not open popup windows.",
            "No clear verdict on popups.",
            "The page opens popups or modal prompts, a common lure technique.",
        ],
        IframeRedirection => [
            "The page does not embed iframes.",
            "The page embeds same-origin iframes.",
            "The page embeds hidden or foreign iframes.",
        ],
        AgeOfDomain => [
            "The domain has existed for at least six months.",
            "The domain's age is unclear.",
            "The domain is very new or its age is unknown.",
        ],
        DnsRecord => [
            "DNS records exist and the domain is established.",
            "DNS records exist but the domain is young or unverified.",
            "No DNS records were found for the host.",
        ],
        WebsiteTraffic => [
            "The site carries the tooling of an actively operated property.",
            "The site shows limited signs of active operation.",
            "The site shows no signs of an operated property.",
        ],
        PageRank => [
            "The site links an established social presence.",
            "The site links some social presence.",
            "The site links no social presence.",
        ],
        GoogleIndex => [
            "The page does not opt out of search indexing.",
            "No clear verdict on search indexing.",
            "The page asks search engines not to index it.",
        ],
        LinksPointingToPage => [
            "Most links on the page point back into the site.",
            "The page balances internal and external links.",
            "Almost all links on the page point elsewhere.",
        ],
        StatsReport => [
            "The host does not appear in known abuse reports.",
            "No clear verdict from abuse reports.",
            "The host matches known abusive hosting or resolves to a non-public address.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_pair_has_distinct_nonempty_text() {
        for name in SignalName::iter() {
            let good = explanation(name, Signal::Legitimate);
            let mid = explanation(name, Signal::Ambiguous);
            let bad = explanation(name, Signal::Phishing);
            assert!(!good.is_empty() && !mid.is_empty() && !bad.is_empty());
            assert_ne!(good, bad, "{name} should distinguish outcomes");
        }
    }
}

//! Lexical signals: computed from the URL text alone, no network input.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::STANDARD_PORTS;
use crate::fetch::ResolvedTarget;
use crate::signals::Signal;

/// URL shortening services. A match anywhere in the URL is treated as a
/// shortened (and therefore opaque) link.
const SHORTENING_SERVICES: [&str; 62] = [
    "bit.ly", "goo.gl", "shorte.st", "go2l.ink", "x.co", "ow.ly", "t.co", "tinyurl", "tr.im",
    "is.gd", "cli.gs", "yfrog.com", "migre.me", "ff.im", "tiny.cc", "url4.eu", "twit.ac",
    "su.pr", "twurl.nl", "snipurl.com", "short.to", "budurl.com", "ping.fm", "post.ly",
    "just.as", "bkite.com", "snipr.com", "fic.kr", "loopt.us", "doiop.com", "short.ie",
    "kl.am", "wp.me", "rubyurl.com", "om.ly", "to.ly", "bit.do", "lnkd.in", "db.tt", "qr.ae",
    "adf.ly", "bitly.com", "cur.lv", "ity.im", "q.gs", "po.st", "bc.vc", "twitthis.com",
    "u.to", "j.mp", "buzurl.com", "cutt.us", "u.bb", "yourls.org", "prettylinkpro.com",
    "scrnch.me", "filoops.info", "vzturl.com", "qr.net", "1url.com", "tweez.me", "rebrand.ly",
];

static SHORTENER_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = SHORTENING_SERVICES
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){pattern}")).expect("shortener pattern is valid")
});

pub(crate) fn using_ip(target: &ResolvedTarget) -> Signal {
    if target.is_ip_host {
        Signal::Phishing
    } else {
        Signal::Legitimate
    }
}

pub(crate) fn long_url(target: &ResolvedTarget) -> Signal {
    match target.url.chars().count() {
        n if n < 54 => Signal::Legitimate,
        n if n <= 75 => Signal::Ambiguous,
        _ => Signal::Phishing,
    }
}

pub(crate) fn short_url(target: &ResolvedTarget) -> Signal {
    if SHORTENER_RE.is_match(&target.url) {
        Signal::Phishing
    } else {
        Signal::Legitimate
    }
}

pub(crate) fn at_symbol(target: &ResolvedTarget) -> Signal {
    if target.url.contains('@') {
        Signal::Phishing
    } else {
        Signal::Legitimate
    }
}

/// A second "//" after the scheme separator suggests an embedded redirect.
pub(crate) fn double_slash_redirect(target: &ResolvedTarget) -> Signal {
    let after_scheme = match target.url.find("://") {
        Some(pos) => &target.url[pos + 3..],
        None => target.url.as_str(),
    };
    if after_scheme.contains("//") {
        Signal::Phishing
    } else {
        Signal::Legitimate
    }
}

pub(crate) fn prefix_suffix(target: &ResolvedTarget) -> Signal {
    match &target.domain_label {
        Some(label) if !label.contains('-') => Signal::Legitimate,
        _ => Signal::Phishing,
    }
}

pub(crate) fn sub_domains(target: &ResolvedTarget) -> Signal {
    if target.is_ip_host {
        return Signal::Phishing;
    }
    match target.subdomain_depth() {
        0 | 1 => Signal::Legitimate,
        2 => Signal::Ambiguous,
        _ => Signal::Phishing,
    }
}

pub(crate) fn non_std_port(target: &ResolvedTarget) -> Signal {
    match target.port {
        Some(port) if !STANDARD_PORTS.contains(&port) => Signal::Phishing,
        _ => Signal::Legitimate,
    }
}

/// "https" inside the host label is a classic impersonation trick.
pub(crate) fn https_domain_url(target: &ResolvedTarget) -> Signal {
    if target.host.contains("https") {
        Signal::Phishing
    } else {
        Signal::Legitimate
    }
}

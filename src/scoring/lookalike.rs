//! Lookalike-domain detection: confusable characters and typosquats of
//! globally popular domains.

use strsim::levenshtein;

/// Globally popular registrable domains checked for typosquatting.
pub const POPULAR_DOMAINS: [&str; 50] = [
    "google.com",
    "facebook.com",
    "youtube.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "wikipedia.org",
    "yahoo.com",
    "whatsapp.com",
    "amazon.com",
    "tiktok.com",
    "paypal.com",
    "netflix.com",
    "microsoft.com",
    "apple.com",
    "office.com",
    "bing.com",
    "live.com",
    "vk.com",
    "reddit.com",
    "pinterest.com",
    "tumblr.com",
    "ebay.com",
    "github.com",
    "stackoverflow.com",
    "dropbox.com",
    "wordpress.com",
    "blogspot.com",
    "adobe.com",
    "imdb.com",
    "fandom.com",
    "quora.com",
    "slack.com",
    "zoom.us",
    "canva.com",
    "spotify.com",
    "telegram.org",
    "medium.com",
    "booking.com",
    "airbnb.com",
    "coursera.org",
    "udemy.com",
    "shopee.com",
    "tokopedia.com",
    "bukalapak.com",
    "lazada.com",
    "detik.com",
    "kompas.com",
    "tribunnews.com",
    "liputan6.com",
];

/// Non-ASCII characters routinely used to imitate Latin letters in host
/// names: Cyrillic and Greek lookalikes.
const CONFUSABLE_CHARS: [char; 18] = [
    'а', 'е', 'о', 'р', 'с', 'х', 'у', 'і', 'ѕ', 'ј', // Cyrillic
    'ο', 'α', 'ρ', 'ε', 'ν', 'ι', 'κ', 'τ', // Greek
];

/// Detects confusable characters in a host name.
///
/// A punycode label (`xn--`) also counts: the decoded form is by definition
/// non-ASCII, and phishing hosts rarely have a legitimate reason to encode
/// a brand-like name.
pub fn has_confusable_chars(host: &str) -> bool {
    if host.split('.').any(|label| label.starts_with("xn--")) {
        return true;
    }
    host.chars().any(|c| CONFUSABLE_CHARS.contains(&c))
}

/// Detects a typosquat of a globally popular domain.
///
/// A registrable domain within edit distance 2 of a popular domain, without
/// being that domain, is flagged. Returns the imitated domain.
pub fn typosquat_of(registrable: &str) -> Option<&'static str> {
    let registrable = registrable.to_lowercase();
    for popular in POPULAR_DOMAINS {
        if registrable != popular && levenshtein(&registrable, popular) <= 2 {
            return Some(popular);
        }
    }
    None
}

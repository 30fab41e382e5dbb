//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes an input URL.
///
/// Adds an `https://` prefix if the scheme is missing, then checks that the
/// URL is syntactically valid and uses http or https. URLs longer than
/// [`MAX_URL_LENGTH`] are rejected.
///
/// # Returns
///
/// `Some(normalized_url)` if the URL should be processed, `None` otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() || url.len() > MAX_URL_LENGTH {
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length after normalization ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            _ => {
                warn!("Rejecting URL with unsupported scheme or no host: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Rejecting invalid URL: {url}");
            None
        }
    }
}

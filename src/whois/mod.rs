//! WHOIS domain lookup.
//!
//! Retrieves registration metadata (creation and expiration dates,
//! registrar, registered name) for a registrable domain. Lookups are
//! best-effort: any failure leaves the record absent, which the dependent
//! signals score as phishing-indicative.

mod client;
mod parse;

use chrono::{DateTime, Utc};

pub use parse::parse_date_string;

/// Registration metadata extracted from a WHOIS response.
#[derive(Debug, Clone, Default)]
pub struct WhoisRecord {
    /// Registered domain name, lower-cased.
    pub domain_name: Option<String>,
    /// Domain creation date.
    pub creation_date: Option<DateTime<Utc>>,
    /// Domain expiration date.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Registrar name.
    pub registrar: Option<String>,
}

impl WhoisRecord {
    /// Whole months between creation and expiration, when both are known.
    pub fn registration_months(&self) -> Option<i32> {
        months_between(self.creation_date?, self.expiration_date?)
    }

    /// Whole months from creation to `now`.
    pub fn age_months(&self, now: DateTime<Utc>) -> Option<i32> {
        months_between(self.creation_date?, now)
    }
}

fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<i32> {
    use chrono::Datelike;
    Some((to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32))
}

/// Performs a WHOIS lookup for a domain.
///
/// # Returns
///
/// `Some(record)` when the lookup succeeded and yielded at least one usable
/// field, `None` otherwise. Failures are logged, never raised.
pub async fn lookup_whois(domain: &str) -> Option<WhoisRecord> {
    log::debug!("Starting WHOIS lookup for {domain}");
    match client::lookup_raw(domain).await {
        Ok(raw) => {
            let record = parse::parse_record(&raw);
            if record.is_none() {
                log::debug!("WHOIS response for {domain} had no usable fields");
            }
            record
        }
        Err(e) => {
            log::warn!("WHOIS lookup failed for {domain}: {e}");
            None
        }
    }
}

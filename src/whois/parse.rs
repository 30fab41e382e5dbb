//! WHOIS response parsing.
//!
//! Registry responses are line-oriented `Key: value` text with no shared
//! schema; field names and date formats vary per registry, so both are
//! matched against a tolerant set of known spellings.

use chrono::{DateTime, Utc};

use super::WhoisRecord;

const CREATION_KEYS: [&str; 5] = [
    "creation date",
    "created",
    "registered on",
    "registration date",
    "domain registration date",
];

const EXPIRATION_KEYS: [&str; 5] = [
    "registry expiry date",
    "expiration date",
    "expiry date",
    "expires",
    "paid-till",
];

const REGISTRAR_KEYS: [&str; 2] = ["registrar", "sponsoring registrar"];

const DOMAIN_KEYS: [&str; 2] = ["domain name", "domain"];

/// Parses raw WHOIS text into a [`WhoisRecord`].
///
/// Unrecognized lines are ignored; the first match wins for each field.
/// Returns `None` when nothing useful could be extracted, which callers
/// treat the same as a failed lookup.
pub fn parse_record(raw: &str) -> Option<WhoisRecord> {
    let mut record = WhoisRecord::default();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        if record.creation_date.is_none() && CREATION_KEYS.contains(&key.as_str()) {
            record.creation_date = parse_date_string(value);
        } else if record.expiration_date.is_none() && EXPIRATION_KEYS.contains(&key.as_str()) {
            record.expiration_date = parse_date_string(value);
        } else if record.registrar.is_none() && REGISTRAR_KEYS.contains(&key.as_str()) {
            record.registrar = Some(value.to_string());
        } else if record.domain_name.is_none() && DOMAIN_KEYS.contains(&key.as_str()) {
            record.domain_name = Some(value.to_lowercase());
        }
    }

    if record.creation_date.is_none()
        && record.expiration_date.is_none()
        && record.registrar.is_none()
        && record.domain_name.is_none()
    {
        None
    } else {
        Some(record)
    }
}

/// Attempts to parse a date string in the formats registries actually use.
pub fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    // Strip trailing comments like "2030-01-01 (verified)"
    let date_str = date_str.split_whitespace().next().unwrap_or(date_str);

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y.%m.%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
    ];

    for format in &formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERISIGN_STYLE: &str = "\
   Domain Name: EXAMPLE.COM\n\
   Registrar: RESERVED-Internet Assigned Numbers Authority\n\
   Creation Date: 1995-08-14T04:00:00Z\n\
   Registry Expiry Date: 2026-08-13T04:00:00Z\n";

    #[test]
    fn test_parse_verisign_style_record() {
        let record = parse_record(VERISIGN_STYLE).unwrap();
        assert_eq!(record.domain_name.as_deref(), Some("example.com"));
        assert!(record.registrar.is_some());
        let created = record.creation_date.unwrap();
        assert!(created.format("%Y-%m-%d").to_string().starts_with("1995-08-14"));
        let expires = record.expiration_date.unwrap();
        assert!(expires.format("%Y-%m-%d").to_string().starts_with("2026-08-13"));
    }

    #[test]
    fn test_parse_record_ru_style() {
        let raw = "domain: EXAMPLE.RU\ncreated: 2001-03-15\npaid-till: 2026-03-15\n";
        let record = parse_record(raw).unwrap();
        assert_eq!(record.domain_name.as_deref(), Some("example.ru"));
        assert!(record.creation_date.is_some());
        assert!(record.expiration_date.is_some());
    }

    #[test]
    fn test_parse_record_nothing_useful() {
        assert!(parse_record("No match for domain \"X\".\n").is_none());
    }

    #[test]
    fn test_parse_date_string_iso8601() {
        let dt = parse_date_string("2024-01-15T10:30:45Z").unwrap();
        assert!(dt.format("%Y-%m-%d").to_string().starts_with("2024-01-15"));
    }

    #[test]
    fn test_parse_date_string_date_only() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_parse_date_string_dd_mmm_yyyy() {
        let dt = parse_date_string("15-Jan-2024").unwrap();
        assert!(dt.format("%Y-%m-%d").to_string().starts_with("2024-01-15"));
    }

    #[test]
    fn test_parse_date_string_invalid() {
        assert!(parse_date_string("not a date").is_none());
        assert!(parse_date_string("").is_none());
    }
}

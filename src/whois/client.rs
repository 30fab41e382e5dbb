//! Raw WHOIS protocol client.
//!
//! Queries WHOIS servers directly over TCP port 43. The responsible server
//! for a TLD is discovered through the IANA root server's referral line, so
//! no per-TLD server table has to be maintained.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::WHOIS_TIMEOUT_SECS;

const IANA_WHOIS_SERVER: &str = "whois.iana.org";
const WHOIS_PORT: u16 = 43;

/// Upper bound on a WHOIS response; registry responses are small text.
const MAX_WHOIS_RESPONSE: usize = 64 * 1024;

/// Sends one WHOIS query to `server` and reads the full response.
///
/// # Errors
///
/// Returns an error on connection failure, timeout, or an unreadable
/// response.
pub async fn query_server(server: &str, query: &str) -> Result<String> {
    let timeout = Duration::from_secs(WHOIS_TIMEOUT_SECS);

    let mut stream = tokio::time::timeout(timeout, TcpStream::connect((server, WHOIS_PORT)))
        .await
        .with_context(|| format!("WHOIS connect timeout for {server}"))?
        .with_context(|| format!("WHOIS connect failed for {server}"))?;

    stream
        .write_all(format!("{query}\r\n").as_bytes())
        .await
        .context("WHOIS write failed")?;

    let mut response = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let read = tokio::time::timeout(timeout, stream.read(&mut buf))
            .await
            .with_context(|| format!("WHOIS read timeout for {server}"))?
            .context("WHOIS read failed")?;
        if read == 0 {
            break;
        }
        response.extend_from_slice(&buf[..read]);
        if response.len() >= MAX_WHOIS_RESPONSE {
            break;
        }
    }

    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Extracts the referral server from an IANA root response.
fn parse_referral(response: &str) -> Option<String> {
    for line in response.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("whois:") {
            let server = rest.trim();
            if !server.is_empty() {
                return Some(server.to_string());
            }
        }
        // Some registries answer with "refer: whois.example"
        if let Some(rest) = line.strip_prefix("refer:") {
            let server = rest.trim();
            if !server.is_empty() {
                return Some(server.to_string());
            }
        }
    }
    None
}

/// Looks up the raw WHOIS text for a domain.
///
/// First asks the IANA root server, then follows its referral to the
/// registry server responsible for the TLD. When no referral is present the
/// root response itself is returned.
///
/// # Errors
///
/// Returns an error when neither the root nor the referred server could be
/// queried.
pub async fn lookup_raw(domain: &str) -> Result<String> {
    let root = query_server(IANA_WHOIS_SERVER, domain).await?;

    match parse_referral(&root) {
        Some(server) => match query_server(&server, domain).await {
            Ok(response) => Ok(response),
            Err(e) => {
                log::debug!("Referred WHOIS server {server} failed for {domain}: {e}");
                Ok(root)
            }
        },
        None => Ok(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_referral_whois_line() {
        let response = "\
domain:       COM\n\
organisation: VeriSign Global Registry Services\n\
whois:        whois.verisign-grs.com\n\
status:       ACTIVE\n";
        assert_eq!(
            parse_referral(response),
            Some("whois.verisign-grs.com".to_string())
        );
    }

    #[test]
    fn test_parse_referral_refer_line() {
        let response = "refer:    whois.nic.io\n";
        assert_eq!(parse_referral(response), Some("whois.nic.io".to_string()));
    }

    #[test]
    fn test_parse_referral_absent() {
        assert_eq!(parse_referral("domain: EXAMPLE\nstatus: ACTIVE\n"), None);
    }
}

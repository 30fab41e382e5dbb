//! Page download with manual redirect tracking and status-conditional retry.

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

use crate::config::{
    RETRIABLE_STATUSES, RETRY_FACTOR, RETRY_INITIAL_DELAY_MS, RETRY_MAX_ATTEMPTS,
    RETRY_MAX_DELAY_SECS,
};

/// A downloaded page, with its redirect history.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final HTTP status.
    pub status: u16,
    /// URL after following the chain.
    pub final_url: String,
    /// Every URL visited, starting with the original.
    pub redirect_chain: Vec<String>,
    /// Response body, truncated at the configured cap.
    pub body: String,
}

impl FetchedPage {
    /// Number of redirect hops taken.
    pub fn redirect_count(&self) -> usize {
        self.redirect_chain.len().saturating_sub(1)
    }
}

#[derive(Error, Debug)]
enum FetchAttemptError {
    #[error("retriable status {0}")]
    RetriableStatus(u16),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Resolves the redirect chain for a URL, following up to `max_hops` hops.
///
/// Uses a client with redirects disabled so every hop is observed. Only
/// 301/302/303/307/308 responses with a Location header are followed.
///
/// # Returns
///
/// `(final_url, chain)` where the chain contains every URL visited,
/// including the starting one.
pub async fn resolve_redirect_chain(
    start_url: &str,
    max_hops: usize,
    client: &reqwest::Client,
) -> anyhow::Result<(String, Vec<String>)> {
    let mut chain: Vec<String> = Vec::new();
    let mut current = start_url.to_string();

    for _ in 0..max_hops {
        chain.push(current.clone());
        let resp = client.get(&current).send().await?;

        let status = resp.status().as_u16();
        if matches!(status, 301 | 302 | 303 | 307 | 308) {
            if let Some(loc) = resp.headers().get(reqwest::header::LOCATION) {
                let loc = loc.to_str().unwrap_or("").to_string();
                let next = Url::parse(&loc)
                    .or_else(|_| Url::parse(&current).and_then(|base| base.join(&loc)))?;
                current = next.to_string();
                continue;
            }
            log::warn!("Redirect status {status} for {current} but no Location header");
            break;
        }
        break;
    }
    Ok((current, chain))
}

/// Downloads a page, capturing the full redirect history.
///
/// The chain is resolved with the redirect-disabled client, then the final
/// URL is fetched with the main client. The final fetch retries with
/// exponential backoff on 429/500/502/503/504; connection errors and every
/// other status are terminal. The body is streamed and truncated at
/// `max_body_bytes`.
///
/// # Errors
///
/// Returns an error on connection failure or when retries are exhausted.
/// Callers treat any error as "page absent" and move on.
pub async fn fetch_page(
    client: &reqwest::Client,
    redirect_client: &reqwest::Client,
    url: &str,
    max_hops: usize,
    max_body_bytes: usize,
) -> anyhow::Result<FetchedPage> {
    let (final_url, chain) = resolve_redirect_chain(url, max_hops, redirect_client).await?;

    let strategy = ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(RETRY_MAX_ATTEMPTS - 1);

    let target = final_url.clone();
    let response = RetryIf::spawn(
        strategy,
        || {
            let target = target.clone();
            async move {
                let resp = client.get(&target).send().await?;
                let status = resp.status().as_u16();
                if RETRIABLE_STATUSES.contains(&status) {
                    log::debug!("Got {status} from {target}, will retry");
                    return Err(FetchAttemptError::RetriableStatus(status));
                }
                Ok(resp)
            }
        },
        |e: &FetchAttemptError| matches!(e, FetchAttemptError::RetriableStatus(_)),
    )
    .await
    .map_err(|e| anyhow::anyhow!("fetch failed for {url}: {e}"))?;

    let status = response.status().as_u16();
    let mut body = Vec::new();
    let mut response = response;
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > max_body_bytes {
            body.extend_from_slice(&chunk[..max_body_bytes - body.len()]);
            log::debug!("Body for {url} truncated at {max_body_bytes} bytes");
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(FetchedPage {
        status,
        final_url,
        redirect_chain: chain,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

//! Ternary signal extraction.
//!
//! Each signal is a pure function over a [`ResolvedTarget`] returning one of
//! {-1, 0, 1}. The thirty signals live in a static, ordered registry whose
//! positions match the classifier's training order; the extractor dispatches
//! them over a bounded worker pool and writes each result into its assigned
//! index, so completion order never affects the vector. A signal that times
//! out, errors, or panics resolves to -1 without touching its siblings.

mod content;
mod explain;
mod lexical;
mod reputation;
mod transport;
mod whois_based;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use strum_macros::{Display, EnumIter};
use tokio::sync::Semaphore;

use crate::fetch::ResolvedTarget;

pub use explain::explanation;

/// Number of signals consumed by the classifier.
pub const FEATURE_COUNT: usize = 30;

/// Outcome of one heuristic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Signal {
    /// Phishing-indicative. Also the fail-suspicious default.
    Phishing = -1,
    /// Ambiguous.
    Ambiguous = 0,
    /// Legitimate-indicative.
    Legitimate = 1,
}

impl Signal {
    /// Numeric value fed to the classifier.
    pub fn value(self) -> i8 {
        self as i8
    }

    /// Human-readable verdict word for result reports.
    pub fn verdict_word(self) -> &'static str {
        match self {
            Signal::Legitimate => "Legitimate",
            Signal::Ambiguous => "Suspicious",
            Signal::Phishing => "Phishing",
        }
    }
}

/// Names of the thirty signals, in classifier training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[allow(missing_docs)]
pub enum SignalName {
    UsingIp,
    LongUrl,
    ShortUrl,
    AtSymbol,
    DoubleSlashRedirect,
    PrefixSuffix,
    SubDomains,
    Https,
    DomainRegLen,
    Favicon,
    NonStdPort,
    HttpsDomainUrl,
    RequestUrl,
    AnchorUrl,
    LinksInScriptTags,
    ServerFormHandler,
    InfoEmail,
    AbnormalUrl,
    WebsiteForwarding,
    StatusBarCust,
    DisableRightClick,
    UsingPopupWindow,
    IframeRedirection,
    AgeOfDomain,
    DnsRecord,
    WebsiteTraffic,
    PageRank,
    GoogleIndex,
    LinksPointingToPage,
    StatsReport,
}

/// A signal heuristic: pure, side-effect-free, infallible by contract.
pub type SignalFn = fn(&ResolvedTarget) -> Signal;

/// The ordered signal registry. Position is the classifier feature index.
pub const REGISTRY: [(SignalName, SignalFn); FEATURE_COUNT] = [
    (SignalName::UsingIp, lexical::using_ip),
    (SignalName::LongUrl, lexical::long_url),
    (SignalName::ShortUrl, lexical::short_url),
    (SignalName::AtSymbol, lexical::at_symbol),
    (SignalName::DoubleSlashRedirect, lexical::double_slash_redirect),
    (SignalName::PrefixSuffix, lexical::prefix_suffix),
    (SignalName::SubDomains, lexical::sub_domains),
    (SignalName::Https, transport::https),
    (SignalName::DomainRegLen, whois_based::domain_reg_len),
    (SignalName::Favicon, content::favicon),
    (SignalName::NonStdPort, lexical::non_std_port),
    (SignalName::HttpsDomainUrl, lexical::https_domain_url),
    (SignalName::RequestUrl, content::request_url),
    (SignalName::AnchorUrl, content::anchor_url),
    (SignalName::LinksInScriptTags, content::links_in_script_tags),
    (SignalName::ServerFormHandler, content::server_form_handler),
    (SignalName::InfoEmail, content::info_email),
    (SignalName::AbnormalUrl, whois_based::abnormal_url),
    (SignalName::WebsiteForwarding, reputation::website_forwarding),
    (SignalName::StatusBarCust, content::status_bar_cust),
    (SignalName::DisableRightClick, content::disable_right_click),
    (SignalName::UsingPopupWindow, content::using_popup_window),
    (SignalName::IframeRedirection, content::iframe_redirection),
    (SignalName::AgeOfDomain, whois_based::age_of_domain),
    (SignalName::DnsRecord, whois_based::dns_record),
    (SignalName::WebsiteTraffic, reputation::website_traffic),
    (SignalName::PageRank, reputation::page_rank),
    (SignalName::GoogleIndex, content::google_index),
    (SignalName::LinksPointingToPage, content::links_pointing_to_page),
    (SignalName::StatsReport, reputation::stats_report),
];

/// An ordered vector of exactly [`FEATURE_COUNT`] signals.
///
/// Starts out all phishing-indicative; the extractor overwrites each
/// position as its worker completes. The positional order is fixed to the
/// classifier's training order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector([Signal; FEATURE_COUNT]);

impl Default for FeatureVector {
    fn default() -> Self {
        Self([Signal::Phishing; FEATURE_COUNT])
    }
}

impl FeatureVector {
    /// The raw signals, in registry order.
    pub fn signals(&self) -> &[Signal; FEATURE_COUNT] {
        &self.0
    }

    /// Signal at a registry position.
    pub fn get(&self, index: usize) -> Signal {
        self.0[index]
    }

    fn set(&mut self, index: usize, signal: Signal) {
        self.0[index] = signal;
    }

    /// Numeric form consumed by the classifier.
    pub fn as_model_input(&self) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (slot, signal) in out.iter_mut().zip(self.0.iter()) {
            *slot = signal.value() as f64;
        }
        out
    }

    /// Iterates (name, signal) pairs in registry order.
    pub fn iter_named(&self) -> impl Iterator<Item = (SignalName, Signal)> + '_ {
        REGISTRY
            .iter()
            .zip(self.0.iter())
            .map(|((name, _), signal)| (*name, *signal))
    }

    #[cfg(test)]
    pub(crate) fn from_signals(signals: [Signal; FEATURE_COUNT]) -> Self {
        Self(signals)
    }
}

/// Computes the full feature vector for a resolved target.
///
/// Signals are dispatched concurrently, bounded by the worker semaphore.
/// Each computation runs on the blocking pool under `per_signal_timeout`
/// with panics absorbed; any failure yields -1 for that position only.
pub async fn extract_features(
    target: &Arc<ResolvedTarget>,
    workers: &Arc<Semaphore>,
    per_signal_timeout: Duration,
) -> FeatureVector {
    let mut vector = FeatureVector::default();

    let mut tasks = REGISTRY
        .iter()
        .enumerate()
        .map(|(index, (name, func))| {
            let target = Arc::clone(target);
            let workers = Arc::clone(workers);
            let name = *name;
            let func = *func;
            async move {
                let _permit = match workers.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, Signal::Phishing),
                };

                let computed = tokio::time::timeout(
                    per_signal_timeout,
                    tokio::task::spawn_blocking(move || {
                        catch_unwind(AssertUnwindSafe(|| func(&target)))
                            .unwrap_or(Signal::Phishing)
                    }),
                )
                .await;

                let signal = match computed {
                    Ok(Ok(signal)) => signal,
                    Ok(Err(e)) => {
                        log::warn!("Signal {name} worker failed: {e}");
                        Signal::Phishing
                    }
                    Err(_) => {
                        log::warn!("Signal {name} timed out");
                        Signal::Phishing
                    }
                };
                (index, signal)
            }
        })
        .collect::<FuturesUnordered<_>>();

    while let Some((index, signal)) = tasks.next().await {
        vector.set(index, signal);
    }

    vector
}

//! The detection orchestrator.
//!
//! Sequences the pipeline for one URL: whitelist short-circuit, target
//! resolution, signal extraction, classification, red-flag assessment, and
//! score blending. The engine owns every shared resource; requests are
//! otherwise stateless and run concurrently.

mod history;
mod result;

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::app::validate_and_normalize_url;
use crate::classifier::{Classifier, LinearClassifier};
use crate::config::{Config, HISTORY_CAPACITY, SIGNAL_TIMEOUT};
use crate::error_handling::DetectError;
use crate::fetch::{build_resolved_target, ResolverContext};
use crate::initialization::{
    init_client, init_extractor, init_redirect_client, init_resolver, init_semaphore,
};
use crate::scoring::{assess_red_flags, blend};
use crate::signals::{explanation, extract_features};
use crate::whitelist::WhitelistStore;

pub use history::{HistoryEntry, HistoryLog};
pub use result::{DetectionResult, FeatureReport};

/// The detection engine: configuration plus every shared resource.
pub struct DetectionEngine {
    config: Config,
    ctx: ResolverContext,
    classifier: Arc<dyn Classifier>,
    whitelist: Arc<WhitelistStore>,
    history: Arc<HistoryLog>,
    workers: Arc<Semaphore>,
}

impl std::fmt::Debug for DetectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DetectionEngine {
    /// Builds the engine, loading the classifier model from the configured
    /// path.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierUnavailable` when the model cannot be loaded and
    /// `Configuration` for invalid settings or an unreadable whitelist.
    /// Both are fatal; there is no degraded scoring mode.
    pub fn new(config: Config) -> Result<Self, DetectError> {
        let classifier: Arc<dyn Classifier> =
            Arc::new(LinearClassifier::from_file(&config.model_path)?);
        Self::with_classifier(config, classifier)
    }

    /// Builds the engine around an externally supplied classifier.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for invalid settings or an unreadable
    /// whitelist file.
    pub fn with_classifier(
        config: Config,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, DetectError> {
        config.validate()?;

        let whitelist = Arc::new(WhitelistStore::open(&config.whitelist_path)?);
        let client = init_client(&config)
            .map_err(|e| DetectError::Configuration(format!("http client: {e}")))?;
        let redirect_client = init_redirect_client(&config)
            .map_err(|e| DetectError::Configuration(format!("redirect client: {e}")))?;
        let resolver = init_resolver()
            .map_err(|e| DetectError::Configuration(format!("dns resolver: {e}")))?;
        let extractor = init_extractor();
        let workers = init_semaphore(config.worker_pool_size);

        Ok(Self {
            ctx: ResolverContext {
                client,
                redirect_client,
                resolver,
                extractor,
            },
            classifier,
            whitelist,
            history: Arc::new(HistoryLog::new(HISTORY_CAPACITY)),
            workers,
            config,
        })
    }

    /// The whitelist store, for administrative operations.
    pub fn whitelist(&self) -> &Arc<WhitelistStore> {
        &self.whitelist
    }

    /// The detection history log.
    pub fn history(&self) -> &Arc<HistoryLog> {
        &self.history
    }

    /// Classifies a URL.
    ///
    /// An exactly whitelisted domain short-circuits before any network or
    /// classifier work. Otherwise the URL is resolved, the thirty signals
    /// are extracted in parallel, the classifier scores the vector, and the
    /// red-flag assessment erodes the remaining safety margin.
    ///
    /// # Errors
    ///
    /// `InvalidUrl` for malformed input; `ClassifierUnavailable` if the
    /// model fails at scoring time. Network failures never surface here.
    pub async fn detect(&self, raw_url: &str) -> Result<DetectionResult, DetectError> {
        let url = validate_and_normalize_url(raw_url)
            .ok_or_else(|| DetectError::InvalidUrl(raw_url.to_string()))?;

        let parsed = url::Url::parse(&url)
            .map_err(|e| DetectError::InvalidUrl(format!("{raw_url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| DetectError::InvalidUrl(format!("{raw_url}: no host")))?
            .to_lowercase();

        if self.whitelist.contains(&host) {
            log::info!("{host} is whitelisted, skipping analysis");
            let result = DetectionResult::whitelisted(&url);
            self.history.record(&result);
            return Ok(result);
        }

        log::info!("Analyzing {url}");
        let target = Arc::new(build_resolved_target(&self.ctx, &url, &self.config).await?);
        let vector = extract_features(&target, &self.workers, SIGNAL_TIMEOUT).await;

        let phishing_pct = self.classifier.predict_probability(&vector)? * 100.0;

        let snapshot = self.whitelist.snapshot();
        let assessment = assess_red_flags(&self.ctx.extractor, &target, &snapshot);
        let (safe, phishing) = blend(phishing_pct, &assessment);

        let features = vector
            .iter_named()
            .map(|(name, signal)| FeatureReport {
                feature: name.to_string(),
                result: signal.verdict_word().to_string(),
                explanation: explanation(name, signal).to_string(),
            })
            .collect();

        let warnings = assessment.warnings();
        let warning = if warnings.is_empty() {
            None
        } else {
            Some(warnings.join("; "))
        };

        let result = DetectionResult {
            url,
            safe_percentage: safe,
            phishing_percentage: phishing,
            features,
            warning,
        };
        self.history.record(&result);
        Ok(result)
    }
}

//! Request and response payloads for the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/predict`.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// The URL to classify.
    pub url: Option<String>,
}

/// Body of `POST /api/v1/notify`.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    /// The message to forward.
    pub message: Option<String>,
}

/// Body of `POST /api/v1/whitelist`.
#[derive(Debug, Deserialize)]
pub struct WhitelistAddRequest {
    /// Domain to trust.
    pub domain: Option<String>,
    /// Optional note; defaults to a marker for API-added entries.
    pub description: Option<String>,
}

/// Uniform error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Uniform success payload for whitelist mutations.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

//! HTTP API handlers.
//!
//! Thin wrappers over the detection engine, the whitelist store, and the
//! notifier. Handlers translate outcomes into the JSON payloads and status
//! codes of the API; they hold no logic of their own.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error_handling::DetectError;
use crate::server::types::{
    ErrorResponse, MutationResponse, NotifyRequest, PredictRequest, WhitelistAddRequest,
};
use crate::server::AppState;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// `POST /api/v1/predict`
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Response {
    log::info!("Prediction request incoming");
    let Some(url) = request.url else {
        return error_response(StatusCode::BAD_REQUEST, "url is required");
    };

    match state.engine.detect(&url).await {
        Ok(result) => Json(result).into_response(),
        Err(DetectError::InvalidUrl(e)) => {
            error_response(StatusCode::BAD_REQUEST, format!("invalid url: {e}"))
        }
        Err(e) => {
            log::error!("Detection failed for {url}: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// `POST /api/v1/notify`
pub async fn notify(
    State(state): State<AppState>,
    Json(request): Json<NotifyRequest>,
) -> Response {
    let message = request
        .message
        .unwrap_or_else(|| "No message received".to_string());

    let Some(notifier) = state.notifier.as_ref() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "notifier is not configured (TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID)",
        );
    };

    match notifier.send(&message).await {
        Ok(response) => Json(json!({
            "status": "ok",
            "telegram_response": response,
        }))
        .into_response(),
        Err(e) => {
            log::warn!("Notification failed: {e}");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// `GET /api/v1/history`
pub async fn history(State(state): State<AppState>) -> Response {
    Json(state.engine.history().recent()).into_response()
}

/// `GET /api/v1/whitelist`
pub async fn whitelist_list(State(state): State<AppState>) -> Response {
    let snapshot = state.engine.whitelist().snapshot();
    Json(json!({
        "success": true,
        "data": snapshot.entries(),
        "count": snapshot.len(),
    }))
    .into_response()
}

/// `POST /api/v1/whitelist`
pub async fn whitelist_add(
    State(state): State<AppState>,
    Json(request): Json<WhitelistAddRequest>,
) -> Response {
    let Some(domain) = request.domain.filter(|d| !d.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "domain is required");
    };
    let description = request
        .description
        .unwrap_or_else(|| "Added via API".to_string());

    match state.engine.whitelist().add(&domain, &description) {
        Ok(added) => Json(MutationResponse {
            success: added,
            message: format!(
                "Domain {domain} {} whitelist",
                if added { "added to" } else { "already in" }
            ),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// `DELETE /api/v1/whitelist/{domain}`
pub async fn whitelist_remove(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Response {
    match state.engine.whitelist().remove(&domain) {
        Ok(removed) => Json(MutationResponse {
            success: removed,
            message: format!(
                "Domain {domain} {} whitelist",
                if removed {
                    "removed from"
                } else {
                    "not found in"
                }
            ),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// `POST /api/v1/whitelist/reload`
pub async fn whitelist_reload(State(state): State<AppState>) -> Response {
    match state.engine.whitelist().reload() {
        Ok(count) => Json(json!({
            "success": true,
            "message": format!("Whitelist reloaded ({count} domains)"),
        }))
        .into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

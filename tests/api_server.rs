//! HTTP API tests against a live in-process server.

use std::sync::Arc;

use serde_json::{json, Value};

use url_verdict::server::{build_router, AppState};
use url_verdict::{Config, DetectionEngine, LinearClassifier, FEATURE_COUNT};

async fn spawn_api() -> (u16, reqwest::Client) {
    let dir = tempfile::tempdir().unwrap();
    let classifier =
        Arc::new(LinearClassifier::from_parts(&[0.0; FEATURE_COUNT], 0.0).expect("model"));
    let config = Config {
        whitelist_path: dir.path().join("whitelist.csv"),
        fast_mode: true,
        ..Default::default()
    };
    std::mem::forget(dir);
    let engine =
        Arc::new(DetectionEngine::with_classifier(config, classifier).expect("engine"));

    let state = AppState {
        engine,
        notifier: None,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind api server");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (port, reqwest::Client::new())
}

#[tokio::test]
async fn test_predict_rejects_missing_url() {
    let (port, client) = spawn_api().await;

    let response = client
        .post(format!("http://127.0.0.1:{port}/api/v1/predict"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_predict_whitelisted_domain() {
    let (port, client) = spawn_api().await;

    let response = client
        .post(format!("http://127.0.0.1:{port}/api/v1/predict"))
        .json(&json!({"url": "https://google.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["safe_percentage"], 100.0);
    assert_eq!(body["phishing_percentage"], 0.0);
}

#[tokio::test]
async fn test_whitelist_crud_roundtrip() {
    let (port, client) = spawn_api().await;
    let base = format!("http://127.0.0.1:{port}/api/v1/whitelist");

    let listing: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(listing["success"], true);
    let initial_count = listing["count"].as_u64().unwrap();
    assert!(initial_count > 0);

    let added: Value = client
        .post(&base)
        .json(&json!({"domain": "Trusted.example/", "description": "test entry"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(added["success"], true);

    // Second insert of the same domain is rejected as a duplicate
    let duplicate: Value = client
        .post(&base)
        .json(&json!({"domain": "trusted.example"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(duplicate["success"], false);

    let removed: Value = client
        .delete(format!("{base}/trusted.example"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(removed["success"], true);

    let reloaded: Value = client
        .post(format!("{base}/reload"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reloaded["success"], true);

    let final_listing: Value =
        client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(final_listing["count"].as_u64().unwrap(), initial_count);
}

#[tokio::test]
async fn test_whitelist_add_requires_domain() {
    let (port, client) = spawn_api().await;

    let response = client
        .post(format!("http://127.0.0.1:{port}/api/v1/whitelist"))
        .json(&json!({"description": "no domain"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn test_history_reflects_predictions() {
    let (port, client) = spawn_api().await;

    let history: Vec<Value> = client
        .get(format!("http://127.0.0.1:{port}/api/v1/history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(history.is_empty());

    client
        .post(format!("http://127.0.0.1:{port}/api/v1/predict"))
        .json(&json!({"url": "https://google.com"}))
        .send()
        .await
        .unwrap();

    let history: Vec<Value> = client
        .get(format!("http://127.0.0.1:{port}/api/v1/history"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["safe_percentage"], 100.0);
}

#[tokio::test]
async fn test_notify_unconfigured_reports_unavailable() {
    let (port, client) = spawn_api().await;

    let response = client
        .post(format!("http://127.0.0.1:{port}/api/v1/notify"))
        .json(&json!({"message": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 503);
}

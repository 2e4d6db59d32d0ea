//! HTTP-level tests for the vacancy service.
//!
//! Binds the real router on an ephemeral port and exercises it with reqwest.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::task::JoinSet;
use vacancy_service::api::{self, AppState};
use vacancy_service::service::VacancyService;

async fn start_server(initial_stock: i64, cache_ttl: Duration) -> String {
    let service = Arc::new(VacancyService::new(initial_stock, cache_ttl));
    let app = api::router(AppState { service });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn cold_start_reports_full_stock() {
    let base = start_server(100, Duration::from_secs(1)).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/api/v1/available"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "qty": 100 }));
}

#[tokio::test]
async fn reserve_decrements_stock() {
    let base = start_server(100, Duration::ZERO).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/v1/reserve"))
        .json(&json!({ "qty": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["remaining"], 99);

    let available: serde_json::Value = client
        .get(format!("{base}/api/v1/available"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available["qty"], 99);
}

#[tokio::test]
async fn serial_drain_ends_with_declines() {
    let base = start_server(3, Duration::ZERO).await;
    let client = reqwest::Client::new();

    for expected_remaining in [2, 1, 0] {
        let body: serde_json::Value = client
            .post(format!("{base}/api/v1/reserve"))
            .json(&json!({ "qty": 1 }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["remaining"], expected_remaining);
    }

    // Exhausted stock declines with 200, not an error status.
    let resp = client
        .post(format!("{base}/api/v1/reserve"))
        .json(&json!({ "qty": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["remaining"], 0);
}

#[tokio::test]
async fn invalid_quantity_is_rejected_without_mutation() {
    let base = start_server(10, Duration::ZERO).await;
    let client = reqwest::Client::new();

    for qty in [0, -3] {
        let resp = client
            .post(format!("{base}/api/v1/reserve"))
            .json(&json!({ "qty": qty }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "invalid_quantity");
    }

    let available: serde_json::Value = client
        .get(format!("{base}/api/v1/available"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available["qty"], 10);
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let base = start_server(10, Duration::ZERO).await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({ "qty": "three" }), json!({ "qty": 1.5 })] {
        let resp = client
            .post(format!("{base}/api/v1/reserve"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "invalid_quantity");
    }
}

#[tokio::test]
async fn concurrent_reserves_never_oversell() {
    let base = start_server(100, Duration::ZERO).await;
    let client = reqwest::Client::new();

    let mut attempts = JoinSet::new();
    for _ in 0..200 {
        let client = client.clone();
        let url = format!("{base}/api/v1/reserve");
        attempts.spawn(async move {
            let resp = client.post(url).json(&json!({ "qty": 1 })).send().await.unwrap();
            assert_eq!(resp.status(), 200);
            let body: serde_json::Value = resp.json().await.unwrap();
            body["success"] == true
        });
    }

    let mut accepted = 0;
    while let Some(result) = attempts.join_next().await {
        if result.unwrap() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 100);

    let available: serde_json::Value = client
        .get(format!("{base}/api/v1/available"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(available["qty"], 0);
}

#[tokio::test]
async fn health_reports_service_name() {
    let base = start_server(1, Duration::ZERO).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("{base}/api/v1/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "status": "healthy", "service": "vacancy" }));
}

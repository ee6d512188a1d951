//! HTTP API tests

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use creator_valuation::config::Config;
use creator_valuation::server::{router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: &Config) -> Router {
    router(Arc::new(AppState::from_config(config).unwrap()))
}

async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let response = app(&Config::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_simulate_returns_offer() {
    let body = r#"{
        "manual_revenue": "100000",
        "use_public_data": false,
        "platforms": [],
        "conversion_factor": 0.005,
        "discount_rate": 10,
        "time_horizon": 5,
        "offer_factor": 50
    }"#;
    let (status, json) = post(app(&Config::default()), "/api/offer-modeling/simulate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["estimated_revenue"].as_f64(), Some(100_000.0));
    let npv = json["npv"].as_f64().unwrap();
    assert!((npv - 37_907.87).abs() < 0.01);
    let offer = json["recommended_offer"].as_f64().unwrap();
    assert!((offer - npv / 2.0).abs() < 1e-9);
    for scenario in ["high", "medium", "low"] {
        assert!(json["scenarios"][scenario]["npv"].is_number());
        assert!(json["scenarios"][scenario]["offer"].is_number());
    }
    assert!(json.get("token_sizing").is_none());
}

#[tokio::test]
async fn test_simulate_platform_estimate() {
    let body = r#"{
        "use_public_data": true,
        "platforms": [
            {"followers": 10000, "engagement_rate": 5},
            {"followers": 5000, "engagement_rate": 10, "weight": 2}
        ],
        "conversion_factor": 0.005,
        "discount_rate": 0,
        "time_horizon": 2,
        "offer_factor": 50,
        "revenue_share_percent": 100
    }"#;
    let (status, json) = post(app(&Config::default()), "/api/offer-modeling/simulate", body).await;

    assert_eq!(status, StatusCode::OK);
    // (500 + 1000) * 0.005
    assert!((json["estimated_revenue"].as_f64().unwrap() - 7.5).abs() < 1e-9);
    assert!((json["npv"].as_f64().unwrap() - 15.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_simulate_rejects_zero_horizon() {
    let body = r#"{"manual_revenue": 1000, "time_horizon": 0}"#;
    let (status, json) = post(app(&Config::default()), "/api/offer-modeling/simulate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().contains("time_horizon"));
}

#[tokio::test]
async fn test_simulate_accepts_integral_float_horizon() {
    let body = r#"{"manual_revenue": 100000, "discount_rate": 10, "time_horizon": 5.0}"#;
    let (status, json) = post(app(&Config::default()), "/api/offer-modeling/simulate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert!((json["npv"].as_f64().unwrap() - 37_907.87).abs() < 0.01);
}

#[tokio::test]
async fn test_simulate_rejects_out_of_range_discount_rate() {
    for rate in ["-50", "250"] {
        let body = format!(r#"{{"manual_revenue": 100000, "discount_rate": {}}}"#, rate);
        let (status, json) =
            post(app(&Config::default()), "/api/offer-modeling/simulate", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("discount_rate_percent"));
    }
}

#[tokio::test]
async fn test_simulate_rejects_malformed_body() {
    let (status, json) = post(
        app(&Config::default()),
        "/api/offer-modeling/simulate",
        "{not json",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_simulate_rejects_bad_manual_revenue() {
    let body = r#"{"manual_revenue": "a lot", "time_horizon": 5}"#;
    let (status, json) = post(app(&Config::default()), "/api/offer-modeling/simulate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("manual_revenue"));
}

#[tokio::test]
async fn test_monte_carlo_is_seeded() {
    let body = r#"{"manual_revenue": 100000, "time_horizon": 5, "iterations": 500, "seed": 9}"#;
    let config = Config::default();
    let (status, first) = post(app(&config), "/api/offer-modeling/monte-carlo", body).await;
    let (_, second) = post(app(&config), "/api/offer-modeling/monte-carlo", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["iterations"], 500);
    assert_eq!(first["seed"], 9);
    assert_eq!(first, second);
    let histogram: u64 = first["histogram"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(histogram, 500);
}

#[tokio::test]
async fn test_monte_carlo_caps_iterations() {
    let mut config = Config::default();
    config.monte_carlo.max_iterations = 100;
    let body = r#"{"manual_revenue": 100000, "time_horizon": 5, "iterations": 101}"#;
    let (status, json) = post(app(&config), "/api/offer-modeling/monte-carlo", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("100"));
}

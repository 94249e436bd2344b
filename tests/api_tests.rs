//! HTTP API tests against a live router on an ephemeral port.

use bizdays::calculator::{BusinessDayCalculator, CalculatorSettings};
use bizdays::holidays::{HolidayCache, HolidayProvider, MockHolidaySource};
use bizdays::server::build_router;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

struct TestApi {
    base_url: String,
    client: reqwest::Client,
    source: MockHolidaySource,
}

impl TestApi {
    async fn start() -> Self {
        let source = MockHolidaySource::new();
        source.add_holidays(2025, &["2025-11-20", "2025-12-25"]).await;

        let provider = HolidayProvider::new(Arc::new(source.clone()), HolidayCache::new());
        let calculator = BusinessDayCalculator::new(Arc::new(provider), CalculatorSettings::default());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(Arc::new(calculator)))
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            source,
        }
    }

    async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

#[tokio::test]
async fn test_health() {
    let api = TestApi::start().await;
    let response = api
        .client
        .get(format!("{}/health", api.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "Business Day Calculator API");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_calculate_success() {
    let api = TestApi::start().await;
    let (status, body) = api
        .post_json(
            "/calculate",
            json!({"startDate": "2025-12-24", "businessDays": 2}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {"startDate": "2025-12-24", "businessDays": 2, "endDate": "2025-12-26"}
        })
    );
}

#[tokio::test]
async fn test_legacy_endpoint_renames_fields() {
    let api = TestApi::start().await;
    let (status, body) = api
        .post_json("/calcular", json!({"dataInicial": "2025-11-21", "diasUteis": 2}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["startDate"], "2025-11-21");
    assert_eq!(body["data"]["endDate"], "2025-11-24");
}

#[tokio::test]
async fn test_missing_fields() {
    let api = TestApi::start().await;
    let (status, body) = api
        .post_json("/calculate", json!({"startDate": "2025-11-17"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["requiredFields"], json!(["startDate", "businessDays"]));

    let (status, _) = api
        .post_json(
            "/calcular",
            json!({"startDate": "2025-11-17", "businessDays": 2}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validation_errors() {
    let api = TestApi::start().await;

    for body in [
        json!({"startDate": "17-11-2025", "businessDays": 1}),
        json!({"startDate": "2025-11-17", "businessDays": -3}),
        json!({"startDate": "2025-11-17", "businessDays": 2.5}),
        json!({"startDate": "2025-02-30", "businessDays": 1}),
        json!({"startDate": "2025-01-02", "businessDays": 60000000}),
    ] {
        let (status, response) = api.post_json("/calculate", body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response["error"], "Validation Error", "{body}");
    }

    assert!(api.source.get_calls().await.is_empty());
}

#[tokio::test]
async fn test_invalid_json() {
    let api = TestApi::start().await;
    let response = api
        .client
        .post(format!("{}/calculate", api.base_url))
        .header("content-type", "application/json")
        .body("{\"startDate\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "Invalid JSON in request body");
}

#[tokio::test]
async fn test_unknown_route() {
    let api = TestApi::start().await;
    let response = api
        .client
        .get(format!("{}/calculate", api.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Route GET /calculate not found");
    assert_eq!(body["availableEndpoints"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upstream_failure_still_answers() {
    let api = TestApi::start().await;
    api.source.add_failure(2026, "timed out").await;

    let (status, body) = api
        .post_json(
            "/calculate",
            json!({"startDate": "2026-03-02", "businessDays": 5}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["endDate"], "2026-03-06");
}

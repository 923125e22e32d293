//! Integration tests for the annadata-api HTTP surface.
//!
//! Builds the full router around the builtin catalog and drives it with
//! `tower::ServiceExt::oneshot`, so every test runs through the same
//! middleware stack as production.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::Value;
use tower::ServiceExt;

use annadata_api::state::{AppConfig, AppState, Clock};
use annadata_catalog::SchemeCatalog;

/// The app as of noon UTC on 2025-09-29, one day before the
/// `namo-shetkari` deadline.
fn test_app() -> Router {
    let now = Utc.with_ymd_and_hms(2025, 9, 29, 12, 0, 0).unwrap();
    let catalog = SchemeCatalog::builtin().unwrap();
    annadata_api::app(AppState::with_catalog(
        AppConfig::default(),
        catalog,
        Clock::fixed(now),
    ))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: Router, uri: &str, body: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

fn scheme_ids(body: &Value) -> Vec<String> {
    body["schemes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_returns_ok() {
    let response = get(test_app(), "/health/liveness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn readiness_returns_ready() {
    let response = get(test_app(), "/health/readiness").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn metrics_count_requests_and_errors() {
    let app = test_app();
    let ok = get(app.clone(), "/v1/schemes").await;
    assert_eq!(ok.status(), StatusCode::OK);
    let missing = get(app.clone(), "/v1/schemes/no-such-scheme").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let body = body_json(get(app, "/health/metrics").await).await;
    assert_eq!(body["requests"], 2);
    assert_eq!(body["errors"], 1);
}

// -- Discovery ----------------------------------------------------------------

#[tokio::test]
async fn empty_query_lists_whole_catalog() {
    let body = body_json(get(test_app(), "/v1/schemes").await).await;
    assert_eq!(body["mode"], "discovery");
    assert_eq!(body["locale"], "en");
    assert_eq!(body["count"], 6);
    assert_eq!(
        scheme_ids(&body),
        [
            "pm-kisan",
            "pmfby",
            "soil-health-card",
            "kisan-credit-card",
            "namo-shetkari",
            "crop-residue-management",
        ]
    );
}

#[tokio::test]
async fn text_search_is_case_insensitive() {
    let body = body_json(get(test_app(), "/v1/schemes?q=KISAN").await).await;
    assert_eq!(scheme_ids(&body), ["pm-kisan", "kisan-credit-card"]);
    assert_eq!(body["announcement"], "2 schemes are available for you");
}

#[tokio::test]
async fn text_search_uses_active_locale_only() {
    let body = body_json(get(test_app(), "/v1/schemes?q=kisan&lang=hi").await).await;
    assert_eq!(body["count"], 0);

    let body = body_json(get(test_app(), "/v1/schemes?q=%E0%A4%95%E0%A4%BF%E0%A4%B8%E0%A4%BE%E0%A4%A8&lang=hi").await).await;
    assert_eq!(body["locale"], "hi");
    let ids = scheme_ids(&body);
    assert!(ids.contains(&"pm-kisan".to_string()));
    assert!(ids.contains(&"kisan-credit-card".to_string()));
    assert_eq!(body["schemes"][0]["name"], "पीएम-किसान योजना");
}

#[tokio::test]
async fn region_filter_keeps_nationwide_schemes() {
    let body = body_json(get(test_app(), "/v1/schemes?region=Punjab").await).await;
    let ids = scheme_ids(&body);
    assert_eq!(ids.len(), 5);
    assert!(ids.contains(&"crop-residue-management".to_string()));
    assert!(!ids.contains(&"namo-shetkari".to_string()));
}

#[tokio::test]
async fn crop_and_category_filters_combine() {
    let body = body_json(get(test_app(), "/v1/schemes?crop=Rice&category=subsidy").await).await;
    assert_eq!(
        scheme_ids(&body),
        ["pm-kisan", "namo-shetkari", "crop-residue-management"]
    );
}

#[tokio::test]
async fn unknown_category_is_ignored() {
    let body = body_json(get(test_app(), "/v1/schemes?category=grant").await).await;
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn sentinel_crops_render_as_all() {
    let body = body_json(get(test_app(), "/v1/schemes/pm-kisan").await).await;
    assert_eq!(body["crops"], serde_json::json!(["ALL"]));
    assert_eq!(body["region"], "ALL");
    assert_eq!(body["category"], "subsidy");
    assert_eq!(body["deadline"], "2024-03-31");
}

// -- Single Scheme ------------------------------------------------------------

#[tokio::test]
async fn get_scheme_in_hindi() {
    let response = get(test_app(), "/v1/schemes/pmfby?lang=hi").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "फसल बीमा योजना");
    assert_eq!(body["crops"], serde_json::json!(["Rice", "Wheat", "Cotton", "Sugarcane"]));
    assert!(body.get("deadline").is_none());
}

#[tokio::test]
async fn unknown_scheme_is_404() {
    let response = get(test_app(), "/v1/schemes/no-such-scheme").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// -- Facets -------------------------------------------------------------------

#[tokio::test]
async fn facets_list_named_values_only() {
    let body = body_json(get(test_app(), "/v1/facets").await).await;
    assert_eq!(body["regions"], serde_json::json!(["Maharashtra", "Punjab"]));
    assert_eq!(
        body["crops"],
        serde_json::json!(["Cotton", "Rice", "Sugarcane", "Wheat"])
    );
    assert_eq!(body["categories"].as_array().unwrap().len(), 4);
    assert_eq!(body["categories"][0]["value"], "subsidy");
}

// -- Eligibility --------------------------------------------------------------

#[tokio::test]
async fn large_landholding_excludes_smallholder_schemes() {
    let response = post_json(test_app(), "/v1/eligibility", r#"{"landholding": 3.5}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["mode"], "eligibility");
    assert_eq!(
        scheme_ids(&body),
        [
            "pmfby",
            "soil-health-card",
            "kisan-credit-card",
            "crop-residue-management",
        ]
    );
}

#[tokio::test]
async fn small_landholding_keeps_smallholder_schemes() {
    let response = post_json(
        test_app(),
        "/v1/eligibility",
        r#"{"region": "Maharashtra", "landholding": "1.5", "income": "1,20,000"}"#,
    )
    .await;
    let ids = scheme_ids(&body_json(response).await);
    assert!(ids.contains(&"pm-kisan".to_string()));
    assert!(ids.contains(&"namo-shetkari".to_string()));
    assert!(!ids.contains(&"crop-residue-management".to_string()));
}

#[tokio::test]
async fn eligibility_ignores_search_text() {
    let body = body_json(post_json(test_app(), "/v1/eligibility", r#"{"q": "insurance"}"#).await).await;
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn malformed_eligibility_body_is_400() {
    let response = post_json(test_app(), "/v1/eligibility", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// -- Alerts -------------------------------------------------------------------

#[tokio::test]
async fn alerts_sorted_by_severity_then_recency() {
    let body = body_json(get(test_app(), "/v1/alerts?region=Maharashtra").await).await;
    let ids: Vec<&str> = body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        [
            "weather-heavy-rain",
            "deadline-namo-shetkari",
            "scheme-pm-kisan-deadline",
        ]
    );
    assert_eq!(body["alerts"][1]["severity"], "high");
}

#[tokio::test]
async fn alerts_filtered_by_region() {
    let body = body_json(get(test_app(), "/v1/alerts?region=Punjab&lang=hi").await).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["locale"], "hi");
    assert_eq!(
        body["alerts"][0]["message"],
        "अगले 3 दिनों में भारी बारिश की संभावना"
    );
}

async fn namo_deadline(app: Router) -> Option<Value> {
    let body = body_json(get(app, "/v1/alerts?region=Maharashtra").await).await;
    body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == "deadline-namo-shetkari")
        .cloned()
}

#[tokio::test]
async fn deadline_alerts_follow_the_calendar_day() {
    let day = Arc::new(Mutex::new(Utc.with_ymd_and_hms(2025, 9, 20, 8, 0, 0).unwrap()));
    let clock = {
        let day = Arc::clone(&day);
        Clock::from_fn(move || *day.lock())
    };
    let state = AppState::with_catalog(
        AppConfig::default(),
        SchemeCatalog::builtin().unwrap(),
        clock,
    );
    let app = annadata_api::app(state);

    // Deadline is 2025-09-30, ten days out.
    assert!(namo_deadline(app.clone()).await.is_none());

    *day.lock() = Utc.with_ymd_and_hms(2025, 9, 25, 8, 0, 0).unwrap();
    let alert = namo_deadline(app.clone()).await.unwrap();
    assert_eq!(alert["severity"], "medium");
    assert!(alert["message"].as_str().unwrap().ends_with("last date in 5 days"));

    *day.lock() = Utc.with_ymd_and_hms(2025, 9, 29, 8, 0, 0).unwrap();
    let alert = namo_deadline(app.clone()).await.unwrap();
    assert_eq!(alert["severity"], "high");
    assert!(alert["message"].as_str().unwrap().ends_with("last date tomorrow"));

    *day.lock() = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();
    assert!(namo_deadline(app).await.is_none());
}

#[tokio::test]
async fn subscribe_then_resubscribe() {
    let app = test_app();
    let payload = r#"{"phone": "+91 98765 43210", "region": "Punjab", "lang": "hi"}"#;

    let first = post_json(app.clone(), "/v1/alerts/subscriptions", payload).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = body_json(first).await;
    assert_eq!(body["phone"], "******3210");
    assert_eq!(body["locale"], "hi");
    assert_eq!(body["created"], true);

    let second = post_json(app, "/v1/alerts/subscriptions", payload).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["created"], false);
}

#[tokio::test]
async fn subscribe_rejects_bad_phone() {
    let response = post_json(
        test_app(),
        "/v1/alerts/subscriptions",
        r#"{"phone": "12345"}"#,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
}

// -- News ---------------------------------------------------------------------

#[tokio::test]
async fn news_returns_first_headline() {
    let body = body_json(get(test_app(), "/v1/news").await).await;
    assert_eq!(body["index"], 0);
    assert_eq!(body["total"], 3);
    assert_eq!(body["rotation_secs"], 4);
    assert!(body["headline"].as_str().unwrap().starts_with("Monsoon forecast"));
}

#[tokio::test]
async fn news_in_hindi() {
    let body = body_json(get(test_app(), "/v1/news?lang=hi").await).await;
    assert_eq!(body["locale"], "hi");
    assert!(body["headline"].as_str().unwrap().starts_with("मानसून"));
}

//! Tests for cookiebar-geo: locators and the deadline race, against a local mock endpoint

use axum::{http::StatusCode, routing::get, Json, Router};
use cookiebar_core::JurisdictionVerdict;
use cookiebar_geo::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Serve a handful of geolocation behaviours on an ephemeral port.
async fn mock_geo_server() -> String {
    let app = Router::new()
        .route("/eu", get(|| async { Json(json!({"ip": "1.2.3.4", "country_code": "DE"})) }))
        .route("/us", get(|| async { Json(json!({"ip": "1.2.3.4", "country_code": "US"})) }))
        .route("/blank", get(|| async { Json(json!({"ip": "1.2.3.4", "country_code": ""})) }))
        .route("/missing", get(|| async { Json(json!({"ip": "1.2.3.4"})) }))
        .route("/garbage", get(|| async { "<html>not json</html>" }))
        .route("/down", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }))
        .route("/created", get(|| async { (StatusCode::CREATED, Json(json!({"country_code": "US"}))) }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"country_code": "US"}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn lookup_for(url: String) -> JurisdictionLookup {
    JurisdictionLookup::new(Arc::new(HttpLocator::new(url)))
}

// ===========================================================================
// HttpLocator
// ===========================================================================

#[tokio::test]
async fn http_locator_reads_country_code() {
    let base = mock_geo_server().await;
    let locator = HttpLocator::new(format!("{base}/eu"));
    assert_eq!(locator.name(), "http");
    assert_eq!(locator.country_code().await.unwrap(), "DE");
}

#[tokio::test]
async fn http_locator_non_200_is_status_error() {
    let base = mock_geo_server().await;
    let err = HttpLocator::new(format!("{base}/down")).country_code().await.unwrap_err();
    assert!(matches!(err, GeoError::Status(503)));

    let err = HttpLocator::new(format!("{base}/created")).country_code().await.unwrap_err();
    assert!(matches!(err, GeoError::Status(201)));
}

#[tokio::test]
async fn http_locator_bad_bodies_are_invalid_responses() {
    let base = mock_geo_server().await;
    for path in ["garbage", "missing", "blank"] {
        let err = HttpLocator::new(format!("{base}/{path}")).country_code().await.unwrap_err();
        assert!(matches!(err, GeoError::InvalidResponse(_)), "{path}: {err}");
    }
}

#[tokio::test]
async fn http_locator_unreachable_is_network_error() {
    // Port 9 (discard) on loopback is closed in test environments.
    let err = HttpLocator::new("http://127.0.0.1:9/json/").country_code().await.unwrap_err();
    assert!(matches!(err, GeoError::NetworkError(_)));
}

#[test]
fn http_locator_default_endpoint() {
    assert_eq!(HttpLocator::default().endpoint(), "https://freegeoip.app/json/");
}

// ===========================================================================
// JurisdictionLookup
// ===========================================================================

#[tokio::test]
async fn lookup_eu_country_must_prompt() {
    let base = mock_geo_server().await;
    assert_eq!(lookup_for(format!("{base}/eu")).determine(None).await, JurisdictionVerdict::MustPrompt);
}

#[tokio::test]
async fn lookup_other_country_needs_no_prompt() {
    let base = mock_geo_server().await;
    assert_eq!(
        lookup_for(format!("{base}/us")).determine(None).await,
        JurisdictionVerdict::NoPromptNeeded
    );
}

#[tokio::test]
async fn lookup_failure_is_unknown() {
    let base = mock_geo_server().await;
    assert_eq!(lookup_for(format!("{base}/down")).determine(None).await, JurisdictionVerdict::Unknown);
    assert_eq!(lookup_for(format!("{base}/garbage")).determine(None).await, JurisdictionVerdict::Unknown);
}

#[tokio::test]
async fn lookup_times_out() {
    let base = mock_geo_server().await;
    let lookup = lookup_for(format!("{base}/slow")).with_timeout(Duration::from_millis(100));
    let started = std::time::Instant::now();
    let err = lookup.country_code(None).await.unwrap_err();
    assert!(matches!(err, GeoError::Timeout(100)));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(lookup.determine(None).await, JurisdictionVerdict::Unknown);
}

#[tokio::test]
async fn lookup_default_timeout_is_1500ms() {
    let lookup = JurisdictionLookup::new(Arc::new(StaticLocator::new("FR")));
    assert_eq!(lookup.timeout(), Duration::from_millis(1500));
    assert_eq!(lookup.timeout_ms(), 1500);
}

#[test]
fn lookup_timeout_ms_saturates() {
    let lookup = JurisdictionLookup::new(Arc::new(StaticLocator::new("FR"))).with_timeout(Duration::MAX);
    assert_eq!(lookup.timeout_ms(), u64::MAX);
}

#[tokio::test]
async fn lookup_cancellation() {
    let base = mock_geo_server().await;
    let lookup = lookup_for(format!("{base}/slow"));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });
    let err = lookup.country_code(Some(cancel)).await.unwrap_err();
    assert!(matches!(err, GeoError::Cancelled));
}

#[tokio::test]
async fn static_locator_answers_immediately() {
    let lookup = JurisdictionLookup::new(Arc::new(StaticLocator::new("pt")));
    assert_eq!(lookup.country_code(None).await.unwrap(), "pt");
    assert_eq!(lookup.determine(None).await, JurisdictionVerdict::MustPrompt);
}

// ===========================================================================
// Error mapping
// ===========================================================================

#[test]
fn geo_error_maps_into_core_taxonomy() {
    let e: cookiebar_core::Error = GeoError::Timeout(1500).into();
    assert!(matches!(e, cookiebar_core::Error::NetworkTimeout { timeout_ms: 1500 }));
    let e: cookiebar_core::Error = GeoError::Status(500).into();
    assert!(matches!(e, cookiebar_core::Error::NonSuccessStatus { status: 500, .. }));
}

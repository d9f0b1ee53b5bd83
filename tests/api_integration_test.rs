// API integration tests that verify HTTP endpoints
// Drives the Axum router with in-process requests against an in-memory dataset

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use climate_api::api::create_router;
use climate_api::app::Application;
use common::{insert_measurement, insert_station, insert_tobs, test_pool};
use http_body_util::BodyExt; // For `.collect()`
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt; // For `oneshot`

/// Test fixture module for API tests
mod api_test_fixtures {
    use super::*;

    /// Two stations, USC00519281 being the most active
    pub async fn seed(pool: &SqlitePool) {
        insert_station(pool, "USC00519397").await;
        insert_station(pool, "USC00519281").await;

        insert_measurement(pool, "USC00519397", "2016-08-22", Some(9.9), Some(60.0)).await;
        insert_measurement(pool, "USC00519397", "2016-08-23", Some(0.0), Some(81.0)).await;
        insert_measurement(pool, "USC00519397", "2017-08-23", Some(0.0), Some(81.0)).await;

        insert_measurement(pool, "USC00519281", "2016-08-23", Some(1.79), Some(77.0)).await;
        insert_measurement(pool, "USC00519281", "2017-08-18", None, Some(79.0)).await;
        insert_measurement(pool, "USC00519281", "2017-08-18", Some(0.06), Some(76.0)).await;
        insert_measurement(pool, "USC00519281", "2017-08-23", Some(0.45), None).await;
        insert_tobs(pool, "USC00519281", "2016-08-20", 75.0).await;
    }
}

/// Helper to create test app with a seeded dataset
async fn create_test_app() -> (axum::Router, SqlitePool) {
    let pool = test_pool().await;
    api_test_fixtures::seed(&pool).await;

    let router = create_router(Application::state(pool.clone()));
    (router, pool)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_home_lists_routes() {
    let (app, _pool) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    for route in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/{start}",
        "/api/v1.0/{start}/{end}",
    ] {
        assert!(text.contains(route), "missing {route}");
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_precipitation_endpoint() {
    let (app, _pool) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1.0/precipitation")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(
        json,
        json!({
            "2016-08-23": 1.79,
            "2017-08-18": 0.06,
            "2017-08-23": 0.45
        })
    );
}

#[tokio::test]
async fn test_stations_endpoint() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!(["USC00519397", "USC00519281"]));
}

#[tokio::test]
async fn test_tobs_endpoint() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    // 2016-08-20 falls before the window; 2017-08-23 has no temperature
    assert_eq!(json, json!([77.0, 79.0]));
}

#[tokio::test]
async fn test_start_endpoint() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/2017-08-18").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["TMIN"], 76.0);
    assert_eq!(json["TMAX"], 81.0);
    assert_eq!(json["TAVG"], 78.66666666666667);
}

#[tokio::test]
async fn test_start_end_endpoint_inclusive() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/2016-08-22/2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"TMIN": 60.0, "TAVG": 72.66666666666667, "TMAX": 81.0}));
}

#[tokio::test]
async fn test_start_endpoint_no_matches_returns_nulls() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/2020-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"TMIN": null, "TAVG": null, "TMAX": null}));
}

#[tokio::test]
async fn test_reversed_range_returns_nulls() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/2017-08-23/2016-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"TMIN": null, "TAVG": null, "TMAX": null}));
}

#[tokio::test]
async fn test_malformed_start_is_bad_request() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/last-week").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_date_format");
}

#[tokio::test]
async fn test_malformed_end_is_bad_request() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = get(app, "/api/v1.0/2017-01-01/2017-02-30").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_date_format");
}

#[tokio::test]
async fn test_empty_dataset_is_server_error() {
    let pool = test_pool().await;
    let app = create_router(Application::state(pool));

    let (status, json) = get(app.clone(), "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "empty_dataset");

    let (status, _) = get(app, "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_responses_are_byte_identical_across_calls() {
    let (app, _pool) = create_test_app().await;

    for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs", "/api/v1.0/2016-08-23"] {
        let first = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        let second = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();

        assert_eq!(first, second, "{uri}");
    }
}

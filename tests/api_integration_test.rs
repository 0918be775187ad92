// API integration tests that verify HTTP endpoints
// Tests the Axum router in-process with real HTTP requests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt; // For `.collect()`
use serde_json::{json, Value};
use temperature_grid::api::{create_router, AppState};
use temperature_grid::grid::GridStore;
use temperature_grid::services::GridService;
use tower::ServiceExt; // For `oneshot`

/// Router over a fresh grid seeded with the sample records
fn create_test_app() -> (axum::Router, GridService) {
    let mut grid = GridStore::new(&["Delhi", "Mumbai", "Chennai"], 2022, 2024).unwrap();
    grid.populate_sample_data();
    let grid_service = GridService::new(grid);

    let state = AppState {
        grid_service: grid_service.clone(),
    };
    (create_router(state), grid_service)
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();
    let (status, json) = send(app, get("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_get_reading_success() {
    let (app, _) = create_test_app();
    let (status, json) = send(app, get("/api/v1/readings/delhi/2022")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["city"], "delhi");
    assert_eq!(json["year"], 2022);
    assert_eq!(json["temperature"], 25.5);
}

#[tokio::test]
async fn test_get_reading_not_found() {
    let (app, _) = create_test_app();

    let (status, _) = send(app.clone(), get("/api/v1/readings/Chennai/2022")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app.clone(), get("/api/v1/readings/Delhi/1999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app, get("/api/v1/readings/Kolkata/2022")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_reading_bad_year() {
    let (app, _) = create_test_app();
    let (status, _) = send(app, get("/api/v1/readings/Delhi/next-year")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insert_reading() {
    let (app, service) = create_test_app();
    let body = json!({"date": "15/07/2024", "city": "Mumbai", "temperature": 33.4});

    let (status, json) = send(app, json_request("POST", "/api/v1/readings", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "applied");
    assert_eq!(service.retrieve("Mumbai", 2024).await, Some(33.4));
}

#[tokio::test]
async fn test_insert_out_of_range_is_ignored() {
    let (app, service) = create_test_app();
    let body = json!({"date": "15/07/2030", "city": "Mumbai", "temperature": 33.4});

    let (status, json) = send(app, json_request("POST", "/api/v1/readings", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "ignored");
    assert_eq!(service.sparse().await.total_entries, 5);
}

#[tokio::test]
async fn test_insert_malformed_date() {
    let (app, _) = create_test_app();
    let body = json!({"date": "2024-07-15", "city": "Mumbai", "temperature": 33.4});

    let (status, _) = send(app, json_request("POST", "/api/v1/readings", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_reading() {
    let (app, _) = create_test_app();
    let body = json!({"date": "01/01/2022", "city": "Delhi"});

    let (status, json) = send(
        app.clone(),
        json_request("DELETE", "/api/v1/readings", body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "applied");

    let (status, _) = send(app.clone(), get("/api/v1/readings/Delhi/2022")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(app, get("/api/v1/grid/sparse")).await;
    assert_eq!(json["total_entries"], 4);
}

#[tokio::test]
async fn test_row_major_view() {
    let (app, _) = create_test_app();
    let (status, json) = send(app, get("/api/v1/grid/row-major")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cities"], json!(["Delhi", "Mumbai", "Chennai"]));
    assert_eq!(json["rows"][0]["year"], 2022);
    assert_eq!(json["rows"][0]["values"], json!([25.5, 30.2, null]));
    assert_eq!(json["rows"][2]["values"], json!([null, null, 29.9]));
    assert!(json["generated_at"].is_string());
}

#[tokio::test]
async fn test_column_major_view() {
    let (app, _) = create_test_app();
    let (status, json) = send(app, get("/api/v1/grid/column-major")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["years"], json!([2022, 2023, 2024]));
    assert_eq!(json["columns"][1]["city"], "Mumbai");
    assert_eq!(json["columns"][1]["values"], json!([30.2, 31.1, null]));
}

#[tokio::test]
async fn test_sparse_view() {
    let (app, _) = create_test_app();
    let (status, json) = send(app, get("/api/v1/grid/sparse")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_entries"], 5);
    assert_eq!(
        json["entries"][4],
        json!({"year": 2024, "city": "Chennai", "temperature": 29.9})
    );
}

#[tokio::test]
async fn test_complexity_endpoint() {
    let (app, _) = create_test_app();
    let (status, json) = send(app, get("/api/v1/complexity")).await;

    assert_eq!(status, StatusCode::OK);
    let operations = json["operations"].as_array().unwrap();
    assert_eq!(operations.len(), 6);
    assert_eq!(
        operations[3],
        json!({"operation": "Row-Major Traversal", "time": "O(n*m)", "space": "O(1)"})
    );
}

#[test]
fn test_openapi_spec_lists_routes() {
    let spec = temperature_grid::api::generate_openapi_spec();
    let paths: Vec<&String> = spec.paths.paths.keys().collect();

    assert!(paths.iter().any(|p| *p == "/api/v1/readings"));
    assert!(paths.iter().any(|p| *p == "/api/v1/readings/{city}/{year}"));
    assert!(paths.iter().any(|p| *p == "/api/v1/grid/sparse"));
    assert_eq!(paths.len(), 7);
}

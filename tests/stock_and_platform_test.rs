mod common;

use axum::http::{Method, Request};
use axum::body::Body;
use common::{response_json, TestApp};
use tower::ServiceExt;

#[tokio::test]
async fn stock_listing_carries_names() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::GET, "/api/v1/stock?limit=10", None)
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["total"], 5);
    let items = body["data"]["items"].as_array().unwrap();
    assert!(items
        .iter()
        .all(|row| row["product_name"].is_string() && row["warehouse_name"].is_string()));
}

#[tokio::test]
async fn single_stock_row_by_pair() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v1/stock/2/3", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["quantity"], 45);
    assert_eq!(body["data"]["warehouse_name"], "West Coast Hub");

    let (status, body) = app.call(Method::GET, "/api/v1/stock/3/1", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn oversized_page_is_clamped() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::GET, "/api/v1/stock?limit=100000", None)
        .await;

    assert_eq!(status, 200);
    assert_eq!(
        body["data"]["limit"].as_u64().unwrap(),
        app.state.config.api_max_page_size
    );
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::new().await;
    let router = inventory_api::build_router(app.state.clone());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/products/999")
                .header("x-request-id", "trace-me-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me-1"
    );
    let body = response_json(response).await;
    assert_eq!(body["request_id"], "trace-me-1");
}

#[tokio::test]
async fn generated_request_id_is_returned() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/status", None).await;

    assert!(response.headers().contains_key("x-request-id"));
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["environment"], "test");
}

#[tokio::test]
async fn health_reports_database() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["checks"]["database"], "healthy");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::GET, "/api-docs/openapi.json", None)
        .await;

    assert_eq!(status, 200);
    assert!(body["paths"]["/api/v1/shipments"].is_object());
    assert!(body["paths"]["/api/v1/stock/{product_id}/{warehouse_id}"].is_object());
}

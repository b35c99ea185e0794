mod common;

use axum::http::{Method, StatusCode};
use common::{money, TestApp};
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn seeded_products_are_listed_with_paging() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::GET, "/api/v1/products?page=1&limit=2", None)
        .await;

    assert_eq!(status, 200);
    let data = &body["data"];
    assert_eq!(data["total"], 3);
    assert_eq!(data["limit"], 2);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_trims_text_and_rounds_price() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/products",
            Some(json!({
                "name": "  Monitor  ",
                "description": "   ",
                "unit_price": "149.5",
                "category": "Electronics",
                "sku": " MON001 "
            })),
        )
        .await;

    assert_eq!(status, 201, "{}", body);
    let product = &body["data"];
    assert_eq!(product["name"], "Monitor");
    assert!(product["description"].is_null());
    assert_eq!(product["sku"], "MON001");
    assert_eq!(money(&product["unit_price"]), dec!(149.50));

    let id = product["id"].as_i64().unwrap();
    let (status, fetched) = app
        .call(Method::GET, &format!("/api/v1/products/{}", id), None)
        .await;
    assert_eq!(status, 200);
    assert_eq!(fetched["data"]["name"], "Monitor");
    assert_eq!(fetched["data"]["stock"], json!([]));
}

#[tokio::test]
async fn invalid_product_reports_field_errors() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "", "unit_price": "0.00" })),
        )
        .await;

    assert_eq!(status, 400);
    assert!(body["field_errors"]["name"].is_array());
    assert!(body["field_errors"]["unit_price"].is_array());
}

#[tokio::test]
async fn duplicate_sku_conflicts() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Another laptop", "unit_price": "10.00", "sku": "LAP123" })),
        )
        .await;

    assert_eq!(status, 409, "{}", body);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::PUT,
            "/api/v1/products/3",
            Some(json!({ "name": "Office Chair", "unit_price": "250.00" })),
        )
        .await;

    assert_eq!(status, 200, "{}", body);
    let product = &body["data"];
    assert_eq!(product["id"], 3);
    assert_eq!(product["name"], "Office Chair");
    assert!(product["category"].is_null());
    assert!(product["sku"].is_null());
    assert_eq!(money(&product["unit_price"]), dec!(250.00));
}

#[tokio::test]
async fn update_of_missing_product_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::PUT,
            "/api/v1/products/999",
            Some(json!({ "name": "Ghost", "unit_price": "1.00" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_details_include_stock_with_warehouse_names() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v1/products/1", None).await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["name"], "Laptop");
    let stock = body["data"]["stock"].as_array().unwrap();
    assert_eq!(stock.len(), 2);
    assert!(stock
        .iter()
        .any(|row| row["warehouse_name"] == "Main Warehouse" && row["quantity"] == 50));

    let (status, rows) = app
        .call(Method::GET, "/api/v1/products/1/stock", None)
        .await;
    assert_eq!(status, 200);
    assert_eq!(rows["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = TestApp::new().await;

    let (status, created) = app
        .call(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Cable", "unit_price": "4.99" })),
        )
        .await;
    assert_eq!(status, 201);
    let uri = format!("/api/v1/products/{}", created["data"]["id"]);

    let (status, first) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(status, 200);
    assert_eq!(first["data"]["deleted"], true);

    let (status, second) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(status, 200);
    assert_eq!(second["data"]["deleted"], false);

    let response = app.request(Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_with_shipments_cannot_be_deleted() {
    let app = TestApp::new().await;

    let (status, _) = app.call(Method::DELETE, "/api/v1/products/1", None).await;

    assert_eq!(status, 409);
    assert_eq!(app.stock_quantity(1, 1).await, Some(50));
}

#[tokio::test]
async fn deleting_product_removes_its_stock_rows() {
    let app = TestApp::new().await;

    let (_, created) = app
        .call(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Lamp", "unit_price": "20.00" })),
        )
        .await;
    let product_id = created["data"]["id"].as_i64().unwrap();

    let (status, shipment) = app
        .call(
            Method::POST,
            "/api/v1/shipments",
            Some(json!({
                "supplier_id": 2,
                "product_id": product_id,
                "warehouse_id": 1,
                "quantity": 4,
                "shipment_date": "2024-03-01T10:00:00Z"
            })),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(app.stock_quantity(product_id as i32, 1).await, Some(4));

    let product_uri = format!("/api/v1/products/{}", product_id);
    let (status, _) = app.call(Method::DELETE, &product_uri, None).await;
    assert_eq!(status, 409);

    let shipment_uri = format!("/api/v1/shipments/{}", shipment["data"]["shipment"]["id"]);
    let (status, _) = app.call(Method::DELETE, &shipment_uri, None).await;
    assert_eq!(status, 200);
    // Removing the shipment leaves stock alone.
    assert_eq!(app.stock_quantity(product_id as i32, 1).await, Some(4));

    let (status, body) = app.call(Method::DELETE, &product_uri, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], true);
    assert_eq!(app.stock_quantity(product_id as i32, 1).await, None);

    // Shipments against the removed product are rejected.
    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/shipments",
            Some(json!({
                "supplier_id": 2,
                "product_id": product_id,
                "warehouse_id": 1,
                "quantity": 1,
                "shipment_date": "2024-03-02T10:00:00Z",
                "total_cost": "5.00"
            })),
        )
        .await;
    assert_eq!(status, 409);
}

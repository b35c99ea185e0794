mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use common::{money, TestApp};
use inventory_api::{
    errors::ServiceError,
    services::stock_ledger::{StockChange, StockLedger},
};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use sea_orm::DatabaseTransaction;
use serde_json::{json, Value};

struct FailingLedger;

#[async_trait]
impl StockLedger for FailingLedger {
    async fn apply_shipment(
        &self,
        _txn: &DatabaseTransaction,
        _product_id: i32,
        _warehouse_id: i32,
        _quantity_delta: i32,
    ) -> Result<StockChange, ServiceError> {
        Err(ServiceError::InternalError("ledger unavailable".into()))
    }
}

fn shipment(product_id: i32, warehouse_id: i32, quantity: i32) -> Value {
    json!({
        "supplier_id": 1,
        "product_id": product_id,
        "warehouse_id": warehouse_id,
        "quantity": quantity,
        "shipment_date": "2024-05-01T08:30:00Z",
        "total_cost": "1.00"
    })
}

async fn shipment_total(app: &TestApp) -> i64 {
    let (_, body) = app.call(Method::GET, "/api/v1/shipments", None).await;
    body["data"]["total"].as_i64().unwrap()
}

#[tokio::test]
async fn cost_is_derived_from_unit_price() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::POST, "/api/v1/shipments", Some(shipment(1, 1, 2)))
        .await;

    assert_eq!(status, 201, "{}", body);
    let data = &body["data"];
    assert_eq!(money(&data["shipment"]["total_cost"]), dec!(1999.98));
    assert_eq!(data["stock"]["previous_quantity"], 50);
    assert_eq!(data["stock"]["quantity"], 52);
    assert_eq!(app.stock_quantity(1, 1).await, Some(52));
}

#[tokio::test]
async fn first_shipment_to_a_pair_creates_the_stock_row() {
    let app = TestApp::new().await;
    assert_eq!(app.stock_quantity(1, 3).await, None);

    let (status, body) = app
        .call(Method::POST, "/api/v1/shipments", Some(shipment(1, 3, 7)))
        .await;

    assert_eq!(status, 201, "{}", body);
    assert!(body["data"]["stock"]["previous_quantity"].is_null());
    assert_eq!(app.stock_quantity(1, 3).await, Some(7));

    let (_, rows) = app.call(Method::GET, "/api/v1/products/1/stock", None).await;
    assert_eq!(rows["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn invalid_quantity_is_rejected_without_side_effects() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::POST, "/api/v1/shipments", Some(shipment(1, 1, 0)))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["field_errors"]["quantity"][0], "Quantity must be at least 1");
    assert_eq!(app.stock_quantity(1, 1).await, Some(50));
    assert_eq!(shipment_total(&app).await, 3);
}

#[tokio::test]
async fn unknown_references_conflict() {
    let app = TestApp::new().await;

    let (status, _) = app
        .call(Method::POST, "/api/v1/shipments", Some(shipment(1, 42, 3)))
        .await;

    assert_eq!(status, 409);
    assert_eq!(shipment_total(&app).await, 3);
    assert_eq!(app.stock_quantity(1, 42).await, None);
}

#[tokio::test]
async fn ledger_failure_rolls_back_the_shipment() {
    let app = TestApp::with_ledger(Arc::new(FailingLedger)).await;

    let (status, _) = app
        .call(Method::POST, "/api/v1/shipments", Some(shipment(1, 1, 5)))
        .await;

    assert_eq!(status, 500);
    assert_eq!(shipment_total(&app).await, 3);
    assert_eq!(app.stock_quantity(1, 1).await, Some(50));
}

#[tokio::test]
async fn listing_is_newest_first_with_names() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v1/shipments", None).await;

    assert_eq!(status, 200);
    let items = body["data"]["items"].as_array().unwrap();
    let ids: Vec<i64> = items.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(items[0]["supplier_name"], "Office Furniture Co.");
    assert_eq!(items[0]["product_name"], "Desk Chair");
    assert_eq!(items[0]["warehouse_name"], "East Coast Hub");

    let (status, single) = app.call(Method::GET, "/api/v1/shipments/2", None).await;
    assert_eq!(status, 200);
    assert_eq!(single["data"]["product_name"], "Smartphone");
    assert_eq!(money(&single["data"]["total_cost"]), dec!(10499.85));
}

#[tokio::test]
async fn edit_recomputes_cost_but_leaves_stock_alone() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::PUT, "/api/v1/shipments/1", Some(shipment(1, 1, 25)))
        .await;

    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["quantity"], 25);
    assert_eq!(money(&body["data"]["total_cost"]), dec!(24999.75));
    assert_eq!(app.stock_quantity(1, 1).await, Some(50));
}

#[tokio::test]
async fn edit_with_reconciliation_applies_the_difference() {
    let app = TestApp::with_config(|cfg| cfg.reconcile_stock_on_shipment_edit = true).await;

    let (status, _) = app
        .call(Method::PUT, "/api/v1/shipments/1", Some(shipment(1, 1, 25)))
        .await;
    assert_eq!(status, 200);
    assert_eq!(app.stock_quantity(1, 1).await, Some(55));

    // Moving the shipment takes it out of the old pair and into the new one.
    let (status, _) = app
        .call(Method::PUT, "/api/v1/shipments/1", Some(shipment(1, 2, 25)))
        .await;
    assert_eq!(status, 200);
    assert_eq!(app.stock_quantity(1, 1).await, Some(30));
    assert_eq!(app.stock_quantity(1, 2).await, Some(55));
}

#[tokio::test]
async fn edit_of_missing_shipment_is_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app
        .call(Method::PUT, "/api/v1/shipments/404", Some(shipment(1, 1, 1)))
        .await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn delete_keeps_stock_and_tolerates_repeats() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::DELETE, "/api/v1/shipments/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], true);
    assert_eq!(app.stock_quantity(1, 1).await, Some(50));

    let (status, body) = app.call(Method::DELETE, "/api/v1/shipments/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["deleted"], false);

    let (status, _) = app.call(Method::GET, "/api/v1/shipments/1", None).await;
    assert_eq!(status, 404);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn stock_equals_sum_of_received_quantities(quantities in prop::collection::vec(1i32..500, 1..6)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (final_quantity, expected) = runtime.block_on(async {
            let app = TestApp::new().await;
            for quantity in &quantities {
                let (status, _) = app
                    .call(Method::POST, "/api/v1/shipments", Some(shipment(3, 1, *quantity)))
                    .await;
                assert_eq!(status, 201);
            }
            let expected: i64 = quantities.iter().map(|q| i64::from(*q)).sum();
            (app.stock_quantity(3, 1).await, expected)
        });

        prop_assert_eq!(final_quantity, Some(expected));
    }
}

//! Inventory API Library
//!
//! Products, warehouses, suppliers, per-warehouse stock levels, and inbound
//! shipments that update stock.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod telemetry;
pub mod validation;

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

// Common response wrappers
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: telemetry::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Converts the items while keeping the paging figures.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response = telemetry::scope_request_id(telemetry::RequestId::new("meta-123"), async {
            ApiResponse::success("ok")
        })
        .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_includes_request_metadata() {
        let response = telemetry::scope_request_id(telemetry::RequestId::new("meta-err"), async {
            ApiResponse::<()>::error("oops".into())
        })
        .await;

        assert!(!response.success);
        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-err"));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 41, 1, 20);
        assert_eq!(page.total_pages, 3);
        assert_eq!(PaginatedResponse::<i32>::new(vec![], 0, 1, 20).total_pages, 0);
    }

    #[test]
    fn map_keeps_paging_figures() {
        let page = PaginatedResponse::new(vec![1, 2], 12, 2, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!((page.total, page.page, page.limit, page.total_pages), (12, 2, 2, 6));
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

pub fn api_v1_routes() -> Router<AppState> {
    use handlers::{products, shipments, stock, suppliers, warehouses};

    let products = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/:id/stock", get(products::get_product_stock));

    let warehouses = Router::new()
        .route(
            "/warehouses",
            get(warehouses::list_warehouses).post(warehouses::create_warehouse),
        )
        .route(
            "/warehouses/:id",
            get(warehouses::get_warehouse)
                .put(warehouses::update_warehouse)
                .delete(warehouses::delete_warehouse),
        )
        .route(
            "/warehouses/:id/stock",
            get(warehouses::get_warehouse_stock),
        );

    let suppliers = Router::new()
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::create_supplier),
        )
        .route(
            "/suppliers/:id",
            get(suppliers::get_supplier)
                .put(suppliers::update_supplier)
                .delete(suppliers::delete_supplier),
        );

    let shipments = Router::new()
        .route(
            "/shipments",
            get(shipments::list_shipments).post(shipments::create_shipment),
        )
        .route(
            "/shipments/:id",
            get(shipments::get_shipment)
                .put(shipments::update_shipment)
                .delete(shipments::delete_shipment),
        );

    let stock = Router::new()
        .route("/stock", get(stock::list_stock))
        .route("/stock/:product_id/:warehouse_id", get(stock::get_stock));

    Router::new()
        // Status and health endpoints
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        .merge(products)
        .merge(warehouses)
        .merge(suppliers)
        .merge(shipments)
        .merge(stock)
}

/// Full application router without CORS, which depends on deployment config.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1_routes())
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .layer(telemetry::configure_http_tracing())
        .layer(CompressionLayer::new())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .with_state(state)
}

async fn api_status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let status_data = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "environment": state.config.environment,
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, errors::ServiceError> {
    let db_status = match db::check_connection(&state.db).await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

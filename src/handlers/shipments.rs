use super::common::{created, ok, Created, PaginationParams};
use crate::{
    commands::{
        shipments::{ShipmentInput, ShipmentReceipt},
        DeleteResult,
    },
    entities::shipment,
    errors::ServiceError,
    services::shipments::ShipmentDetails,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::extract::{Json, Path, Query, State};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShipmentResponse {
    pub id: i32,
    pub supplier_id: i32,
    pub product_id: i32,
    pub warehouse_id: i32,
    pub quantity: i32,
    pub shipment_date: DateTime<Utc>,
    /// Always `unit_price * quantity` when the product exists
    #[schema(example = "1999.98")]
    pub total_cost: Decimal,
}

impl From<shipment::Model> for ShipmentResponse {
    fn from(model: shipment::Model) -> Self {
        Self {
            id: model.id,
            supplier_id: model.supplier_id,
            product_id: model.product_id,
            warehouse_id: model.warehouse_id,
            quantity: model.quantity,
            shipment_date: model.shipment_date,
            total_cost: model.total_cost.round_dp(2),
        }
    }
}

/// Stock row as left by a shipment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockLevel {
    pub product_id: i32,
    pub warehouse_id: i32,
    /// `null` when the shipment created the row
    pub previous_quantity: Option<i32>,
    pub quantity: i32,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShipmentCreatedResponse {
    pub shipment: ShipmentResponse,
    pub stock: StockLevel,
}

impl From<ShipmentReceipt> for ShipmentCreatedResponse {
    fn from(receipt: ShipmentReceipt) -> Self {
        Self {
            stock: StockLevel {
                product_id: receipt.stock.product_id,
                warehouse_id: receipt.stock.warehouse_id,
                previous_quantity: receipt.previous_quantity,
                quantity: receipt.stock.quantity,
                last_updated: receipt.stock.last_updated,
            },
            shipment: receipt.shipment.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/shipments",
    params(PaginationParams),
    responses(
        (status = 200, description = "Shipments listed, newest first", body = ApiResponse<PaginatedResponse<ShipmentDetails>>)
    ),
    tag = "shipments"
)]
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<ShipmentDetails>> {
    let (page, limit) = params.resolve(&state.config);
    Ok(ok(state.services.shipments.list_shipments(page, limit).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/shipments/{id}",
    params(("id" = i32, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment fetched", body = ApiResponse<ShipmentDetails>),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ShipmentDetails> {
    Ok(ok(state.services.shipments.get_shipment(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/shipments",
    request_body = ShipmentInput,
    responses(
        (status = 201, description = "Shipment recorded and stock updated", body = ApiResponse<ShipmentCreatedResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 409, description = "Unknown supplier, product or warehouse", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(payload): Json<ShipmentInput>,
) -> Result<Created<ShipmentCreatedResponse>, ServiceError> {
    let receipt = state.services.shipments.create_shipment(payload).await?;
    Ok(created(receipt.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/shipments/{id}",
    params(("id" = i32, Path, description = "Shipment ID")),
    request_body = ShipmentInput,
    responses(
        (status = 200, description = "Shipment updated, total cost recomputed", body = ApiResponse<ShipmentResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Unknown supplier, product or warehouse", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ShipmentInput>,
) -> ApiResult<ShipmentResponse> {
    let shipment = state
        .services
        .shipments
        .update_shipment(id, payload)
        .await?;
    Ok(ok(shipment.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/shipments/{id}",
    params(("id" = i32, Path, description = "Shipment ID")),
    responses(
        (status = 200, description = "Shipment deleted or already absent", body = ApiResponse<DeleteResult>)
    ),
    tag = "shipments"
)]
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<DeleteResult> {
    Ok(ok(state.services.shipments.delete_shipment(id).await?))
}

use super::common::{created, ok, Created, PaginationParams};
use crate::{
    commands::{warehouses::WarehouseInput, DeleteResult},
    entities::warehouse,
    errors::ServiceError,
    services::stock::StockView,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::extract::{Json, Path, Query, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarehouseResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub storage_capacity: i32,
}

impl From<warehouse::Model> for WarehouseResponse {
    fn from(model: warehouse::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location: model.location,
            storage_capacity: model.storage_capacity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WarehouseDetailsResponse {
    #[serde(flatten)]
    pub warehouse: WarehouseResponse,
    pub stock: Vec<StockView>,
}

#[utoipa::path(
    get,
    path = "/api/v1/warehouses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Warehouses listed", body = ApiResponse<PaginatedResponse<WarehouseResponse>>)
    ),
    tag = "warehouses"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<WarehouseResponse>> {
    let (page, limit) = params.resolve(&state.config);
    let warehouses = state.services.warehouses.list_warehouses(page, limit).await?;
    Ok(ok(warehouses.map(WarehouseResponse::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse with its stock rows", body = ApiResponse<WarehouseDetailsResponse>),
        (status = 404, description = "Warehouse not found", body = crate::errors::ErrorResponse)
    ),
    tag = "warehouses"
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<WarehouseDetailsResponse> {
    let (warehouse, stock) = state.services.warehouses.get_warehouse_details(id).await?;
    Ok(ok(WarehouseDetailsResponse {
        warehouse: warehouse.into(),
        stock,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/warehouses",
    request_body = WarehouseInput,
    responses(
        (status = 201, description = "Warehouse created", body = ApiResponse<WarehouseResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse)
    ),
    tag = "warehouses"
)]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<WarehouseInput>,
) -> Result<Created<WarehouseResponse>, ServiceError> {
    let warehouse = state.services.warehouses.create_warehouse(payload).await?;
    Ok(created(warehouse.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    request_body = WarehouseInput,
    responses(
        (status = 200, description = "Warehouse updated", body = ApiResponse<WarehouseResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Warehouse not found", body = crate::errors::ErrorResponse)
    ),
    tag = "warehouses"
)]
pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<WarehouseInput>,
) -> ApiResult<WarehouseResponse> {
    let warehouse = state
        .services
        .warehouses
        .update_warehouse(id, payload)
        .await?;
    Ok(ok(warehouse.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/warehouses/{id}",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Warehouse deleted or already absent", body = ApiResponse<DeleteResult>),
        (status = 409, description = "Warehouse is referenced by shipments", body = crate::errors::ErrorResponse)
    ),
    tag = "warehouses"
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<DeleteResult> {
    Ok(ok(state.services.warehouses.delete_warehouse(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/warehouses/{id}/stock",
    params(("id" = i32, Path, description = "Warehouse ID")),
    responses(
        (status = 200, description = "Stock held in the warehouse", body = ApiResponse<Vec<StockView>>),
        (status = 404, description = "Warehouse not found", body = crate::errors::ErrorResponse)
    ),
    tag = "warehouses"
)]
pub async fn get_warehouse_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<StockView>> {
    Ok(ok(state.services.stock.stock_for_warehouse(id).await?))
}

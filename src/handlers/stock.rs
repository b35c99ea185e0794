use super::common::{ok, PaginationParams};
use crate::{services::stock::StockView, ApiResponse, ApiResult, AppState, PaginatedResponse};
use axum::extract::{Path, Query, State};

#[utoipa::path(
    get,
    path = "/api/v1/stock",
    params(PaginationParams),
    responses(
        (status = 200, description = "All stock rows with product and warehouse names", body = ApiResponse<PaginatedResponse<StockView>>)
    ),
    tag = "stock"
)]
pub async fn list_stock(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<StockView>> {
    let (page, limit) = params.resolve(&state.config);
    Ok(ok(state.services.stock.list_stock(page, limit).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/stock/{product_id}/{warehouse_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("warehouse_id" = i32, Path, description = "Warehouse ID")
    ),
    responses(
        (status = 200, description = "Stock row for the pair", body = ApiResponse<StockView>),
        (status = 404, description = "No stock row for the pair", body = crate::errors::ErrorResponse)
    ),
    tag = "stock"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path((product_id, warehouse_id)): Path<(i32, i32)>,
) -> ApiResult<StockView> {
    Ok(ok(state
        .services
        .stock
        .get_stock(product_id, warehouse_id)
        .await?))
}

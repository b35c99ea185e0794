use super::common::{created, ok, Created, PaginationParams};
use crate::{
    commands::{products::ProductInput, DeleteResult},
    entities::product,
    errors::ServiceError,
    services::stock::StockView,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::extract::{Json, Path, Query, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "999.99")]
    pub unit_price: Decimal,
    pub category: Option<String>,
    pub sku: Option<String>,
}

impl From<product::Model> for ProductResponse {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            unit_price: model.unit_price.round_dp(2),
            category: model.category,
            sku: model.sku,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailsResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    /// Stock rows of this product, one per warehouse holding it
    pub stock: Vec<StockView>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(PaginationParams),
    responses(
        (status = 200, description = "Products listed", body = ApiResponse<PaginatedResponse<ProductResponse>>)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<ProductResponse>> {
    let (page, limit) = params.resolve(&state.config);
    let products = state.services.products.list_products(page, limit).await?;
    Ok(ok(products.map(ProductResponse::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with its stock rows", body = ApiResponse<ProductDetailsResponse>),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ProductDetailsResponse> {
    let (product, stock) = state.services.products.get_product_details(id).await?;
    Ok(ok(ProductDetailsResponse {
        product: product.into(),
        stock,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductInput>,
) -> Result<Created<ProductResponse>, ServiceError> {
    let product = state.services.products.create_product(payload).await?;
    Ok(created(product.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "SKU already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductInput>,
) -> ApiResult<ProductResponse> {
    let product = state.services.products.update_product(id, payload).await?;
    Ok(ok(product.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted or already absent", body = ApiResponse<DeleteResult>),
        (status = 409, description = "Product is referenced by shipments", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<DeleteResult> {
    Ok(ok(state.services.products.delete_product(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/stock",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Stock of the product per warehouse", body = ApiResponse<Vec<StockView>>),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<StockView>> {
    Ok(ok(state.services.stock.stock_for_product(id).await?))
}

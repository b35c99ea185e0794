use super::common::{created, ok, Created, PaginationParams};
use crate::{
    commands::{suppliers::SupplierInput, DeleteResult},
    entities::supplier,
    errors::ServiceError,
    ApiResponse, ApiResult, AppState, PaginatedResponse,
};
use axum::extract::{Json, Path, Query, State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierResponse {
    pub id: i32,
    pub company_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
}

impl From<supplier::Model> for SupplierResponse {
    fn from(model: supplier::Model) -> Self {
        Self {
            id: model.id,
            company_name: model.company_name,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            address: model.address,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Suppliers listed", body = ApiResponse<PaginatedResponse<SupplierResponse>>)
    ),
    tag = "suppliers"
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<SupplierResponse>> {
    let (page, limit) = params.resolve(&state.config);
    let suppliers = state.services.suppliers.list_suppliers(page, limit).await?;
    Ok(ok(suppliers.map(SupplierResponse::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier fetched", body = ApiResponse<SupplierResponse>),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<SupplierResponse> {
    Ok(ok(state.services.suppliers.get_supplier(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    request_body = SupplierInput,
    responses(
        (status = 201, description = "Supplier created", body = ApiResponse<SupplierResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 409, description = "Contact email already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<SupplierInput>,
) -> Result<Created<SupplierResponse>, ServiceError> {
    let supplier = state.services.suppliers.create_supplier(payload).await?;
    Ok(created(supplier.into()))
}

#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    request_body = SupplierInput,
    responses(
        (status = 200, description = "Supplier updated", body = ApiResponse<SupplierResponse>),
        (status = 400, description = "Invalid fields", body = crate::errors::ErrorResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Contact email already in use", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SupplierInput>,
) -> ApiResult<SupplierResponse> {
    let supplier = state
        .services
        .suppliers
        .update_supplier(id, payload)
        .await?;
    Ok(ok(supplier.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    params(("id" = i32, Path, description = "Supplier ID")),
    responses(
        (status = 200, description = "Supplier deleted or already absent", body = ApiResponse<DeleteResult>),
        (status = 409, description = "Supplier is referenced by shipments", body = crate::errors::ErrorResponse)
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<DeleteResult> {
    Ok(ok(state.services.suppliers.delete_supplier(id).await?))
}

use crate::{config::AppConfig, ApiResponse};
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Pagination parameters for list operations
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size, clamped to the configured maximum (default 20)
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Returns `(page, limit)` with the page floored at 1 and the limit clamped.
    pub fn resolve(&self, config: &AppConfig) -> (u64, u64) {
        (self.page.unwrap_or(1).max(1), config.page_size(self.limit))
    }
}

/// 201 with the standard envelope
pub type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn created<T>(data: T) -> Created<T> {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

pub fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

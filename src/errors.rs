use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{error::DbErr, RuntimeErr, SqlErr, TransactionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

fn current_request_id() -> Option<String> {
    crate::telemetry::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Bad Request",
    "message": "Validation failed",
    "field_errors": { "unit_price": ["Unit price must be between 0.01 and 5000.00"] },
    "request_id": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Product 42 not found")]
    pub message: String,
    /// Per-field validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,
    /// Unique request identifier for support and debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    /// The record disappeared between read and write.
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        if matches!(err, DbErr::RecordNotUpdated) {
            return ServiceError::ConcurrencyConflict(
                "record was modified or removed before the update was applied".to_string(),
            );
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ServiceError::ConstraintViolation(format!("unique constraint violated: {}", detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => ServiceError::ConstraintViolation(
                format!("foreign key constraint violated: {}", detail),
            ),
            _ => match constraint_code(&err).as_deref() {
                // SQLite reports ON DELETE RESTRICT as 1811 and CHECK as 275.
                Some("1811") => ServiceError::ConstraintViolation(
                    "record is still referenced by other records".to_string(),
                ),
                Some("275") | Some("23514") => {
                    ServiceError::ConstraintViolation(format!("check constraint violated: {}", err))
                }
                _ => ServiceError::DatabaseError(err),
            },
        }
    }
}

/// Driver error code for constraint failures that `sql_err` leaves unclassified.
fn constraint_code(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err)))
        | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err))) => {
            db_err.code().map(|code| code.into_owned())
        }
        _ => None,
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::ValidationError(err)
    }
}

impl From<TransactionError<ServiceError>> for ServiceError {
    fn from(err: TransactionError<ServiceError>) -> Self {
        match err {
            TransactionError::Connection(db_err) => db_err.into(),
            TransactionError::Transaction(service_err) => service_err,
        }
    }
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::ConcurrencyConflict(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ConstraintViolation(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients; store failures are not echoed.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            Self::ValidationError(_) => "Validation failed".to_string(),
            _ => self.to_string(),
        }
    }

    /// Flattens validator output into `field -> messages`.
    pub fn field_errors(&self) -> Option<BTreeMap<String, Vec<String>>> {
        let Self::ValidationError(errors) = self else {
            return None;
        };

        let mut fields = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, e.code))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        Some(fields)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            field_errors: self.field_errors(),
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

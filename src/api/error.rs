/// HTTP error taxonomy
///
/// Client errors carry an actionable message. Internal errors are logged with their
/// full chain and answered with an opaque message.

use crate::contact::ValidationError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Tenant header absent or blank
    #[error("Missing tenant. Send the {header} header.")]
    TenantMissing { header: String },
    /// Malformed request input
    #[error("{0}")]
    Validation(String),
    /// Entity absent from the resolved tenant schema
    #[error("{0}")]
    NotFound(String),
    /// Anything else, usually a database failure inside a tenant transaction
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

impl ApiError {
    /// Machine-readable category sent as `error`
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::TenantMissing { .. } => "tenant_missing",
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TenantMissing { .. } | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.message.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", e.body_text());
        ApiError::Validation("Request body must be valid JSON.".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!("❌ Internal error: {:#}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "ok": false,
            "error": self.category(),
            "message": message,
        });

        (self.status(), Json(body)).into_response()
    }
}

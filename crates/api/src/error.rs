use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use linkout_core::error::CoreError;
use linkout_gateway::GatewayError;
use linkout_sheets::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and the upstream client errors,
/// and implements [`IntoResponse`] so every failure becomes the uniform
/// `{success: false, message, error}` JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `linkout_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A spreadsheet access error.
    #[error("Spreadsheet error: {0}")]
    Store(#[from] StoreError),

    /// A payment or blob gateway error.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::DataIntegrity(msg) => {
                    tracing::error!(error = %msg, "Upstream data integrity error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "DATA_INTEGRITY",
                        "Upstream data is inconsistent".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Store(err) => classify_store_error(err),

            AppError::Gateway(GatewayError::Input(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Gateway(err) => {
                tracing::error!(error = %err, "Payment gateway error");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Payment provider request failed".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "message": message,
            "error": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a spreadsheet error into an HTTP status, error code, and message.
///
/// - Transport and API failures map to 502: the sheet is an upstream
///   dependency, not this service.
/// - `BadCell` means the sheet holds data this service cannot interpret,
///   which is a 500 on our side.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::BadCell(msg) => {
            tracing::error!(error = %msg, "Unreadable spreadsheet cell");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_INTEGRITY",
                "Upstream data is inconsistent".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Spreadsheet request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Spreadsheet request failed".to_string(),
            )
        }
    }
}

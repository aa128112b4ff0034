//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError so handlers can return
//! `Result<_, AppError>` and get a JSON error body with the status code the
//! failure category calls for, instead of a uniform 400.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - Validation / ValidationErrors / BadRequest → 400 BAD_REQUEST
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate → 409 CONFLICT
    /// - UpstreamUnavailable / UpstreamStatus / UpstreamDecode → 502 BAD_GATEWAY
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Database / Configuration / Internal → 500 INTERNAL_SERVER_ERROR
    ///
    /// Internal variants never leak their source into the body.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let error_response = match &self {
            AppError::ValidationErrors { errors } => {
                let message = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                ErrorResponse::new(code, &message)
            }
            AppError::Database { operation, .. } => {
                ErrorResponse::new(code, &format!("Database operation failed: {operation}"))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(code, "Database connection unavailable")
            }
            AppError::Configuration { .. } | AppError::Internal { .. } => {
                ErrorResponse::new(code, "An internal error occurred")
            }
            other => ErrorResponse::new(code, &other.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::UpstreamUnavailable { .. }
        | AppError::UpstreamStatus { .. }
        | AppError::UpstreamDecode { .. } => StatusCode::BAD_GATEWAY,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
        AppError::UpstreamStatus { .. } => "UPSTREAM_ERROR",
        AppError::UpstreamDecode { .. } => "UPSTREAM_DECODE_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let error = AppError::NotFound {
            entity: "car".to_string(),
            field: "id".to_string(),
            value: "5".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error_to_code(&error), "NOT_FOUND");
    }

    #[test]
    fn duplicate_maps_to_409() {
        let error = AppError::Duplicate {
            entity: "cars".to_string(),
            field: "reg_num".to_string(),
            value: "X123XX150".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_maps_to_400() {
        let error = AppError::Validation {
            field: "page".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_code(&error), "VALIDATION_ERROR");
    }

    #[test]
    fn upstream_variants_map_to_502() {
        let unavailable = AppError::UpstreamUnavailable {
            service: "vehicle-info".to_string(),
            source: anyhow::anyhow!("connection refused"),
        };
        let status = AppError::UpstreamStatus {
            service: "vehicle-info".to_string(),
            status: 500,
        };
        let decode = AppError::UpstreamDecode {
            service: "vehicle-info".to_string(),
            source: anyhow::anyhow!("bad json"),
        };
        assert_eq!(error_to_status_code(&unavailable), StatusCode::BAD_GATEWAY);
        assert_eq!(error_to_status_code(&status), StatusCode::BAD_GATEWAY);
        assert_eq!(error_to_status_code(&decode), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn pool_errors_map_to_503() {
        let error = AppError::ConnectionPool {
            source: anyhow::anyhow!("pool exhausted"),
        };
        assert_eq!(
            error_to_status_code(&error),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn internal_variants_map_to_500() {
        let database = AppError::Database {
            operation: "list cars".to_string(),
            source: anyhow::anyhow!("connection reset"),
        };
        let internal = AppError::Internal {
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(
            error_to_status_code(&database),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status_code(&internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn response_body_keeps_error_field() {
        let error = AppError::NotFound {
            entity: "car".to_string(),
            field: "id".to_string(),
            value: "5".to_string(),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].as_str().unwrap().contains("id=5"));
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn internal_error_body_is_sanitized() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("secret connection string"),
        };
        let response = error.into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(!json["error"].as_str().unwrap().contains("secret"));
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::ManagerError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store initialization error: {0}")]
    StoreInit(#[from] StoreError),

    #[error("Validation error: {message}")]
    Validation { code: &'static str, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Store error: {message}")]
    Store { code: &'static str, message: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl AppError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StoreInit(_) => "STORE_ERROR",
            AppError::Validation { code, .. } => *code,
            AppError::NotFound(_) => "not-found",
            AppError::PayloadTooLarge(_) => "payload-too-large",
            AppError::Store { code, .. } => *code,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StoreInit(_) | AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Server-side failures are masked in production.
    fn client_message(&self, production: bool) -> String {
        match self {
            AppError::Validation { message, .. } => message.clone(),
            AppError::NotFound(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::StoreInit(_) | AppError::Store { .. } if production => {
                "Service temporarily unavailable".to_string()
            }
            AppError::StoreInit(e) => e.to_string(),
            AppError::Store { message, .. } => message.clone(),
        }
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        let code = err.kind();
        match err {
            ManagerError::Validation { message, .. } => AppError::Validation { code, message },
            ManagerError::Store { message, .. } => AppError::Store { code, message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let client_message = self.client_message(is_production());
        let log_message = self.to_string();

        // Always log the detailed error server-side
        if status.is_server_error() {
            tracing::error!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API error"
            );
        } else {
            tracing::warn!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: client_message,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{StoreErrorKind, ValidationKind};

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: AppError =
            ManagerError::validation(ValidationKind::IdAlreadyPresent, "has id").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "id-already-present");
    }

    #[test]
    fn test_store_error_maps_to_server_error() {
        let err: AppError = ManagerError::store(
            StoreErrorKind::Unavailable,
            StoreError::Unavailable("down".to_string()),
        )
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "unavailable");
    }

    #[test]
    fn test_not_found_status() {
        let err = AppError::NotFound("Notification n1 not found".to_string());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    fn update_failed() -> AppError {
        AppError::Store {
            code: StoreErrorKind::UpdateFailed.as_str(),
            message: "No notification with id secret-id to update".to_string(),
        }
    }

    #[test]
    fn test_store_messages_masked_in_production() {
        let unavailable: AppError = ManagerError::store(
            StoreErrorKind::Unavailable,
            StoreError::Unavailable("redis://10.0.0.5 refused".to_string()),
        )
        .into();

        for err in [update_failed(), unavailable] {
            assert_eq!(err.client_message(true), "Service temporarily unavailable");
        }
        assert!(update_failed().client_message(false).contains("secret-id"));
    }

    #[test]
    fn test_client_errors_never_masked() {
        let err = AppError::NotFound("Notification n1 not found".to_string());
        assert_eq!(err.client_message(true), "Notification n1 not found");

        let err: AppError = ManagerError::validation(ValidationKind::IdMissing, "Invalid id").into();
        assert_eq!(err.client_message(true), "Invalid id");
    }

    #[tokio::test]
    async fn test_production_response_body_is_masked() {
        std::env::set_var("RUN_MODE", "production");
        let response = update_failed().into_response();
        std::env::remove_var("RUN_MODE");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "update-failed");
        assert_eq!(body.error.message, "Service temporarily unavailable");
        assert!(!body.error.message.contains("secret-id"));
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = AppError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.code(), "payload-too-large");
    }
}

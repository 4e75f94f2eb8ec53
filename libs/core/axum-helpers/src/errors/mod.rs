pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Success envelope wrapping every 2xx payload.
///
/// ```json
/// { "success": true, "data": { ... } }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Error envelope returned for every non-2xx response.
///
/// The always-present `error.code` is what clients branch on:
///
/// ```json
/// {
///   "success": false,
///   "error": {
///     "code": "BOOTH_RESERVED",
///     "message": "Booth already has an active reservation",
///     "details": null
///   }
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error identifier
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (e.g. validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code,
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.error.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Application error type convertible into the error envelope.
///
/// Domain crates define their own thiserror enums and convert into this at
/// the handler boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    /// Business-rule violation carrying its own stable code
    #[error("{1}")]
    Rule(ErrorCode, String),
}

impl AppError {
    /// Business-rule error with the code's default message
    pub fn rule(code: ErrorCode) -> Self {
        AppError::Rule(code, code.default_message().to_string())
    }

    fn code(&self) -> ErrorCode {
        match self {
            AppError::SerdeJson(_) => ErrorCode::InternalError,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::ValidationError(_) => ErrorCode::ValidationError,
            AppError::UuidError(_) => ErrorCode::InvalidUuid,
            AppError::BadRequest(_) => ErrorCode::ValidationError,
            AppError::Unauthorized(_) => ErrorCode::Unauthorized,
            AppError::Forbidden(_) => ErrorCode::Forbidden,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
            AppError::Rule(code, _) => *code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = match &self {
            AppError::JsonExtractorRejection(e) => e.status(),
            _ => code.status(),
        };

        // 5xx means something broke on our side; everything else is the
        // client's problem and logged at a lower level.
        let (message, details) = match &self {
            AppError::SerdeJson(e) => {
                tracing::error!(code = code.as_str(), "JSON serialization error: {:?}", e);
                (code.default_message().to_string(), None)
            }
            AppError::Database(e) => {
                tracing::error!(code = code.as_str(), "Database error: {:?}", e);
                (code.default_message().to_string(), None)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(code = code.as_str(), "JSON extraction error: {:?}", e);
                (e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(code = code.as_str(), "Validation error: {:?}", e);
                (
                    code.default_message().to_string(),
                    serde_json::to_value(e).ok(),
                )
            }
            AppError::UuidError(_) => {
                tracing::info!(code = code.as_str(), "Invalid UUID in request");
                (code.default_message().to_string(), None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(code = code.as_str(), "Internal server error: {}", msg);
                (msg.clone(), None)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(code = code.as_str(), "Service unavailable: {}", msg);
                (msg.clone(), None)
            }
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Rule(_, msg) => {
                tracing::info!(code = code.as_str(), "{}", msg);
                (msg.clone(), None)
            }
        };

        let mut body = ErrorResponse::new(code, message);
        if let Some(details) = details {
            body = body.with_details(details);
        }
        body.into_response_with(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_error_keeps_its_code() {
        let err = AppError::rule(ErrorCode::BoothReserved);
        assert_eq!(err.code(), ErrorCode::BoothReserved);
        assert_eq!(err.to_string(), "Booth already has an active reservation");
    }

    #[test]
    fn envelope_serializes_with_success_false() {
        let body = ErrorResponse::new(ErrorCode::NotFound, "Booth abc not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Booth abc not found");
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn success_envelope_wraps_data() {
        let json = serde_json::to_value(ApiResponse {
            success: true,
            data: serde_json::json!({"id": 1}),
        })
        .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
    }
}

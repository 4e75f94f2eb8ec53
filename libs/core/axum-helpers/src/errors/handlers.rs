use axum::response::Response;

use super::{ErrorCode, ErrorResponse};

/// Fallback handler for unmatched routes.
pub async fn not_found() -> Response {
    ErrorResponse::new(ErrorCode::NotFound, "The requested resource was not found")
        .into_response_with(ErrorCode::NotFound.status())
}

/// Handler mounted under a disabled module's route prefix.
///
/// Every request below the prefix gets the same 503 without touching any
/// domain service.
pub async fn module_disabled() -> Response {
    ErrorResponse::new(
        ErrorCode::ModuleDisabled,
        ErrorCode::ModuleDisabled.default_message(),
    )
    .into_response_with(ErrorCode::ModuleDisabled.status())
}

//! Stable error codes for API responses.
//!
//! Single source of truth for the machine-readable `error.code` values
//! clients branch on, together with the HTTP status and default message for
//! each.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Machine-readable error codes carried in every error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Request shape
    /// Request validation failed
    ValidationError,
    /// Invalid UUID format in a path or query parameter
    InvalidUuid,
    /// JSON extraction from the request body failed
    InvalidJson,

    // Auth
    /// Authentication credentials are missing or invalid
    Unauthorized,
    /// Authenticated user lacks sufficient permissions
    Forbidden,

    // Generic resource errors
    /// Requested resource was not found
    NotFound,
    /// Request conflicts with current resource state
    Conflict,

    // Booking business rules
    /// Booth is not in a sellable state
    BoothUnavailable,
    /// Booth already has an active reservation
    BoothReserved,
    /// Reservation hold has lapsed
    ReservationExpired,
    /// Reservation is not in a state that permits the operation
    InvalidReservationState,
    /// Payment processor does not report the payment as succeeded
    PaymentNotCompleted,
    /// Webhook payload signature is missing or invalid
    InvalidSignature,

    // Platform
    /// Feature module is disabled by its flag
    ModuleDisabled,
    /// An unexpected internal server error occurred
    InternalError,
    /// Service is temporarily unavailable
    ServiceUnavailable,
    /// Database connection or query error
    DatabaseError,
}

impl ErrorCode {
    /// String identifier clients receive in `error.code`
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::BoothUnavailable => "BOOTH_UNAVAILABLE",
            ErrorCode::BoothReserved => "BOOTH_RESERVED",
            ErrorCode::ReservationExpired => "RESERVATION_EXPIRED",
            ErrorCode::InvalidReservationState => "INVALID_RESERVATION_STATE",
            ErrorCode::PaymentNotCompleted => "PAYMENT_NOT_COMPLETED",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::ModuleDisabled => "MODULE_DISABLED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// HTTP status this code maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::InvalidUuid
            | ErrorCode::InvalidJson
            | ErrorCode::BoothUnavailable
            | ErrorCode::BoothReserved
            | ErrorCode::ReservationExpired
            | ErrorCode::InvalidReservationState
            | ErrorCode::PaymentNotCompleted
            | ErrorCode::InvalidSignature => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ModuleDisabled | ErrorCode::ServiceUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Default human-readable message
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::InvalidJson => "Invalid JSON in request body",
            ErrorCode::Unauthorized => "Authentication required",
            ErrorCode::Forbidden => "Access forbidden",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Conflict => "Resource conflict",
            ErrorCode::BoothUnavailable => "Booth is not available",
            ErrorCode::BoothReserved => "Booth already has an active reservation",
            ErrorCode::ReservationExpired => "Reservation hold has expired",
            ErrorCode::InvalidReservationState => "Reservation state does not permit this",
            ErrorCode::PaymentNotCompleted => "Payment has not completed",
            ErrorCode::InvalidSignature => "Invalid webhook signature",
            ErrorCode::ModuleDisabled => "This feature module is disabled",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_screaming_snake() {
        assert_eq!(ErrorCode::BoothReserved.as_str(), "BOOTH_RESERVED");
        assert_eq!(ErrorCode::ModuleDisabled.as_str(), "MODULE_DISABLED");
    }

    #[test]
    fn business_rule_codes_map_to_400() {
        assert_eq!(ErrorCode::BoothReserved.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::PaymentNotCompleted.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn module_disabled_maps_to_503() {
        assert_eq!(
            ErrorCode::ModuleDisabled.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}

use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Reservation not found: {0}")]
    NotFound(Uuid),

    #[error("Booth not found: {0}")]
    BoothNotFound(Uuid),

    #[error("Booth is not available")]
    BoothUnavailable,

    #[error("Booth already has an active reservation")]
    BoothReserved,

    #[error("Reservation hold has expired")]
    Expired,

    #[error("Reservation is {0}, operation requires a different state")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ReservationResult<T> = Result<T, ReservationError>;

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::NotFound(id) => {
                AppError::NotFound(format!("Reservation {} not found", id))
            }
            ReservationError::BoothNotFound(id) => {
                AppError::NotFound(format!("Booth {} not found", id))
            }
            ReservationError::BoothUnavailable => AppError::rule(ErrorCode::BoothUnavailable),
            ReservationError::BoothReserved => AppError::rule(ErrorCode::BoothReserved),
            ReservationError::Expired => AppError::rule(ErrorCode::ReservationExpired),
            ReservationError::InvalidState(state) => AppError::Rule(
                ErrorCode::InvalidReservationState,
                format!("Reservation is {}", state),
            ),
            ReservationError::Validation(msg) => AppError::BadRequest(msg),
            ReservationError::Forbidden(msg) => AppError::Forbidden(msg),
            ReservationError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ReservationError {
    fn from(err: sea_orm::DbErr) -> Self {
        ReservationError::Database(err.to_string())
    }
}

impl From<domain_booths::BoothError> for ReservationError {
    fn from(err: domain_booths::BoothError) -> Self {
        match err {
            domain_booths::BoothError::NotFound(id) => ReservationError::BoothNotFound(id),
            other => ReservationError::Database(other.to_string()),
        }
    }
}

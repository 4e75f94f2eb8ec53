use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use domain_invoices::InvoiceError;
use domain_reservations::ReservationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("No transaction for processor intent {0}")]
    TransactionNotFound(String),

    #[error("Payment not completed, processor reports: {0}")]
    PaymentNotCompleted(String),

    #[error("Reservation is no longer active; payment flagged for refund")]
    ReservationNoLongerActive,

    #[error("Webhook signature missing or invalid")]
    InvalidSignature,

    #[error("Malformed webhook payload: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Payment processor error: {0}")]
    Processor(String),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type PaymentResult<T> = Result<T, PaymentError>;

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::TransactionNotFound(intent) => {
                AppError::NotFound(format!("No transaction for intent {}", intent))
            }
            PaymentError::PaymentNotCompleted(status) => AppError::Rule(
                ErrorCode::PaymentNotCompleted,
                format!("Payment not completed, processor reports: {}", status),
            ),
            PaymentError::ReservationNoLongerActive => {
                AppError::rule(ErrorCode::ReservationExpired)
            }
            PaymentError::InvalidSignature => AppError::rule(ErrorCode::InvalidSignature),
            PaymentError::InvalidPayload(msg) => AppError::BadRequest(msg),
            PaymentError::Forbidden(msg) => AppError::Forbidden(msg),
            // Processor trouble must fail loudly so the client can retry
            PaymentError::Processor(msg) => {
                AppError::InternalServerError(format!("Payment processor error: {}", msg))
            }
            PaymentError::Reservation(e) => e.into(),
            PaymentError::Invoice(e) => e.into(),
            PaymentError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for PaymentError {
    fn from(err: sea_orm::DbErr) -> Self {
        PaymentError::Database(err.to_string())
    }
}

impl From<crate::processor::ProcessorError> for PaymentError {
    fn from(err: crate::processor::ProcessorError) -> Self {
        PaymentError::Processor(err.to_string())
    }
}

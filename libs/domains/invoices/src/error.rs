use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("Invoice not found: {0}")]
    NotFound(Uuid),

    #[error("Invoice is {0}, operation requires a different state")]
    InvalidState(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type InvoiceResult<T> = Result<T, InvoiceError>;

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::NotFound(id) => AppError::NotFound(format!("Invoice {} not found", id)),
            InvoiceError::InvalidState(state) => {
                AppError::Conflict(format!("Invoice is {}", state))
            }
            InvoiceError::Validation(msg) => AppError::BadRequest(msg),
            InvoiceError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for InvoiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        InvoiceError::Database(err.to_string())
    }
}

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BoothError {
    #[error("Booth not found: {0}")]
    NotFound(Uuid),

    #[error("Floor plan not found for event: {0}")]
    FloorPlanNotFound(Uuid),

    #[error("Booth number already taken for this event")]
    NumberTaken,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type BoothResult<T> = Result<T, BoothError>;

impl From<BoothError> for AppError {
    fn from(err: BoothError) -> Self {
        match err {
            BoothError::NotFound(id) => AppError::NotFound(format!("Booth {} not found", id)),
            BoothError::FloorPlanNotFound(event_id) => {
                AppError::NotFound(format!("No floor plan for event {}", event_id))
            }
            BoothError::NumberTaken => {
                AppError::Conflict("Booth number already taken for this event".to_string())
            }
            BoothError::Validation(msg) => AppError::BadRequest(msg),
            BoothError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

impl IntoResponse for BoothError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for BoothError {
    fn from(err: sea_orm::DbErr) -> Self {
        BoothError::Database(err.to_string())
    }
}

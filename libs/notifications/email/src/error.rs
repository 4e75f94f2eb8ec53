use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

pub type NotificationResult<T> = Result<T, NotificationError>;

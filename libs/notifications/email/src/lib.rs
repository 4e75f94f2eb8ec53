//! Transactional email for the booking flow.
//!
//! Sending is best-effort throughout: the reservation engine and payment
//! coordinator fire these notifications without awaiting business-critical
//! state on them, and a failed send is logged, never propagated.

pub mod error;
pub mod models;
pub mod provider;
pub mod service;
pub mod templates;

pub use error::{NotificationError, NotificationResult};
pub use models::Email;
pub use provider::{EmailProvider, MockEmailProvider, SendResult, SmtpConfig, SmtpProvider};
pub use service::Mailer;

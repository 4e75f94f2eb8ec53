//! Payments domain: bridges reservation state to the external payment
//! processor's intent lifecycle.
//!
//! The coordinator owns the Transaction lifecycle. Both the synchronous
//! confirm path and the webhook path can observe "payment succeeded" for the
//! same intent; every step down from there is idempotent.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod processor;
pub mod repository;
pub mod service;
pub mod webhook;

pub use error::{PaymentError, PaymentResult};
pub use models::{
    ConfirmPaymentRequest, PaymentIntentResponse, PurchaseRequest, Transaction,
    TransactionResponse, TransactionStatus,
};
pub use postgres::PgTransactionRepository;
pub use processor::{
    IntentStatus, MockProcessor, PaymentProcessor, ProcessorError, ProcessorIntent,
    RemoteProcessor,
};
pub use repository::TransactionRepository;
pub use service::{ConfirmOutcome, PaymentCoordinator};
pub use webhook::WebhookVerifier;

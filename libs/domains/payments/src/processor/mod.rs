//! Payment processor abstraction.
//!
//! Compatible with Stripe-style intent APIs: create a customer (optional),
//! create an intent, poll it, refund it. [`MockProcessor`] backs development
//! and tests; [`RemoteProcessor`] talks to a real HTTP processor.

pub mod mock;
pub mod remote;

pub use mock::MockProcessor;
pub use remote::RemoteProcessor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProcessorResult<T> = Result<T, ProcessorError>;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor unreachable: {0}")]
    Unreachable(String),

    #[error("Processor rejected the request: {0}")]
    Rejected(String),

    #[error("Unknown payment intent: {0}")]
    UnknownIntent(String),
}

/// Processor-side intent state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    RequiresPayment,
    Processing,
    Succeeded,
    Canceled,
    Failed,
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IntentStatus::RequiresPayment => "requires_payment",
            IntentStatus::Processing => "processing",
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Canceled => "canceled",
            IntentStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// The processor's view of an in-progress charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorIntent {
    pub id: String,
    /// Client-side confirmation secret; present on creation
    pub client_secret: Option<String>,
    pub status: IntentStatus,
    pub amount_cents: i64,
    pub currency: String,
}

/// Abstraction over the external payment processor
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Register a customer; best-effort, callers log and continue on failure
    async fn create_customer(&self, email: &str, name: &str) -> ProcessorResult<String>;

    /// Open a payment intent for the given amount
    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        metadata: &serde_json::Value,
    ) -> ProcessorResult<ProcessorIntent>;

    /// Fetch the current state of an intent
    async fn retrieve_intent(&self, intent_id: &str) -> ProcessorResult<ProcessorIntent>;

    /// Refund a settled intent; returns the processor's refund id
    async fn refund_intent(&self, intent_id: &str) -> ProcessorResult<String>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PaymentResult;
use crate::models::{Transaction, TransactionStatus};

/// Repository trait for transaction persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert a new pending transaction with an amount/currency snapshot
    async fn create(
        &self,
        reservation_id: Uuid,
        amount_cents: i64,
        currency: String,
    ) -> PaymentResult<Transaction>;

    async fn find_by_id(&self, id: Uuid) -> PaymentResult<Option<Transaction>>;

    /// The transaction for a reservation; the unique index caps it at one
    async fn find_by_reservation(&self, reservation_id: Uuid)
        -> PaymentResult<Option<Transaction>>;

    async fn find_by_intent(&self, intent_id: &str) -> PaymentResult<Option<Transaction>>;

    /// Backfill the processor intent id and confirmation metadata
    async fn set_intent(
        &self,
        id: Uuid,
        intent_id: String,
        metadata: serde_json::Value,
    ) -> PaymentResult<Transaction>;

    async fn set_status(&self, id: Uuid, status: TransactionStatus) -> PaymentResult<Transaction>;

    async fn list(&self, limit: u64, offset: u64) -> PaymentResult<Vec<Transaction>>;
}

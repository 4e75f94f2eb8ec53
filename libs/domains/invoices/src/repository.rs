use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::InvoiceResult;
use crate::models::{CreateInvoice, Invoice, InvoiceStatus};

/// Repository trait for invoice persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice with a generated number
    async fn create(&self, input: CreateInvoice, number: String) -> InvoiceResult<Invoice>;

    async fn find_by_id(&self, id: Uuid) -> InvoiceResult<Option<Invoice>>;

    /// The invoice for a reservation; at most one exists
    async fn find_by_reservation(&self, reservation_id: Uuid) -> InvoiceResult<Option<Invoice>>;

    async fn list(&self, status: Option<InvoiceStatus>) -> InvoiceResult<Vec<Invoice>>;

    /// Set the status, stamping `paid_at` when provided
    async fn set_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
        paid_at: Option<DateTime<Utc>>,
    ) -> InvoiceResult<Option<Invoice>>;
}

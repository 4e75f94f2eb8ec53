use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{InvoiceError, InvoiceResult};
use crate::models::{CreateInvoice, Invoice, InvoiceStatus};
use crate::number;
use crate::repository::InvoiceRepository;

/// Default payment window when no due date is given
const DEFAULT_DUE_DAYS: i64 = 14;

/// Service layer for invoice issuance and lifecycle
#[derive(Clone)]
pub struct InvoiceService {
    repository: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
    pub fn new(repository: Arc<dyn InvoiceRepository>) -> Self {
        Self { repository }
    }

    /// Issue an invoice for a reservation, reusing an existing one.
    ///
    /// Idempotent per reservation: the payment coordinator's racing confirm
    /// paths both land on the same invoice row.
    #[instrument(skip(self, input), fields(reservation_id = %input.reservation_id))]
    pub async fn issue_for_reservation(&self, mut input: CreateInvoice) -> InvoiceResult<Invoice> {
        input
            .validate()
            .map_err(|e| InvoiceError::Validation(e.to_string()))?;

        if let Some(existing) = self
            .repository
            .find_by_reservation(input.reservation_id)
            .await?
        {
            return Ok(existing);
        }

        if input.due_at.is_none() {
            input.due_at = Some(Utc::now() + Duration::days(DEFAULT_DUE_DAYS));
        }

        match self.repository.create(input.clone(), number::generate()).await {
            Ok(invoice) => Ok(invoice),
            // Unique reservation index: a concurrent confirm path issued it
            // first; use theirs.
            Err(InvoiceError::Database(msg)) if msg.contains("uq_invoices_reservation") => self
                .repository
                .find_by_reservation(input.reservation_id)
                .await?
                .ok_or(InvoiceError::Database(msg)),
            Err(e) => Err(e),
        }
    }

    pub async fn get_invoice(&self, id: Uuid) -> InvoiceResult<Invoice> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(InvoiceError::NotFound(id))
    }

    pub async fn find_by_reservation(&self, reservation_id: Uuid) -> InvoiceResult<Option<Invoice>> {
        self.repository.find_by_reservation(reservation_id).await
    }

    pub async fn list_invoices(&self, status: Option<InvoiceStatus>) -> InvoiceResult<Vec<Invoice>> {
        self.repository.list(status).await
    }

    /// Move a draft invoice to sent
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn mark_sent(&self, id: Uuid) -> InvoiceResult<Invoice> {
        let invoice = self.get_invoice(id).await?;
        match invoice.status {
            InvoiceStatus::Draft => self
                .repository
                .set_status(id, InvoiceStatus::Sent, None)
                .await?
                .ok_or(InvoiceError::NotFound(id)),
            InvoiceStatus::Sent => Ok(invoice),
            other => Err(InvoiceError::InvalidState(other.to_string())),
        }
    }

    /// Settle an invoice, stamping the payment time.
    ///
    /// Paying an already-paid invoice is a no-op success so the dual confirm
    /// paths stay idempotent end to end.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn mark_paid(&self, id: Uuid) -> InvoiceResult<Invoice> {
        let invoice = self.get_invoice(id).await?;
        match invoice.status {
            InvoiceStatus::Draft | InvoiceStatus::Sent => self
                .repository
                .set_status(id, InvoiceStatus::Paid, Some(Utc::now()))
                .await?
                .ok_or(InvoiceError::NotFound(id)),
            InvoiceStatus::Paid => Ok(invoice),
            InvoiceStatus::Cancelled => {
                Err(InvoiceError::InvalidState(invoice.status.to_string()))
            }
        }
    }

    /// Cancel an unpaid invoice
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> InvoiceResult<Invoice> {
        let invoice = self.get_invoice(id).await?;
        match invoice.status {
            InvoiceStatus::Draft | InvoiceStatus::Sent => self
                .repository
                .set_status(id, InvoiceStatus::Cancelled, None)
                .await?
                .ok_or(InvoiceError::NotFound(id)),
            InvoiceStatus::Cancelled => Ok(invoice),
            InvoiceStatus::Paid => Err(InvoiceError::InvalidState(invoice.status.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockInvoiceRepository;

    fn sample_invoice(status: InvoiceStatus) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            reservation_id: Uuid::new_v4(),
            number: "INV-TEST-AB12".to_string(),
            amount_cents: 50_000,
            tax_cents: 0,
            total_cents: 50_000,
            status,
            due_at: None,
            paid_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn issue_reuses_existing_invoice() {
        let existing = sample_invoice(InvoiceStatus::Sent);
        let reservation_id = existing.reservation_id;
        let returned = existing.clone();

        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_reservation()
            .returning(move |_| Ok(Some(returned.clone())));
        // create must not be called; the mock would panic

        let invoice = InvoiceService::new(Arc::new(repo))
            .issue_for_reservation(CreateInvoice {
                reservation_id,
                amount_cents: 50_000,
                tax_cents: 0,
                due_at: None,
            })
            .await
            .unwrap();

        assert_eq!(invoice.id, existing.id);
    }

    #[tokio::test]
    async fn issue_computes_total_and_due_date() {
        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_reservation().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|input, number| {
                input.due_at.is_some() && number.starts_with("INV-")
            })
            .returning(|input, number| {
                Ok(Invoice {
                    id: Uuid::new_v4(),
                    reservation_id: input.reservation_id,
                    number,
                    amount_cents: input.amount_cents,
                    tax_cents: input.tax_cents,
                    total_cents: input.amount_cents + input.tax_cents,
                    status: InvoiceStatus::Draft,
                    due_at: input.due_at,
                    paid_at: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let invoice = InvoiceService::new(Arc::new(repo))
            .issue_for_reservation(CreateInvoice {
                reservation_id: Uuid::new_v4(),
                amount_cents: 50_000,
                tax_cents: 2_500,
                due_at: None,
            })
            .await
            .unwrap();

        assert_eq!(invoice.total_cents, 52_500);
        assert!(invoice.due_at.is_some());
    }

    #[tokio::test]
    async fn mark_paid_is_idempotent() {
        let mut paid = sample_invoice(InvoiceStatus::Paid);
        paid.paid_at = Some(Utc::now());
        let id = paid.id;
        let returned = paid.clone();

        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(returned.clone())));

        let invoice = InvoiceService::new(Arc::new(repo))
            .mark_paid(id)
            .await
            .unwrap();

        assert_eq!(invoice.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn cancelled_invoice_cannot_be_paid() {
        let cancelled = sample_invoice(InvoiceStatus::Cancelled);
        let id = cancelled.id;

        let mut repo = MockInvoiceRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(cancelled.clone())));

        let err = InvoiceService::new(Arc::new(repo))
            .mark_paid(id)
            .await
            .unwrap_err();

        assert!(matches!(err, InvoiceError::InvalidState(_)));
    }
}

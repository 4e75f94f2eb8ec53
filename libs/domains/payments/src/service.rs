use domain_booths::BoothStore;
use domain_invoices::{CreateInvoice, Invoice, InvoiceService};
use domain_reservations::{Reservation, ReservationEngine, ReservationError, ReservationStatus};
use event_bus::{BusEvent, EventBus};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{PaymentIntentResponse, Transaction, TransactionStatus, WebhookEvent};
use crate::processor::{IntentStatus, PaymentProcessor};
use crate::repository::TransactionRepository;

/// Currency for all charges in this deployment
const CURRENCY: &str = "usd";

/// Result of a successful confirm: the full paper trail
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct ConfirmOutcome {
    pub transaction: crate::models::TransactionResponse,
    pub reservation: domain_reservations::ReservationResponse,
    pub invoice: domain_invoices::InvoiceResponse,
}

/// The payment coordinator: one reservation, at most one active transaction,
/// one processor intent.
#[derive(Clone)]
pub struct PaymentCoordinator {
    transactions: Arc<dyn TransactionRepository>,
    processor: Arc<dyn PaymentProcessor>,
    engine: ReservationEngine,
    invoices: InvoiceService,
    booths: BoothStore,
    bus: EventBus,
}

impl PaymentCoordinator {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        processor: Arc<dyn PaymentProcessor>,
        engine: ReservationEngine,
        invoices: InvoiceService,
        booths: BoothStore,
        bus: EventBus,
    ) -> Self {
        Self {
            transactions,
            processor,
            engine,
            invoices,
            booths,
            bus,
        }
    }

    /// Create (or reuse) the payment intent for a reservation.
    ///
    /// A transaction missing its processor intent id (a previous attempt
    /// that died between insert and intent creation) is backfilled rather
    /// than duplicated.
    #[instrument(skip(self), fields(reservation_id = %reservation_id))]
    pub async fn create_intent(
        &self,
        reservation_id: Uuid,
        payer_email: &str,
        payer_name: &str,
    ) -> PaymentResult<PaymentIntentResponse> {
        let reservation = self.engine.get_reservation(reservation_id).await?;
        self.require_payable(&reservation)?;

        if let Some(tx) = self.transactions.find_by_reservation(reservation_id).await? {
            if let Some(intent_id) = tx.processor_intent_id.clone() {
                return Ok(PaymentIntentResponse {
                    payment_intent_id: intent_id,
                    client_secret: tx.client_secret(),
                    amount_cents: tx.amount_cents,
                    currency: tx.currency,
                });
            }
            return self.attach_intent(tx, payer_email, payer_name).await;
        }

        let booth = self.booths.get_booth(reservation.booth_id).await.map_err(
            |e| PaymentError::Database(format!("Booth lookup failed: {}", e)),
        )?;

        let tx = self
            .transactions
            .create(reservation_id, booth.price_cents, CURRENCY.to_string())
            .await?;

        self.attach_intent(tx, payer_email, payer_name).await
    }

    async fn attach_intent(
        &self,
        tx: Transaction,
        payer_email: &str,
        payer_name: &str,
    ) -> PaymentResult<PaymentIntentResponse> {
        // Customer registration is best-effort; the intent works without it
        if let Err(e) = self.processor.create_customer(payer_email, payer_name).await {
            tracing::warn!(error = %e, "Processor customer creation failed, continuing");
        }

        let metadata = serde_json::json!({ "reservation_id": tx.reservation_id });
        let intent = self
            .processor
            .create_intent(tx.amount_cents, &tx.currency, &metadata)
            .await?;

        let stored_metadata = serde_json::json!({
            "client_secret": intent.client_secret,
            "reservation_id": tx.reservation_id,
        });
        let tx = self
            .transactions
            .set_intent(tx.id, intent.id.clone(), stored_metadata)
            .await?;

        Ok(PaymentIntentResponse {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
            amount_cents: tx.amount_cents,
            currency: tx.currency,
        })
    }

    /// Finalize a booking once the processor reports the intent succeeded.
    ///
    /// Shared by the synchronous confirm endpoint and the webhook; safe to
    /// run concurrently or repeatedly for the same intent.
    #[instrument(skip(self), fields(intent_id = %intent_id))]
    pub async fn confirm_from_processor(&self, intent_id: &str) -> PaymentResult<ConfirmOutcome> {
        let tx = self
            .transactions
            .find_by_intent(intent_id)
            .await?
            .ok_or_else(|| PaymentError::TransactionNotFound(intent_id.to_string()))?;

        let intent = self.processor.retrieve_intent(intent_id).await?;
        if intent.status != IntentStatus::Succeeded {
            return Err(PaymentError::PaymentNotCompleted(intent.status.to_string()));
        }

        let tx = match tx.status {
            TransactionStatus::Completed => tx,
            TransactionStatus::Pending | TransactionStatus::Failed => {
                self.transactions
                    .set_status(tx.id, TransactionStatus::Completed)
                    .await?
            }
            TransactionStatus::Refunded => {
                return Err(PaymentError::ReservationNoLongerActive);
            }
        };

        let reservation = match self.engine.confirm(tx.reservation_id).await {
            Ok(reservation) => reservation,
            Err(ReservationError::Expired) | Err(ReservationError::InvalidState(_)) => {
                return self.settle_late_payment(tx).await;
            }
            Err(e) => return Err(e.into()),
        };

        let invoice = self.paid_invoice_for(&tx).await?;

        self.bus
            .emit_async(BusEvent::PaymentCompleted {
                transaction_id: tx.id,
                reservation_id: tx.reservation_id,
                amount_cents: tx.amount_cents,
                currency: tx.currency.clone(),
            })
            .await;

        tracing::info!(
            transaction_id = %tx.id,
            reservation_id = %tx.reservation_id,
            "Payment confirmed and booking finalized"
        );

        Ok(ConfirmOutcome {
            transaction: tx.into(),
            reservation: reservation.into(),
            invoice: invoice.into(),
        })
    }

    /// Ingest a signed processor webhook payload (signature already checked).
    ///
    /// Unknown event types are acknowledged, not failed, so the processor
    /// does not retry them forever.
    #[instrument(skip(self, event), fields(event_id = %event.id, event_type = %event.event_type))]
    pub async fn handle_webhook_event(&self, event: WebhookEvent) -> PaymentResult<()> {
        match event.event_type.as_str() {
            "payment_intent.succeeded" => {
                match self.confirm_from_processor(&event.data.intent_id).await {
                    Ok(_) => Ok(()),
                    // Money settled after the hold lapsed; already flagged
                    // for refund. Ack so the processor stops retrying.
                    Err(PaymentError::ReservationNoLongerActive) => Ok(()),
                    Err(e) => Err(e),
                }
            }
            "payment_intent.payment_failed" => {
                let tx = self.require_by_intent(&event.data.intent_id).await?;
                if tx.status == TransactionStatus::Pending {
                    self.transactions
                        .set_status(tx.id, TransactionStatus::Failed)
                        .await?;
                }
                self.bus
                    .emit_async(BusEvent::PaymentFailed {
                        transaction_id: tx.id,
                        reservation_id: tx.reservation_id,
                        reason: event
                            .data
                            .reason
                            .unwrap_or_else(|| "payment failed".to_string()),
                    })
                    .await;
                Ok(())
            }
            "payment_intent.canceled" => {
                // The transaction stays as-is; only the hold is released
                let tx = self.require_by_intent(&event.data.intent_id).await?;
                match self.engine.cancel(tx.reservation_id).await {
                    Ok(_) => {}
                    Err(ReservationError::Expired)
                    | Err(ReservationError::InvalidState(_)) => {
                        tracing::debug!(
                            reservation_id = %tx.reservation_id,
                            "Cancellation webhook for a hold that is already inactive"
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
                Ok(())
            }
            other => {
                tracing::info!(event_type = %other, "Ignoring unhandled webhook event type");
                Ok(())
            }
        }
    }

    pub async fn list_transactions(
        &self,
        limit: u64,
        offset: u64,
    ) -> PaymentResult<Vec<Transaction>> {
        self.transactions.list(limit, offset).await
    }

    /// Ownership gate for the purchase/confirm endpoints
    pub async fn reservation_owner(&self, reservation_id: Uuid) -> PaymentResult<Uuid> {
        Ok(self.engine.get_reservation(reservation_id).await?.exhibitor_id)
    }

    pub async fn transaction_by_intent(&self, intent_id: &str) -> PaymentResult<Transaction> {
        self.require_by_intent(intent_id).await
    }

    /// The money settled but the reservation is gone: keep the funds
    /// movement honest by refunding immediately rather than resurrecting a
    /// hold that may since have been resold.
    async fn settle_late_payment(&self, tx: Transaction) -> PaymentResult<ConfirmOutcome> {
        let intent_id = tx
            .processor_intent_id
            .clone()
            .unwrap_or_default();

        tracing::error!(
            transaction_id = %tx.id,
            reservation_id = %tx.reservation_id,
            "Payment settled for an inactive reservation; attempting refund"
        );

        match self.processor.refund_intent(&intent_id).await {
            Ok(refund_id) => {
                self.transactions
                    .set_status(tx.id, TransactionStatus::Refunded)
                    .await?;
                tracing::info!(
                    transaction_id = %tx.id,
                    refund_id = %refund_id,
                    "Late payment refunded"
                );
            }
            Err(e) => {
                // Leave the transaction completed and shout: this needs a
                // human until the refund goes through.
                tracing::error!(
                    transaction_id = %tx.id,
                    error = %e,
                    "Refund of late payment failed; manual reconciliation required"
                );
            }
        }

        Err(PaymentError::ReservationNoLongerActive)
    }

    async fn paid_invoice_for(&self, tx: &Transaction) -> PaymentResult<Invoice> {
        let invoice = self
            .invoices
            .issue_for_reservation(CreateInvoice {
                reservation_id: tx.reservation_id,
                amount_cents: tx.amount_cents,
                tax_cents: 0,
                due_at: None,
            })
            .await?;

        if invoice.status == domain_invoices::InvoiceStatus::Draft {
            self.invoices.mark_sent(invoice.id).await?;
        }
        Ok(self.invoices.mark_paid(invoice.id).await?)
    }

    async fn require_by_intent(&self, intent_id: &str) -> PaymentResult<Transaction> {
        self.transactions
            .find_by_intent(intent_id)
            .await?
            .ok_or_else(|| PaymentError::TransactionNotFound(intent_id.to_string()))
    }

    fn require_payable(&self, reservation: &Reservation) -> PaymentResult<()> {
        let now = chrono::Utc::now();
        match reservation.status {
            ReservationStatus::Pending if reservation.is_hold_lapsed(now) => {
                Err(ReservationError::Expired.into())
            }
            ReservationStatus::Pending => Ok(()),
            other => Err(ReservationError::InvalidState(other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WebhookEventData;
    use crate::processor::MockProcessor;
    use crate::repository::MockTransactionRepository;
    use chrono::{Duration, Utc};
    use domain_booths::repository::{MockBoothRepository, MockFloorPlanRepository};
    use domain_booths::{Booth, BoothSize, BoothStatus};
    use domain_invoices::repository::MockInvoiceRepository;
    use domain_invoices::InvoiceStatus;
    use domain_reservations::repository::MockReservationRepository;
    use event_bus::topics;

    struct Fixture {
        transactions: MockTransactionRepository,
        reservations: MockReservationRepository,
        booths: MockBoothRepository,
        invoices: MockInvoiceRepository,
        processor: MockProcessor,
        bus: EventBus,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                transactions: MockTransactionRepository::new(),
                reservations: MockReservationRepository::new(),
                booths: MockBoothRepository::new(),
                invoices: MockInvoiceRepository::new(),
                processor: MockProcessor::new(),
                bus: EventBus::new(),
            }
        }

        fn coordinator(self) -> (PaymentCoordinator, MockProcessor, EventBus) {
            let booths = BoothStore::new(
                Arc::new(self.booths),
                Arc::new(MockFloorPlanRepository::new()),
            );
            let engine = ReservationEngine::new(
                Arc::new(self.reservations),
                booths.clone(),
                self.bus.clone(),
                None,
            );
            let coordinator = PaymentCoordinator::new(
                Arc::new(self.transactions),
                Arc::new(self.processor.clone()),
                engine,
                InvoiceService::new(Arc::new(self.invoices)),
                booths,
                self.bus.clone(),
            );
            (coordinator, self.processor, self.bus)
        }
    }

    fn pending_reservation() -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            booth_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            exhibitor_id: Uuid::new_v4(),
            status: ReservationStatus::Pending,
            expires_at: Some(Utc::now() + Duration::minutes(10)),
            confirmed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn booth_for(reservation: &Reservation, price_cents: i64) -> Booth {
        Booth {
            id: reservation.booth_id,
            event_id: reservation.event_id,
            number: "A-01".to_string(),
            size: BoothSize::Standard,
            price_cents,
            status: BoothStatus::Reserved,
            position_x: 0,
            position_y: 0,
            width: 1,
            height: 1,
            description: String::new(),
            amenities: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn transaction_for(reservation: &Reservation, intent_id: Option<&str>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            reservation_id: reservation.id,
            amount_cents: 50_000,
            currency: CURRENCY.to_string(),
            status: TransactionStatus::Pending,
            processor_intent_id: intent_id.map(|s| s.to_string()),
            metadata: serde_json::json!({"client_secret": "cs_stored"}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn invoice_for(tx: &Transaction, status: InvoiceStatus) -> domain_invoices::Invoice {
        domain_invoices::Invoice {
            id: Uuid::new_v4(),
            reservation_id: tx.reservation_id,
            number: "INV-TEST-AB12".to_string(),
            amount_cents: tx.amount_cents,
            tax_cents: 0,
            total_cents: tx.amount_cents,
            status,
            due_at: None,
            paid_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_intent_snapshots_booth_price() {
        let reservation = pending_reservation();
        let booth = booth_for(&reservation, 50_000);
        let created_tx = transaction_for(&reservation, None);

        let mut fx = Fixture::new();
        let res = reservation.clone();
        fx.reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(res.clone())));
        fx.transactions
            .expect_find_by_reservation()
            .returning(|_| Ok(None));
        let booth_clone = booth.clone();
        fx.booths
            .expect_find_by_id()
            .returning(move |_| Ok(Some(booth_clone.clone())));
        let tx_clone = created_tx.clone();
        fx.transactions
            .expect_create()
            .withf(|_, amount, currency| *amount == 50_000 && currency == "usd")
            .returning(move |_, _, _| Ok(tx_clone.clone()));
        let tx_for_intent = created_tx.clone();
        fx.transactions
            .expect_set_intent()
            .returning(move |_, intent_id, metadata| {
                let mut tx = tx_for_intent.clone();
                tx.processor_intent_id = Some(intent_id);
                tx.metadata = metadata;
                Ok(tx)
            });

        let (coordinator, _, _) = fx.coordinator();
        let response = coordinator
            .create_intent(reservation.id, "ex@example.com", "Ada")
            .await
            .unwrap();

        assert_eq!(response.amount_cents, 50_000);
        assert_eq!(response.currency, "usd");
        assert!(response.payment_intent_id.starts_with("pi_mock_"));
        assert!(response.client_secret.is_some());
    }

    #[tokio::test]
    async fn create_intent_reuses_existing_intent() {
        let reservation = pending_reservation();
        let existing = transaction_for(&reservation, Some("pi_existing"));

        let mut fx = Fixture::new();
        let res = reservation.clone();
        fx.reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(res.clone())));
        fx.transactions
            .expect_find_by_reservation()
            .returning(move |_| Ok(Some(existing.clone())));
        // No create/set_intent expectations: the mocks would panic if hit

        let (coordinator, _, _) = fx.coordinator();
        let response = coordinator
            .create_intent(reservation.id, "ex@example.com", "Ada")
            .await
            .unwrap();

        assert_eq!(response.payment_intent_id, "pi_existing");
        assert_eq!(response.client_secret.as_deref(), Some("cs_stored"));
    }

    #[tokio::test]
    async fn create_intent_rejects_lapsed_hold() {
        let mut reservation = pending_reservation();
        reservation.expires_at = Some(Utc::now() - Duration::minutes(1));

        let mut fx = Fixture::new();
        let res = reservation.clone();
        fx.reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(res.clone())));

        let (coordinator, _, _) = fx.coordinator();
        let err = coordinator
            .create_intent(reservation.id, "ex@example.com", "Ada")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentError::Reservation(ReservationError::Expired)
        ));
    }

    async fn open_intent(processor: &MockProcessor) -> ProcessorIntent {
        processor
            .create_intent(50_000, CURRENCY, &serde_json::json!({}))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn confirm_rejects_unsettled_intent() {
        let reservation = pending_reservation();

        let mut fx = Fixture::new();
        let created = open_intent(&fx.processor).await;
        let tx = transaction_for(&reservation, Some(&created.id));
        fx.transactions
            .expect_find_by_intent()
            .returning(move |_| Ok(Some(tx.clone())));

        let (coordinator, _, _) = fx.coordinator();
        let err = coordinator
            .confirm_from_processor(&created.id)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::PaymentNotCompleted(_)));
    }

    #[tokio::test]
    async fn confirm_finalizes_booking_and_invoice() {
        let reservation = pending_reservation();

        let mut fx = Fixture::new();
        let intent = open_intent(&fx.processor).await;
        fx.processor.mark_succeeded(&intent.id).await;

        let tx = transaction_for(&reservation, Some(&intent.id));
        let tx_id = tx.id;
        let found_tx = tx.clone();
        fx.transactions
            .expect_find_by_intent()
            .returning(move |_| Ok(Some(found_tx.clone())));
        let completed_tx = tx.clone();
        fx.transactions
            .expect_set_status()
            .withf(move |id, status| *id == tx_id && *status == TransactionStatus::Completed)
            .returning(move |_, status| {
                let mut tx = completed_tx.clone();
                tx.status = status;
                Ok(tx)
            });

        // Engine: conditional confirm wins, booth gets booked
        fx.reservations
            .expect_confirm_pending()
            .returning(|_, _| Ok(1));
        let mut confirmed = reservation.clone();
        confirmed.status = ReservationStatus::Confirmed;
        confirmed.confirmed_at = Some(Utc::now());
        fx.reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(confirmed.clone())));
        let booked_booth = booth_for(&reservation, 50_000);
        fx.booths.expect_set_status().returning(move |_, status| {
            let mut booth = booked_booth.clone();
            booth.status = status;
            Ok(Some(booth))
        });

        // Invoicing: fresh draft, then sent, then paid
        fx.invoices
            .expect_find_by_reservation()
            .returning(|_| Ok(None));
        let draft = invoice_for(&tx, InvoiceStatus::Draft);
        let draft_id = draft.id;
        let created_invoice = draft.clone();
        fx.invoices
            .expect_create()
            .returning(move |_, _| Ok(created_invoice.clone()));
        let by_id = std::sync::Arc::new(std::sync::Mutex::new(draft.clone()));
        let by_id_find = by_id.clone();
        fx.invoices
            .expect_find_by_id()
            .returning(move |_| Ok(Some(by_id_find.lock().unwrap().clone())));
        let by_id_set = by_id.clone();
        fx.invoices
            .expect_set_status()
            .withf(move |id, _, _| *id == draft_id)
            .returning(move |_, status, paid_at| {
                let mut invoice = by_id_set.lock().unwrap();
                invoice.status = status;
                invoice.paid_at = paid_at;
                Ok(Some(invoice.clone()))
            });

        let (coordinator, _, bus) = fx.coordinator();
        let outcome = coordinator.confirm_from_processor(&intent.id).await.unwrap();

        assert_eq!(outcome.transaction.status, TransactionStatus::Completed);
        assert_eq!(outcome.reservation.status, ReservationStatus::Confirmed);
        assert_eq!(outcome.invoice.status, InvoiceStatus::Paid);
        assert_eq!(outcome.invoice.total_cents, 50_000);
        assert_eq!(bus.history(topics::PAYMENT_COMPLETED).await.len(), 1);
        assert_eq!(bus.history(topics::BOOTH_BOOKED).await.len(), 1);
    }

    #[tokio::test]
    async fn cancellation_webhook_releases_pending_hold() {
        let reservation = pending_reservation();

        let mut fx = Fixture::new();
        let intent = open_intent(&fx.processor).await;
        let tx = transaction_for(&reservation, Some(&intent.id));
        fx.transactions
            .expect_find_by_intent()
            .returning(move |_| Ok(Some(tx.clone())));
        // Transaction status must stay untouched: no set_status expectation

        let res = reservation.clone();
        fx.reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(res.clone())));
        fx.reservations.expect_cancel_pending().returning(|_| Ok(1));
        let released_booth = booth_for(&reservation, 50_000);
        fx.booths.expect_set_status().returning(move |_, status| {
            let mut booth = released_booth.clone();
            booth.status = status;
            Ok(Some(booth))
        });

        let (coordinator, _, bus) = fx.coordinator();
        coordinator
            .handle_webhook_event(WebhookEvent {
                id: "evt_1".to_string(),
                event_type: "payment_intent.canceled".to_string(),
                data: WebhookEventData {
                    intent_id: intent.id.clone(),
                    reason: None,
                },
            })
            .await
            .unwrap();

        assert_eq!(bus.history(topics::BOOTH_RELEASED).await.len(), 1);
        assert_eq!(bus.history(topics::BOOTH_STATUS_CHANGED).await.len(), 1);
    }

    #[tokio::test]
    async fn late_settlement_refunds_instead_of_reactivating() {
        let mut reservation = pending_reservation();
        reservation.expires_at = Some(Utc::now() - Duration::minutes(5));

        let mut fx = Fixture::new();
        let intent = open_intent(&fx.processor).await;
        fx.processor.mark_succeeded(&intent.id).await;

        let tx = transaction_for(&reservation, Some(&intent.id));
        let found_tx = tx.clone();
        fx.transactions
            .expect_find_by_intent()
            .returning(move |_| Ok(Some(found_tx.clone())));
        let status_log = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let status_log_set = status_log.clone();
        let tx_for_status = tx.clone();
        fx.transactions
            .expect_set_status()
            .returning(move |_, status| {
                status_log_set.lock().unwrap().push(status);
                let mut tx = tx_for_status.clone();
                tx.status = status;
                Ok(tx)
            });

        // Engine: conditional confirm loses, row is a lapsed pending hold
        fx.reservations
            .expect_confirm_pending()
            .returning(|_, _| Ok(0));
        let res = reservation.clone();
        fx.reservations
            .expect_find_by_id()
            .returning(move |_| Ok(Some(res.clone())));
        fx.reservations
            .expect_expire_pending()
            .returning(|_, _| Ok(1));
        fx.reservations
            .expect_find_active_for_booth()
            .returning(|_, _| Ok(None));
        fx.booths
            .expect_set_status_if()
            .returning(|_, _, _| Ok(true));

        let (coordinator, _, _) = fx.coordinator();
        let err = coordinator
            .confirm_from_processor(&intent.id)
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::ReservationNoLongerActive));
        let statuses = status_log.lock().unwrap().clone();
        assert_eq!(
            statuses,
            vec![TransactionStatus::Completed, TransactionStatus::Refunded]
        );
    }

    #[tokio::test]
    async fn unknown_webhook_event_is_acknowledged() {
        let fx = Fixture::new();
        let (coordinator, _, _) = fx.coordinator();

        coordinator
            .handle_webhook_event(WebhookEvent {
                id: "evt_2".to_string(),
                event_type: "customer.updated".to_string(),
                data: WebhookEventData {
                    intent_id: "pi_whatever".to_string(),
                    reason: None,
                },
            })
            .await
            .unwrap();
    }
}

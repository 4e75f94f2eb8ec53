//! Invoicing module: invoice administration plus a payment-completed audit
//! subscriber. Invoice issuance itself happens synchronously inside the
//! payment confirm path; this module reacts, it does not create.

use super::FeatureModule;
use crate::api::require_admin;
use crate::state::AppState;
use axum::Router;
use event_bus::{topics, BusEvent};

pub struct InvoicingModule;

#[async_trait::async_trait]
impl FeatureModule for InvoicingModule {
    fn name(&self) -> &'static str {
        "invoicing"
    }

    fn prefix(&self) -> &'static str {
        "/invoices"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["payments"]
    }

    fn routes(&self, state: &AppState) -> Router {
        require_admin(
            domain_invoices::handlers::admin_router(state.invoices.clone()),
            state,
        )
    }

    async fn subscribe(&self, state: &AppState) {
        let invoices = state.invoices.clone();
        state
            .bus
            .subscribe(topics::PAYMENT_COMPLETED, self.name(), move |event| {
                let invoices = invoices.clone();
                async move {
                    if let BusEvent::PaymentCompleted {
                        reservation_id,
                        amount_cents,
                        ..
                    } = event
                    {
                        match invoices.find_by_reservation(reservation_id).await {
                            Ok(Some(invoice)) => tracing::info!(
                                invoice_number = %invoice.number,
                                reservation_id = %reservation_id,
                                amount_cents,
                                "Payment settled against invoice"
                            ),
                            Ok(None) => tracing::warn!(
                                reservation_id = %reservation_id,
                                "Payment completed but no invoice on record"
                            ),
                            Err(e) => return Err(event_bus::BusError(e.to_string())),
                        }
                    }
                    Ok(())
                }
            })
            .await;
    }
}

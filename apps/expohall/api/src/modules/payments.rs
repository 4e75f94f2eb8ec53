//! Payments module: webhook ingestion and transaction administration.

use super::FeatureModule;
use crate::api::require_admin;
use crate::state::AppState;
use axum::Router;

pub struct PaymentsModule;

#[async_trait::async_trait]
impl FeatureModule for PaymentsModule {
    fn name(&self) -> &'static str {
        "payments"
    }

    fn prefix(&self) -> &'static str {
        "/payments"
    }

    fn routes(&self, state: &AppState) -> Router {
        // The webhook authenticates by signature, not bearer token
        let webhook = domain_payments::handlers::webhook_router(
            state.payments.clone(),
            state.webhook_verifier.clone(),
        );

        let admin = require_admin(
            domain_payments::handlers::admin_router(state.payments.clone()),
            state,
        );

        webhook.merge(admin)
    }
}

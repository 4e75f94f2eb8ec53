//! Sales module: booth browsing, holds, and the purchase flow.

use super::FeatureModule;
use crate::api::require_auth;
use crate::state::AppState;
use axum::Router;

pub struct SalesModule;

#[async_trait::async_trait]
impl FeatureModule for SalesModule {
    fn name(&self) -> &'static str {
        "sales"
    }

    fn prefix(&self) -> &'static str {
        "/sales"
    }

    fn depends_on(&self) -> &'static [&'static str] {
        // Purchase and confirm-payment go through the payment coordinator
        &["payments"]
    }

    fn routes(&self, state: &AppState) -> Router {
        let browse = domain_booths::handlers::availability_router(state.booths.clone());

        let transact = Router::new()
            .merge(domain_reservations::handlers::sales_router(
                state.reservations.clone(),
            ))
            .merge(domain_payments::handlers::sales_router(
                state.payments.clone(),
            ));

        browse.merge(require_auth(transact, state))
    }
}

//! Shared application state handed to route builders and modules.
//!
//! Cloning is cheap: every field is an Arc-backed handle.

use axum_helpers::JwtAuth;
use domain_booths::BoothStore;
use domain_events::EventService;
use domain_invoices::InvoiceService;
use domain_payments::{PaymentCoordinator, WebhookVerifier};
use domain_reservations::ReservationEngine;
use database::postgres::DatabaseConnection;
use domain_users::UserService;
use event_bus::EventBus;
use realtime::Broadcaster;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub jwt: JwtAuth,
    /// In-process event bus; injected into modules, never a global
    pub bus: EventBus,
    /// WebSocket room registry for booth-status pushes
    pub broadcaster: Broadcaster,
    pub users: UserService,
    pub events: EventService,
    pub booths: BoothStore,
    pub reservations: ReservationEngine,
    pub payments: PaymentCoordinator,
    pub invoices: InvoiceService,
    pub webhook_verifier: WebhookVerifier,
}

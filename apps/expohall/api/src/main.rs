use axum_helpers::server::{create_production_app, health_router};
use axum_helpers::JwtAuth;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_booths::{BoothStore, PgBoothRepository, PgFloorPlanRepository};
use domain_events::{EventService, PgEventRepository};
use domain_invoices::{InvoiceService, PgInvoiceRepository};
use domain_payments::processor::remote::RemoteProcessorConfig;
use domain_payments::{
    MockProcessor, PaymentCoordinator, PaymentProcessor, PgTransactionRepository, RemoteProcessor,
    WebhookVerifier,
};
use domain_reservations::sweeper::register_expiry_sweep;
use domain_reservations::{PgReservationRepository, ReservationEngine};
use domain_users::{PgUserRepository, UserService};
use email::{Mailer, MockEmailProvider, SmtpProvider};
use event_bus::{topics, BusEvent, EventBus};
use realtime::{Broadcaster, StatusUpdate};
use std::sync::Arc;
use std::time::Duration;
use tokio_cron_scheduler::JobScheduler;
use tracing::info;

use expohall_api::api;
use expohall_api::config::{Config, EmailMode, ProcessorMode};
use expohall_api::modules::ModuleRegistry;
use expohall_api::openapi;
use expohall_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // color-eyre first so every startup error below renders usefully
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let jwt = JwtAuth::new(&config.jwt);
    let bus = EventBus::new();
    let broadcaster = Broadcaster::new();

    // Status changes fan out to subscribed WebSocket rooms
    {
        let broadcaster = broadcaster.clone();
        bus.subscribe(topics::BOOTH_STATUS_CHANGED, "realtime", move |event| {
            let broadcaster = broadcaster.clone();
            async move {
                if let BusEvent::BoothStatusChanged {
                    booth_id,
                    event_id,
                    status,
                } = event
                {
                    broadcaster
                        .publish(StatusUpdate {
                            event_id,
                            booth_id,
                            status,
                        })
                        .await;
                }
                Ok(())
            }
        })
        .await;
    }

    let mailer = build_mailer(&config);

    let users = UserService::new(Arc::new(PgUserRepository::new(db.clone())), jwt.clone());
    let events = EventService::new(Arc::new(PgEventRepository::new(db.clone())));
    let booths = BoothStore::new(
        Arc::new(PgBoothRepository::new(db.clone())),
        Arc::new(PgFloorPlanRepository::new(db.clone())),
    );
    let reservations = ReservationEngine::new(
        Arc::new(PgReservationRepository::new(db.clone())),
        booths.clone(),
        bus.clone(),
        mailer,
    );

    let processor: Arc<dyn PaymentProcessor> = match config.payment.mode {
        ProcessorMode::Mock => {
            info!("Payment processor: in-memory mock");
            Arc::new(MockProcessor::new())
        }
        ProcessorMode::Remote => {
            info!(url = %config.payment.base_url, "Payment processor: remote");
            Arc::new(
                RemoteProcessor::new(RemoteProcessorConfig {
                    base_url: config.payment.base_url.clone(),
                    secret_key: config.payment.secret_key.clone(),
                })
                .map_err(|e| eyre::eyre!("Payment processor init failed: {}", e))?,
            )
        }
    };

    let invoices = InvoiceService::new(Arc::new(PgInvoiceRepository::new(db.clone())));
    let payments = PaymentCoordinator::new(
        Arc::new(PgTransactionRepository::new(db.clone())),
        processor,
        reservations.clone(),
        invoices.clone(),
        booths.clone(),
        bus.clone(),
    );
    let webhook_verifier = WebhookVerifier::new(config.payment.webhook_secret.clone());

    let state = AppState {
        config,
        db,
        jwt,
        bus,
        broadcaster,
        users,
        events,
        booths,
        reservations: reservations.clone(),
        payments,
        invoices,
        webhook_verifier,
    };

    // Static module registry: flags decide what actually mounts
    let (registry, module_router) = ModuleRegistry::load(&state).await;
    info!(modules = ?registry.loaded_names(), "Feature modules loaded");

    let api_routes = api::routes(&state).merge(module_router);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()))
        .merge(api::ws_router(&state));

    // Hygiene sweep for lapsed holds; reads stay lazily correct without it
    let mut scheduler = JobScheduler::new()
        .await
        .map_err(|e| eyre::eyre!("Scheduler init failed: {}", e))?;
    register_expiry_sweep(&scheduler, reservations, &state.config.sweep_schedule)
        .await
        .map_err(|e| eyre::eyre!("Sweep registration failed: {}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| eyre::eyre!("Scheduler start failed: {}", e))?;

    info!("Starting expohall API");

    let cleanup_state = state.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            registry.shutdown().await;

            if let Err(e) = scheduler.shutdown().await {
                tracing::error!(error = %e, "Scheduler shutdown failed");
            }

            match cleanup_state.db.clone().close().await {
                Ok(_) => info!("PostgreSQL connection closed"),
                Err(e) => tracing::error!(error = %e, "Error closing PostgreSQL"),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Expohall API shutdown complete");
    Ok(())
}

/// Best-effort mailer; startup continues without one
fn build_mailer(config: &Config) -> Option<Mailer> {
    let provider: Arc<dyn email::EmailProvider> = match config.email_mode {
        EmailMode::Smtp => match SmtpProvider::from_env() {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                tracing::warn!(error = %e, "SMTP setup failed; notifications disabled");
                return None;
            }
        },
        EmailMode::Mock => {
            info!("Email provider: capture-only mock");
            Arc::new(MockEmailProvider::new())
        }
    };

    match Mailer::new(provider) {
        Ok(mailer) => Some(mailer),
        Err(e) => {
            tracing::warn!(error = %e, "Mailer setup failed; notifications disabled");
            None
        }
    }
}

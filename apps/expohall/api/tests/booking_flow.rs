//! End-to-end booking flow against a real PostgreSQL container.

use axum_helpers::{JwtAuth, JwtConfig};
use chrono::Utc;
use domain_booths::{
    BoothSize, BoothStatus, BoothStore, CreateBooth, PgBoothRepository, PgFloorPlanRepository,
};
use domain_events::{CreateEvent, PgEventRepository};
use domain_events::repository::EventRepository;
use domain_invoices::{InvoiceService, InvoiceStatus, PgInvoiceRepository};
use domain_payments::models::{WebhookEvent, WebhookEventData};
use domain_payments::{
    MockProcessor, PaymentCoordinator, PgTransactionRepository, TransactionStatus, WebhookVerifier,
};
use domain_reservations::{
    ExhibitorInfo, PgReservationRepository, ReservationEngine, ReservationStatus, ReserveBooth,
};
use domain_users::repository::UserRepository;
use domain_users::{PgUserRepository, RegisterUser, UserService};
use event_bus::{topics, BusEvent, EventBus};
use expohall_api::api;
use expohall_api::config::{Config, EmailMode, ModuleFlags, PaymentConfig, ProcessorMode};
use expohall_api::modules::ModuleRegistry;
use expohall_api::state::AppState;
use realtime::{Broadcaster, StatusUpdate};
use std::sync::Arc;
use test_utils::TestDatabase;
use tower::ServiceExt;
use uuid::Uuid;

struct Stack {
    db: TestDatabase,
    state: AppState,
    processor: MockProcessor,
    exhibitor: ExhibitorInfo,
    event_id: Uuid,
    booth_id: Uuid,
}

fn test_config(database_url: &str, flags: ModuleFlags) -> Config {
    Config {
        app: core_config::AppInfo {
            name: "expohall-api-test",
            version: "0.0.0",
        },
        server: core_config::server::ServerConfig::default(),
        database: database::postgres::PostgresConfig::new(database_url),
        jwt: JwtConfig::new("integration-test-secret"),
        payment: PaymentConfig {
            mode: ProcessorMode::Mock,
            base_url: String::new(),
            secret_key: String::new(),
            webhook_secret: "whsec_test".to_string(),
        },
        email_mode: EmailMode::Mock,
        modules: flags,
        sweep_schedule: "0 * * * * *".to_string(),
        environment: core_config::Environment::Development,
    }
}

async fn stack(flags: ModuleFlags) -> Stack {
    let db = TestDatabase::new().await;
    let conn = db.connection();
    let config = test_config(&db.connection_string, flags);

    let jwt = JwtAuth::new(&config.jwt);
    let bus = EventBus::new();
    let broadcaster = Broadcaster::new();

    // Same glue the binary wires: status changes reach the room registry
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

    let users = UserService::new(Arc::new(PgUserRepository::new(conn.clone())), jwt.clone());
    let events = domain_events::EventService::new(Arc::new(PgEventRepository::new(conn.clone())));
    let booths = BoothStore::new(
        Arc::new(PgBoothRepository::new(conn.clone())),
        Arc::new(PgFloorPlanRepository::new(conn.clone())),
    );
    let reservations = ReservationEngine::new(
        Arc::new(PgReservationRepository::new(conn.clone())),
        booths.clone(),
        bus.clone(),
        None,
    );
    let processor = MockProcessor::new();
    let invoices = InvoiceService::new(Arc::new(PgInvoiceRepository::new(conn.clone())));
    let payments = PaymentCoordinator::new(
        Arc::new(PgTransactionRepository::new(conn.clone())),
        Arc::new(processor.clone()),
        reservations.clone(),
        invoices.clone(),
        booths.clone(),
        bus.clone(),
    );

    let user = PgUserRepository::new(conn.clone())
        .create(
            RegisterUser {
                email: format!("ex-{}@example.com", Uuid::new_v4().simple()),
                name: "Exhibitor".to_string(),
                password: "irrelevant-here".to_string(),
                company: None,
            },
            "not-a-real-hash".to_string(),
        )
        .await
        .expect("seed user");

    let event = PgEventRepository::new(conn.clone())
        .create(CreateEvent {
            name: "Spring Expo".to_string(),
            description: String::new(),
            starts_at: Utc::now() + chrono::Duration::days(30),
            ends_at: Utc::now() + chrono::Duration::days(33),
            venue: "Hall 4".to_string(),
        })
        .await
        .expect("seed event");

    let booth = booths
        .create_booth(CreateBooth {
            event_id: event.id,
            number: "B-07".to_string(),
            size: BoothSize::Standard,
            price_cents: 50_000, // the $500 booth
            position_x: 0,
            position_y: 0,
            width: 2,
            height: 2,
            description: String::new(),
            amenities: String::new(),
        })
        .await
        .expect("seed booth");

    let state = AppState {
        config,
        db: conn,
        jwt,
        bus,
        broadcaster,
        users,
        events,
        booths,
        reservations,
        payments,
        invoices,
        webhook_verifier: WebhookVerifier::new("whsec_test"),
    };

    Stack {
        db,
        state,
        processor,
        exhibitor: ExhibitorInfo {
            id: user.id,
            email: user.email,
            name: user.name,
        },
        event_id: event.id,
        booth_id: booth.id,
    }
}

fn all_modules_on() -> ModuleFlags {
    ModuleFlags::fixed(vec![
        ("sales", true),
        ("payments", true),
        ("invoicing", true),
        ("monitoring", true),
    ])
}

#[tokio::test]
async fn reserve_purchase_confirm_round_trip() {
    let s = stack(all_modules_on()).await;
    let _keep_alive = &s.db;

    // Hold the booth
    let reservation = s
        .state
        .reservations
        .reserve(
            ReserveBooth {
                booth_id: s.booth_id,
                event_id: s.event_id,
            },
            s.exhibitor.clone(),
            15,
        )
        .await
        .unwrap();

    assert_eq!(reservation.status, ReservationStatus::Pending);
    let expires_at = reservation.expires_at.expect("hold must carry a deadline");
    let minutes_left = (expires_at - Utc::now()).num_minutes();
    assert!((14..=15).contains(&minutes_left), "hold is ~15 minutes");

    let booth = s.state.booths.get_booth(s.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Reserved);

    // Open the payment intent
    let intent = s
        .state
        .payments
        .create_intent(reservation.id, &s.exhibitor.email, &s.exhibitor.name)
        .await
        .unwrap();

    assert_eq!(intent.amount_cents, 50_000);
    assert_eq!(intent.currency, "usd");
    assert!(intent.client_secret.is_some());

    // A second purchase call reuses the same intent
    let again = s
        .state
        .payments
        .create_intent(reservation.id, &s.exhibitor.email, &s.exhibitor.name)
        .await
        .unwrap();
    assert_eq!(again.payment_intent_id, intent.payment_intent_id);

    // The processor settles; both confirm paths race, both succeed
    s.processor.mark_succeeded(&intent.payment_intent_id).await;

    let outcome = s
        .state
        .payments
        .confirm_from_processor(&intent.payment_intent_id)
        .await
        .unwrap();
    let replay = s
        .state
        .payments
        .confirm_from_processor(&intent.payment_intent_id)
        .await
        .unwrap();

    assert_eq!(outcome.transaction.status, TransactionStatus::Completed);
    assert_eq!(outcome.reservation.status, ReservationStatus::Confirmed);
    assert_eq!(outcome.invoice.status, InvoiceStatus::Paid);
    assert_eq!(outcome.invoice.total_cents, 50_000);

    // Replay lands on the same invoice, not a duplicate
    assert_eq!(replay.invoice.id, outcome.invoice.id);

    let booth = s.state.booths.get_booth(s.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Booked);

    let invoices = s.state.invoices.list_invoices(None).await.unwrap();
    assert_eq!(invoices.len(), 1);
}

#[tokio::test]
async fn cancellation_webhook_releases_hold_and_broadcasts() {
    let s = stack(all_modules_on()).await;
    let _keep_alive = &s.db;

    // A client sitting in the exhibition event's room
    let mut room_rx = s.state.broadcaster.subscribe(s.event_id).await;
    // Drain the reserve-time status push later; first reserve and purchase
    let reservation = s
        .state
        .reservations
        .reserve(
            ReserveBooth {
                booth_id: s.booth_id,
                event_id: s.event_id,
            },
            s.exhibitor.clone(),
            15,
        )
        .await
        .unwrap();

    let intent = s
        .state
        .payments
        .create_intent(reservation.id, &s.exhibitor.email, &s.exhibitor.name)
        .await
        .unwrap();

    // The exhibitor abandons checkout; the processor tells us via webhook
    s.state
        .payments
        .handle_webhook_event(WebhookEvent {
            id: "evt_cancel".to_string(),
            event_type: "payment_intent.canceled".to_string(),
            data: WebhookEventData {
                intent_id: intent.payment_intent_id.clone(),
                reason: None,
            },
        })
        .await
        .unwrap();

    let row = s
        .state
        .reservations
        .get_reservation(reservation.id)
        .await
        .unwrap();
    assert_eq!(row.status, ReservationStatus::Cancelled);

    let booth = s.state.booths.get_booth(s.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Available);

    // Room members saw reserved then available, in order
    let first = room_rx.recv().await.unwrap();
    assert_eq!(first.status, "reserved");
    let second = room_rx.recv().await.unwrap();
    assert_eq!(second.status, "available");
    assert_eq!(second.booth_id, s.booth_id);
}

#[tokio::test]
async fn disabled_sales_module_answers_503_without_touching_the_store() {
    let flags = ModuleFlags::fixed(vec![
        ("sales", false),
        ("payments", true),
        ("invoicing", true),
        ("monitoring", true),
    ]);
    let s = stack(flags).await;
    let _keep_alive = &s.db;

    let (_registry, module_router) = ModuleRegistry::load(&s.state).await;
    let router = api::routes(&s.state).merge(module_router);

    let response = router
        .oneshot(
            axum::http::Request::builder()
                .uri(format!("/sales/booths?event_id={}", s.event_id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "MODULE_DISABLED");
}

#[tokio::test]
async fn dependency_gating_disables_dependents() {
    // payments off must take sales (which depends on it) down too
    let flags = ModuleFlags::fixed(vec![
        ("sales", true),
        ("payments", false),
        ("invoicing", true),
        ("monitoring", true),
    ]);
    let s = stack(flags).await;
    let _keep_alive = &s.db;

    let (registry, module_router) = ModuleRegistry::load(&s.state).await;
    assert!(!registry.loaded_names().contains(&"sales"));
    assert!(!registry.loaded_names().contains(&"payments"));
    assert!(registry.loaded_names().contains(&"monitoring"));

    let router = api::routes(&s.state).merge(module_router);
    let response = router
        .oneshot(
            axum::http::Request::builder()
                .uri(format!("/sales/booths?event_id={}", s.event_id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    );
}

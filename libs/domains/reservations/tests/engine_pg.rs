//! Engine integration tests against a real PostgreSQL container.
//!
//! These exercise the serialized reserve transaction and the lazy-expiry
//! read contract, which mocks cannot meaningfully cover.

use chrono::Utc;
use domain_booths::{BoothSize, BoothStatus, BoothStore, CreateBooth, PgBoothRepository, PgFloorPlanRepository};
use domain_events::{CreateEvent, PgEventRepository};
use domain_events::repository::EventRepository;
use domain_reservations::{
    ExhibitorInfo, PgReservationRepository, Reservation, ReservationEngine, ReservationError,
    ReservationStatus, ReserveBooth,
};
use domain_users::repository::UserRepository;
use domain_users::{PgUserRepository, RegisterUser};
use event_bus::EventBus;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use test_utils::TestDatabase;
use uuid::Uuid;

struct Harness {
    /// Keeps the container alive for the test's duration
    db: TestDatabase,
    engine: ReservationEngine,
    booths: BoothStore,
    exhibitor: ExhibitorInfo,
    event_id: Uuid,
    booth_id: Uuid,
}

async fn harness() -> Harness {
    let db = TestDatabase::new().await;
    let conn = db.connection();

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

    let booths = BoothStore::new(
        Arc::new(PgBoothRepository::new(conn.clone())),
        Arc::new(PgFloorPlanRepository::new(conn.clone())),
    );
    let booth = booths
        .create_booth(CreateBooth {
            event_id: event.id,
            number: "A-01".to_string(),
            size: BoothSize::Standard,
            price_cents: 50_000,
            position_x: 0,
            position_y: 0,
            width: 2,
            height: 2,
            description: String::new(),
            amenities: String::new(),
        })
        .await
        .expect("seed booth");

    let engine = ReservationEngine::new(
        Arc::new(PgReservationRepository::new(conn.clone())),
        booths.clone(),
        EventBus::new(),
        None,
    );

    Harness {
        db,
        engine,
        booths,
        exhibitor: ExhibitorInfo {
            id: user.id,
            email: user.email,
            name: user.name,
        },
        event_id: event.id,
        booth_id: booth.id,
    }
}

/// Backdate a hold so the lazy-expiry predicate sees it as lapsed without
/// any status column changing.
async fn backdate_hold(conn: &DatabaseConnection, reservation: &Reservation) {
    use domain_reservations::entity;

    entity::Entity::update_many()
        .col_expr(
            entity::Column::ExpiresAt,
            Expr::value(Utc::now() - chrono::Duration::minutes(1)),
        )
        .filter(entity::Column::Id.eq(reservation.id))
        .exec(conn)
        .await
        .expect("backdate hold");
}

#[tokio::test]
async fn concurrent_reserves_yield_exactly_one_winner() {
    let h = harness().await;

    let attempts = 6;
    let futures = (0..attempts).map(|_| {
        let engine = h.engine.clone();
        let exhibitor = h.exhibitor.clone();
        let input = ReserveBooth {
            booth_id: h.booth_id,
            event_id: h.event_id,
        };
        tokio::spawn(async move { engine.reserve(input, exhibitor, 15).await })
    });

    let outcomes: Vec<_> = futures::future::join_all(futures)
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one reserve may win");

    for outcome in &outcomes {
        if let Err(e) = outcome {
            assert!(
                matches!(
                    e,
                    ReservationError::BoothReserved | ReservationError::BoothUnavailable
                ),
                "losers get a business-rule error, got: {e}"
            );
        }
    }

    let booth = h.booths.get_booth(h.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Reserved);
}

#[tokio::test]
async fn lapsed_hold_is_ignored_at_read_time_and_reclaimable() {
    let h = harness().await;
    let conn = h.db.connection();

    let first = h
        .engine
        .reserve(
            ReserveBooth {
                booth_id: h.booth_id,
                event_id: h.event_id,
            },
            h.exhibitor.clone(),
            15,
        )
        .await
        .unwrap();

    assert!(h.engine.is_booth_reserved(h.booth_id).await.unwrap());

    backdate_hold(&conn, &first).await;

    // No sweeper ran: the row still says pending, the booth still says
    // reserved, yet the predicate must report the booth free.
    assert!(!h.engine.is_booth_reserved(h.booth_id).await.unwrap());

    let second = h
        .engine
        .reserve(
            ReserveBooth {
                booth_id: h.booth_id,
                event_id: h.event_id,
            },
            h.exhibitor.clone(),
            15,
        )
        .await
        .expect("lapsed hold must be reclaimable");

    assert_ne!(second.id, first.id);
    assert_eq!(second.status, ReservationStatus::Pending);

    // Confirming the stale hold now fails and writes the expiry back lazily
    let err = h.engine.confirm(first.id).await.unwrap_err();
    assert!(matches!(err, ReservationError::Expired));
    let stale = h.engine.get_reservation(first.id).await.unwrap();
    assert_eq!(stale.status, ReservationStatus::Expired);

    // The newer hold is untouched by the stale one's expiry
    assert!(h.engine.is_booth_reserved(h.booth_id).await.unwrap());
    let booth = h.booths.get_booth(h.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Reserved);
}

#[tokio::test]
async fn confirm_is_idempotent_against_the_database() {
    let h = harness().await;

    let reservation = h
        .engine
        .reserve(
            ReserveBooth {
                booth_id: h.booth_id,
                event_id: h.event_id,
            },
            h.exhibitor.clone(),
            15,
        )
        .await
        .unwrap();

    let first = h.engine.confirm(reservation.id).await.unwrap();
    let second = h.engine.confirm(reservation.id).await.unwrap();

    assert_eq!(first.status, ReservationStatus::Confirmed);
    assert_eq!(second.status, ReservationStatus::Confirmed);
    assert_eq!(first.confirmed_at, second.confirmed_at);

    let booth = h.booths.get_booth(h.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Booked);
}

#[tokio::test]
async fn cancel_releases_the_booth() {
    let h = harness().await;

    let reservation = h
        .engine
        .reserve(
            ReserveBooth {
                booth_id: h.booth_id,
                event_id: h.event_id,
            },
            h.exhibitor.clone(),
            15,
        )
        .await
        .unwrap();

    let cancelled = h.engine.cancel(reservation.id).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    let booth = h.booths.get_booth(h.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Available);

    // The booth is immediately sellable again
    h.engine
        .reserve(
            ReserveBooth {
                booth_id: h.booth_id,
                event_id: h.event_id,
            },
            h.exhibitor.clone(),
            15,
        )
        .await
        .expect("cancelled booth must be reservable");
}

#[tokio::test]
async fn sweep_marks_stale_rows_and_frees_booths() {
    let h = harness().await;
    let conn = h.db.connection();

    let reservation = h
        .engine
        .reserve(
            ReserveBooth {
                booth_id: h.booth_id,
                event_id: h.event_id,
            },
            h.exhibitor.clone(),
            15,
        )
        .await
        .unwrap();

    backdate_hold(&conn, &reservation).await;

    let swept = h.engine.sweep_expired().await.unwrap();
    assert_eq!(swept, 1);

    let row = h.engine.get_reservation(reservation.id).await.unwrap();
    assert_eq!(row.status, ReservationStatus::Expired);

    let booth = h.booths.get_booth(h.booth_id).await.unwrap();
    assert_eq!(booth.status, BoothStatus::Available);

    // Second sweep finds nothing
    assert_eq!(h.engine.sweep_expired().await.unwrap(), 0);
}

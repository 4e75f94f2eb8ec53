use chrono::{Duration, Utc};
use domain_booths::{BoothStatus, BoothStore};
use email::Mailer;
use event_bus::{BusEvent, EventBus};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ReservationError, ReservationResult};
use crate::models::{ExhibitorInfo, Reservation, ReservationStatus, ReserveBooth};
use crate::repository::ReservationRepository;

/// The reservation engine: creates, confirms, cancels, and expires holds.
///
/// Owns the reservation lifecycle and is the only writer of booth-status
/// transitions triggered by reservation events.
#[derive(Clone)]
pub struct ReservationEngine {
    repository: Arc<dyn ReservationRepository>,
    booths: BoothStore,
    bus: EventBus,
    mailer: Option<Mailer>,
}

impl ReservationEngine {
    pub fn new(
        repository: Arc<dyn ReservationRepository>,
        booths: BoothStore,
        bus: EventBus,
        mailer: Option<Mailer>,
    ) -> Self {
        Self {
            repository,
            booths,
            bus,
            mailer,
        }
    }

    /// Place a time-bounded hold on a booth.
    ///
    /// The exclusivity check and the booth transition run inside one
    /// serialized repository transaction; concurrent requests for the same
    /// booth resolve to exactly one winner.
    #[instrument(skip(self, input, exhibitor), fields(booth_id = %input.booth_id, exhibitor_id = %exhibitor.id))]
    pub async fn reserve(
        &self,
        input: ReserveBooth,
        exhibitor: ExhibitorInfo,
        hold_minutes: i64,
    ) -> ReservationResult<Reservation> {
        if hold_minutes <= 0 {
            return Err(ReservationError::Validation(
                "Hold duration must be positive".to_string(),
            ));
        }

        let expires_at = Utc::now() + Duration::minutes(hold_minutes);
        let reservation = self
            .repository
            .reserve(input.booth_id, input.event_id, exhibitor.id, expires_at)
            .await?;

        self.bus
            .emit_async(BusEvent::BoothReserved {
                reservation_id: reservation.id,
                booth_id: reservation.booth_id,
                event_id: reservation.event_id,
                exhibitor_id: reservation.exhibitor_id,
                expires_at: reservation.expires_at,
            })
            .await;
        self.emit_status_changed(reservation.booth_id, reservation.event_id, BoothStatus::Reserved)
            .await;

        // Best-effort notification; a failed email never unwinds the hold
        if let Some(mailer) = self.mailer.clone() {
            let booths = self.booths.clone();
            let reservation_snapshot = reservation.clone();
            tokio::spawn(async move {
                let booth_number = booths
                    .get_booth(reservation_snapshot.booth_id)
                    .await
                    .map(|b| b.number)
                    .unwrap_or_else(|_| "?".to_string());

                if let Err(e) = mailer
                    .send_reservation_held(
                        &exhibitor.email,
                        &exhibitor.name,
                        &booth_number,
                        reservation_snapshot.expires_at,
                    )
                    .await
                {
                    tracing::warn!(
                        reservation_id = %reservation_snapshot.id,
                        error = %e,
                        "Reservation hold email failed"
                    );
                }
            });
        }

        Ok(reservation)
    }

    /// Confirm a pending reservation after successful payment.
    ///
    /// Idempotent merge keyed by reservation id: the polling confirm path and
    /// the webhook path can both call this and exactly one of them performs
    /// the transition; the other observes `confirmed` and succeeds as a
    /// no-op.
    #[instrument(skip(self), fields(reservation_id = %id))]
    pub async fn confirm(&self, id: Uuid) -> ReservationResult<Reservation> {
        let now = Utc::now();

        if self.repository.confirm_pending(id, now).await? > 0 {
            let reservation = self.get_reservation(id).await?;

            self.booths
                .transition(reservation.booth_id, BoothStatus::Booked)
                .await?;
            self.bus
                .emit_async(BusEvent::BoothBooked {
                    reservation_id: reservation.id,
                    booth_id: reservation.booth_id,
                    event_id: reservation.event_id,
                    exhibitor_id: reservation.exhibitor_id,
                })
                .await;
            self.emit_status_changed(
                reservation.booth_id,
                reservation.event_id,
                BoothStatus::Booked,
            )
            .await;

            tracing::info!(reservation_id = %id, "Reservation confirmed");
            return Ok(reservation);
        }

        // Lost the conditional update: decide why from the row itself
        let reservation = self.get_reservation(id).await?;
        match reservation.status {
            ReservationStatus::Confirmed => Ok(reservation),
            ReservationStatus::Pending => {
                // Only a lapsed deadline makes a pending row ineligible
                self.expire_now(&reservation).await?;
                Err(ReservationError::Expired)
            }
            other => Err(ReservationError::InvalidState(other.to_string())),
        }
    }

    /// Cancel a pending hold and release its booth.
    ///
    /// Cancelling a confirmed reservation is a refund/unwind flow this engine
    /// does not perform.
    #[instrument(skip(self), fields(reservation_id = %id))]
    pub async fn cancel(&self, id: Uuid) -> ReservationResult<Reservation> {
        let reservation = self.get_reservation(id).await?;

        if reservation.is_hold_lapsed(Utc::now()) {
            self.expire_now(&reservation).await?;
            return Err(ReservationError::Expired);
        }

        if self.repository.cancel_pending(id).await? == 0 {
            let current = self.get_reservation(id).await?;
            return Err(ReservationError::InvalidState(current.status.to_string()));
        }

        self.booths
            .transition(reservation.booth_id, BoothStatus::Available)
            .await?;
        self.bus
            .emit_async(BusEvent::BoothReleased {
                reservation_id: reservation.id,
                booth_id: reservation.booth_id,
                event_id: reservation.event_id,
            })
            .await;
        self.emit_status_changed(
            reservation.booth_id,
            reservation.event_id,
            BoothStatus::Available,
        )
        .await;

        tracing::info!(reservation_id = %id, "Reservation cancelled");
        self.get_reservation(id).await
    }

    pub async fn get_reservation(&self, id: Uuid) -> ReservationResult<Reservation> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound(id))
    }

    pub async fn my_reservations(&self, exhibitor_id: Uuid) -> ReservationResult<Vec<Reservation>> {
        self.repository.list_by_exhibitor(exhibitor_id).await
    }

    pub async fn list_reservations(
        &self,
        limit: u64,
        offset: u64,
    ) -> ReservationResult<Vec<Reservation>> {
        self.repository.list(limit, offset).await
    }

    /// Whether a booth is blocked under the lazy-expiry predicate
    pub async fn is_booth_reserved(&self, booth_id: Uuid) -> ReservationResult<bool> {
        Ok(self
            .repository
            .find_active_for_booth(booth_id, Utc::now())
            .await?
            .is_some())
    }

    /// Hygiene sweep: physically mark lapsed pending rows expired and free
    /// their booths. Read paths never rely on this; the lazy predicate
    /// already treats these rows as inactive.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> ReservationResult<usize> {
        let now = Utc::now();
        let stale = self.repository.find_stale_pending(now).await?;
        let mut swept = 0;

        for reservation in stale {
            if self.repository.expire_pending(reservation.id, now).await? == 0 {
                continue; // someone confirmed, cancelled, or swept it first
            }
            swept += 1;
            self.release_after_expiry(&reservation).await?;
        }

        if swept > 0 {
            tracing::info!(count = swept, "Swept expired reservation holds");
        }
        Ok(swept)
    }

    /// Lazy expiry acting on a single row during a read-triggered operation
    async fn expire_now(&self, reservation: &Reservation) -> ReservationResult<()> {
        if self
            .repository
            .expire_pending(reservation.id, Utc::now())
            .await?
            > 0
        {
            self.release_after_expiry(reservation).await?;
        }
        Ok(())
    }

    async fn release_after_expiry(&self, reservation: &Reservation) -> ReservationResult<()> {
        // The booth may already carry a newer hold (reclaim path); only
        // release when nothing active remains and the status still says
        // reserved.
        let still_blocked = self
            .repository
            .find_active_for_booth(reservation.booth_id, Utc::now())
            .await?
            .is_some();

        if !still_blocked
            && self
                .booths
                .transition_if(
                    reservation.booth_id,
                    BoothStatus::Reserved,
                    BoothStatus::Available,
                )
                .await?
        {
            self.emit_status_changed(
                reservation.booth_id,
                reservation.event_id,
                BoothStatus::Available,
            )
            .await;
        }

        self.bus
            .emit_async(BusEvent::ReservationExpired {
                reservation_id: reservation.id,
                booth_id: reservation.booth_id,
                event_id: reservation.event_id,
            })
            .await;

        Ok(())
    }

    async fn emit_status_changed(&self, booth_id: Uuid, event_id: Uuid, status: BoothStatus) {
        self.bus
            .emit_async(BusEvent::BoothStatusChanged {
                booth_id,
                event_id,
                status: status.to_string(),
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockReservationRepository;
    use chrono::DateTime;
    use domain_booths::repository::{MockBoothRepository, MockFloorPlanRepository};
    use domain_booths::{Booth, BoothSize};
    use event_bus::topics;

    fn booth_store(mock: MockBoothRepository) -> BoothStore {
        BoothStore::new(Arc::new(mock), Arc::new(MockFloorPlanRepository::new()))
    }

    fn sample_booth(id: Uuid, status: BoothStatus) -> Booth {
        Booth {
            id,
            event_id: Uuid::new_v4(),
            number: "A-01".to_string(),
            size: BoothSize::Standard,
            price_cents: 50_000,
            status,
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

    fn sample_reservation(status: ReservationStatus, expires_at: Option<DateTime<Utc>>) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            booth_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            exhibitor_id: Uuid::new_v4(),
            status,
            expires_at,
            confirmed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn reserve_emits_reserved_and_status_changed() {
        let reservation = sample_reservation(
            ReservationStatus::Pending,
            Some(Utc::now() + Duration::minutes(15)),
        );
        let returned = reservation.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_reserve()
            .returning(move |_, _, _, _| Ok(returned.clone()));

        let bus = EventBus::new();
        let engine = ReservationEngine::new(
            Arc::new(repo),
            booth_store(MockBoothRepository::new()),
            bus.clone(),
            None,
        );

        let held = engine
            .reserve(
                ReserveBooth {
                    booth_id: reservation.booth_id,
                    event_id: reservation.event_id,
                },
                ExhibitorInfo {
                    id: reservation.exhibitor_id,
                    email: "ex@example.com".to_string(),
                    name: "Exhibitor".to_string(),
                },
                15,
            )
            .await
            .unwrap();

        assert_eq!(held.status, ReservationStatus::Pending);
        assert_eq!(bus.history(topics::BOOTH_RESERVED).await.len(), 1);
        assert_eq!(bus.history(topics::BOOTH_STATUS_CHANGED).await.len(), 1);
    }

    #[tokio::test]
    async fn confirm_is_idempotent_for_confirmed_reservation() {
        let mut reservation = sample_reservation(ReservationStatus::Confirmed, None);
        reservation.confirmed_at = Some(Utc::now());
        let fetched = reservation.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_confirm_pending().returning(|_, _| Ok(0));
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));

        let bus = EventBus::new();
        let engine = ReservationEngine::new(
            Arc::new(repo),
            booth_store(MockBoothRepository::new()),
            bus.clone(),
            None,
        );

        let confirmed = engine.confirm(reservation.id).await.unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
        // No-op confirm must not re-book the booth or re-announce it
        assert!(bus.history(topics::BOOTH_BOOKED).await.is_empty());
    }

    #[tokio::test]
    async fn confirm_books_booth_on_first_transition() {
        let mut reservation = sample_reservation(
            ReservationStatus::Confirmed,
            Some(Utc::now() + Duration::minutes(10)),
        );
        reservation.confirmed_at = Some(Utc::now());
        let booth_id = reservation.booth_id;
        let fetched = reservation.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_confirm_pending().returning(|_, _| Ok(1));
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));

        let mut booths = MockBoothRepository::new();
        booths
            .expect_set_status()
            .withf(move |id, status| *id == booth_id && *status == BoothStatus::Booked)
            .returning(|id, status| Ok(Some(sample_booth(id, status))));

        let bus = EventBus::new();
        let engine =
            ReservationEngine::new(Arc::new(repo), booth_store(booths), bus.clone(), None);

        engine.confirm(reservation.id).await.unwrap();
        assert_eq!(bus.history(topics::BOOTH_BOOKED).await.len(), 1);
    }

    #[tokio::test]
    async fn confirm_of_lapsed_hold_reports_expired_and_frees_booth() {
        let reservation = sample_reservation(
            ReservationStatus::Pending,
            Some(Utc::now() - Duration::minutes(1)),
        );
        let fetched = reservation.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_confirm_pending().returning(|_, _| Ok(0));
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_expire_pending().returning(|_, _| Ok(1));
        repo.expect_find_active_for_booth().returning(|_, _| Ok(None));

        let mut booths = MockBoothRepository::new();
        booths
            .expect_set_status_if()
            .withf(|_, from, to| *from == BoothStatus::Reserved && *to == BoothStatus::Available)
            .returning(|_, _, _| Ok(true));

        let bus = EventBus::new();
        let engine =
            ReservationEngine::new(Arc::new(repo), booth_store(booths), bus.clone(), None);

        let err = engine.confirm(reservation.id).await.unwrap_err();
        assert!(matches!(err, ReservationError::Expired));
        assert_eq!(bus.history(topics::RESERVATION_EXPIRED).await.len(), 1);
    }

    #[tokio::test]
    async fn cancel_of_confirmed_reservation_is_invalid() {
        let mut reservation = sample_reservation(ReservationStatus::Confirmed, None);
        reservation.confirmed_at = Some(Utc::now());
        let fetched = reservation.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_cancel_pending().returning(|_| Ok(0));

        let engine = ReservationEngine::new(
            Arc::new(repo),
            booth_store(MockBoothRepository::new()),
            EventBus::new(),
            None,
        );

        let err = engine.cancel(reservation.id).await.unwrap_err();
        assert!(matches!(err, ReservationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn cancel_releases_booth_and_emits_released() {
        let reservation = sample_reservation(
            ReservationStatus::Pending,
            Some(Utc::now() + Duration::minutes(10)),
        );
        let booth_id = reservation.booth_id;
        let fetched = reservation.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_cancel_pending().returning(|_| Ok(1));

        let mut booths = MockBoothRepository::new();
        booths
            .expect_set_status()
            .withf(move |id, status| *id == booth_id && *status == BoothStatus::Available)
            .returning(|id, status| Ok(Some(sample_booth(id, status))));

        let bus = EventBus::new();
        let engine =
            ReservationEngine::new(Arc::new(repo), booth_store(booths), bus.clone(), None);

        engine.cancel(reservation.id).await.unwrap();
        assert_eq!(bus.history(topics::BOOTH_RELEASED).await.len(), 1);
    }

    #[tokio::test]
    async fn sweep_skips_booths_with_newer_active_hold() {
        let stale = sample_reservation(
            ReservationStatus::Pending,
            Some(Utc::now() - Duration::minutes(5)),
        );
        let newer = sample_reservation(
            ReservationStatus::Pending,
            Some(Utc::now() + Duration::minutes(10)),
        );
        let stale_clone = stale.clone();

        let mut repo = MockReservationRepository::new();
        repo.expect_find_stale_pending()
            .returning(move |_| Ok(vec![stale_clone.clone()]));
        repo.expect_expire_pending().returning(|_, _| Ok(1));
        repo.expect_find_active_for_booth()
            .returning(move |_, _| Ok(Some(newer.clone())));

        // No booth release expected: the mock would panic on set_status_if
        let booths = MockBoothRepository::new();

        let bus = EventBus::new();
        let engine =
            ReservationEngine::new(Arc::new(repo), booth_store(booths), bus.clone(), None);

        let swept = engine.sweep_expired().await.unwrap();
        assert_eq!(swept, 1);
        assert_eq!(bus.history(topics::RESERVATION_EXPIRED).await.len(), 1);
        assert!(bus.history(topics::BOOTH_STATUS_CHANGED).await.is_empty());
    }
}

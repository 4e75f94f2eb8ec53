use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ReservationResult;
use crate::models::Reservation;

/// Repository trait for reservation persistence.
///
/// The compound operations (`reserve`, `confirm_pending`, `cancel_pending`,
/// `expire_pending`) are each one serialized storage-level step, so the
/// engine's check-then-act sequences cannot interleave with concurrent
/// requests.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Place a hold: lock the booth row, re-check booth state and the
    /// active-reservation predicate, insert the pending row, and mark the
    /// booth reserved, all in one transaction. First writer wins; losers get
    /// `BoothReserved`/`BoothUnavailable`.
    async fn reserve(
        &self,
        booth_id: Uuid,
        event_id: Uuid,
        exhibitor_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> ReservationResult<Reservation>;

    async fn find_by_id(&self, id: Uuid) -> ReservationResult<Option<Reservation>>;

    /// The reservation currently blocking a booth, under the lazy-expiry
    /// predicate: status IN (pending, confirmed) AND (expires_at IS NULL OR
    /// expires_at > now).
    async fn find_active_for_booth(
        &self,
        booth_id: Uuid,
        now: DateTime<Utc>,
    ) -> ReservationResult<Option<Reservation>>;

    /// Conditionally flip pending → confirmed, stamping `confirmed_at`.
    ///
    /// Guarded by `status = pending AND (expires_at IS NULL OR expires_at >
    /// now)`; returns affected row count (0 = lost the race or ineligible).
    async fn confirm_pending(&self, id: Uuid, now: DateTime<Utc>) -> ReservationResult<u64>;

    /// Conditionally flip pending → cancelled; returns affected rows
    async fn cancel_pending(&self, id: Uuid) -> ReservationResult<u64>;

    /// Conditionally flip a lapsed pending row → expired; returns affected
    /// rows. Guarded by `status = pending AND expires_at <= now`.
    async fn expire_pending(&self, id: Uuid, now: DateTime<Utc>) -> ReservationResult<u64>;

    async fn list_by_exhibitor(&self, exhibitor_id: Uuid) -> ReservationResult<Vec<Reservation>>;

    async fn list(&self, limit: u64, offset: u64) -> ReservationResult<Vec<Reservation>>;

    /// Pending rows whose deadline has passed; sweeper input
    async fn find_stale_pending(&self, now: DateTime<Utc>) -> ReservationResult<Vec<Reservation>>;
}

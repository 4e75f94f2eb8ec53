use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Default hold duration for a new reservation
pub const DEFAULT_HOLD_MINUTES: i64 = 15;

/// Reservation lifecycle.
///
/// `pending` holds the booth; `confirmed` is terminal success; `cancelled`
/// and `expired` are terminal releases. Rows are never deleted; retries
/// supersede them with new rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reservation_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "expired")]
    Expired,
}

/// Reservation domain model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub booth_id: Uuid,
    pub event_id: Uuid,
    pub exhibitor_id: Uuid,
    pub status: ReservationStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Lazy expiry check: a pending hold whose deadline passed no longer
    /// counts, even while its row still says `pending`.
    pub fn is_hold_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Pending
            && self.expires_at.map(|e| e <= now).unwrap_or(false)
    }

    /// Whether this reservation still blocks its booth at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            ReservationStatus::Confirmed => true,
            ReservationStatus::Pending => !self.is_hold_lapsed(now),
            ReservationStatus::Cancelled | ReservationStatus::Expired => false,
        }
    }
}

/// DTO for placing a hold
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ReserveBooth {
    pub booth_id: Uuid,
    pub event_id: Uuid,
}

/// The caller on whose behalf the engine acts; carried explicitly so the
/// engine stays decoupled from the HTTP auth layer.
#[derive(Debug, Clone)]
pub struct ExhibitorInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// DTO for reservation responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub booth_id: Uuid,
    pub event_id: Uuid,
    pub exhibitor_id: Uuid,
    pub status: ReservationStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            booth_id: reservation.booth_id,
            event_id: reservation.event_id,
            exhibitor_id: reservation.exhibitor_id,
            status: reservation.status,
            expires_at: reservation.expires_at,
            confirmed_at: reservation.confirmed_at,
            created_at: reservation.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reservation(status: ReservationStatus, expires_in: Option<i64>) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: Uuid::new_v4(),
            booth_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            exhibitor_id: Uuid::new_v4(),
            status,
            expires_at: expires_in.map(|m| now + Duration::minutes(m)),
            confirmed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pending_with_future_deadline_is_active() {
        let r = reservation(ReservationStatus::Pending, Some(10));
        assert!(r.is_active(Utc::now()));
        assert!(!r.is_hold_lapsed(Utc::now()));
    }

    #[test]
    fn pending_past_deadline_is_lapsed() {
        let r = reservation(ReservationStatus::Pending, Some(-1));
        assert!(r.is_hold_lapsed(Utc::now()));
        assert!(!r.is_active(Utc::now()));
    }

    #[test]
    fn confirmed_never_lapses() {
        let mut r = reservation(ReservationStatus::Confirmed, Some(-60));
        r.confirmed_at = Some(Utc::now());
        assert!(r.is_active(Utc::now()));
        assert!(!r.is_hold_lapsed(Utc::now()));
    }

    #[test]
    fn terminal_states_are_inactive() {
        assert!(!reservation(ReservationStatus::Cancelled, None).is_active(Utc::now()));
        assert!(!reservation(ReservationStatus::Expired, None).is_active(Utc::now()));
    }

    #[test]
    fn pending_without_deadline_never_lapses() {
        let r = reservation(ReservationStatus::Pending, None);
        assert!(r.is_active(Utc::now()));
    }
}

//! Booking lifecycle events carried by the bus.
//!
//! Events are facts: they describe what already happened and carry plain ids
//! rather than domain types, so subscriber modules never need the emitting
//! crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod topics {
    pub const BOOTH_RESERVED: &str = "booth.reserved";
    pub const BOOTH_BOOKED: &str = "booth.booked";
    pub const BOOTH_RELEASED: &str = "booth.released";
    pub const BOOTH_STATUS_CHANGED: &str = "booth.status_changed";
    pub const RESERVATION_EXPIRED: &str = "reservation.expired";
    pub const PAYMENT_COMPLETED: &str = "payment.completed";
    pub const PAYMENT_FAILED: &str = "payment.failed";
}

/// Typed event payloads published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusEvent {
    BoothReserved {
        reservation_id: Uuid,
        booth_id: Uuid,
        event_id: Uuid,
        exhibitor_id: Uuid,
        expires_at: Option<DateTime<Utc>>,
    },
    BoothBooked {
        reservation_id: Uuid,
        booth_id: Uuid,
        event_id: Uuid,
        exhibitor_id: Uuid,
    },
    BoothReleased {
        reservation_id: Uuid,
        booth_id: Uuid,
        event_id: Uuid,
    },
    BoothStatusChanged {
        booth_id: Uuid,
        event_id: Uuid,
        status: String,
    },
    ReservationExpired {
        reservation_id: Uuid,
        booth_id: Uuid,
        event_id: Uuid,
    },
    PaymentCompleted {
        transaction_id: Uuid,
        reservation_id: Uuid,
        amount_cents: i64,
        currency: String,
    },
    PaymentFailed {
        transaction_id: Uuid,
        reservation_id: Uuid,
        reason: String,
    },
}

impl BusEvent {
    /// Topic name the event is published under
    pub fn topic(&self) -> &'static str {
        match self {
            BusEvent::BoothReserved { .. } => topics::BOOTH_RESERVED,
            BusEvent::BoothBooked { .. } => topics::BOOTH_BOOKED,
            BusEvent::BoothReleased { .. } => topics::BOOTH_RELEASED,
            BusEvent::BoothStatusChanged { .. } => topics::BOOTH_STATUS_CHANGED,
            BusEvent::ReservationExpired { .. } => topics::RESERVATION_EXPIRED,
            BusEvent::PaymentCompleted { .. } => topics::PAYMENT_COMPLETED,
            BusEvent::PaymentFailed { .. } => topics::PAYMENT_FAILED,
        }
    }
}

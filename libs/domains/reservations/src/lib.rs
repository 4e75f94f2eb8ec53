//! Reservation engine: time-bounded holds with at-most-one-booking-per-booth.
//!
//! The exclusivity invariant (at most one unexpired pending/confirmed
//! reservation per booth) is enforced inside a row-locking database
//! transaction, never by two separate application-level queries. Hold expiry
//! is decided lazily at read time; the sweeper only tidies rows the reads
//! have already written off.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod sweeper;

pub use error::{ReservationError, ReservationResult};
pub use models::{
    ExhibitorInfo, Reservation, ReservationResponse, ReservationStatus, ReserveBooth,
    DEFAULT_HOLD_MINUTES,
};
pub use postgres::PgReservationRepository;
pub use repository::ReservationRepository;
pub use service::ReservationEngine;

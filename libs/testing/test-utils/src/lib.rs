//! Shared test infrastructure for the domain crates.
//!
//! [`TestDatabase`] boots a disposable PostgreSQL container with the full
//! schema applied, so repository and engine integration tests run against the
//! same migrations production uses.

pub mod postgres;

pub use postgres::TestDatabase;

//! Invoices domain: human-facing billing records for confirmed bookings.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod number;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{InvoiceError, InvoiceResult};
pub use models::{CreateInvoice, Invoice, InvoiceResponse, InvoiceStatus};
pub use postgres::PgInvoiceRepository;
pub use repository::InvoiceRepository;
pub use service::InvoiceService;

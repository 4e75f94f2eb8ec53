//! Exhibition events domain: the containers booths belong to.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{EventError, EventResult};
pub use models::{CreateEvent, EventResponse, EventStatus, ExhibitionEvent, UpdateEvent};
pub use postgres::PgEventRepository;
pub use repository::EventRepository;
pub use service::EventService;

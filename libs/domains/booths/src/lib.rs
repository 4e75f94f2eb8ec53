//! Booths domain: the Booth Store and floor plans.
//!
//! The store owns `Booth.status`. Status changes go through
//! [`service::BoothStore::transition`], one conditional UPDATE at the
//! storage layer, never through freehand writes from other modules.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod svg;

pub use error::{BoothError, BoothResult};
pub use models::{
    AvailableBoothFilter, Booth, BoothPlacement, BoothResponse, BoothSize, BoothStatus,
    CreateBooth, CreateFloorPlan, FloorPlan, UpdateBooth,
};
pub use postgres::{PgBoothRepository, PgFloorPlanRepository};
pub use repository::{BoothRepository, FloorPlanRepository};
pub use service::BoothStore;

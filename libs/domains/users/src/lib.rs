//! Users domain: registration, login, and the live-account auth layer.

pub mod auth;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use auth::CurrentUser;
pub use error::{UserError, UserResult};
pub use models::{AuthTokens, LoginRequest, RegisterUser, UpdateUser, User, UserResponse, UserRole};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;

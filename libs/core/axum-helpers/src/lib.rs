//! # Axum Helpers
//!
//! Shared utilities, middleware, and helpers for the booking backend's Axum
//! surface.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT token issuing/verification and auth middleware
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error envelope with stable error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    admin_middleware, auth_middleware, JwtAuth, JwtClaims, JwtConfig, ACCESS_TOKEN_TTL,
    REFRESH_TOKEN_TTL,
};
pub use errors::{ApiResponse, AppError, ErrorBody, ErrorCode, ErrorResponse};
pub use extractors::{UuidPath, ValidatedJson};
pub use http::{create_cors_layer, security_headers};
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
};

//! Live-account authentication layer.
//!
//! [`axum_helpers::auth_middleware`] only proves the token signature; this
//! middleware then loads the user row and rejects missing or deactivated
//! accounts, so a revoked account locks out immediately regardless of token
//! expiry.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_helpers::{ErrorCode, ErrorResponse, JwtClaims};
use uuid::Uuid;

use crate::models::UserRole;
use crate::service::UserService;

/// The authenticated caller, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

fn unauthorized(message: &str) -> Response {
    ErrorResponse::new(ErrorCode::Unauthorized, message)
        .into_response_with(ErrorCode::Unauthorized.status())
}

/// Verify the token's subject against the live user record.
///
/// Must be layered after [`axum_helpers::auth_middleware`].
pub async fn current_user_middleware(
    State(users): State<UserService>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = match request.extensions().get::<JwtClaims>() {
        Some(c) => c.clone(),
        None => return Err(unauthorized("No token provided")),
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => return Err(unauthorized("Invalid token subject")),
    };

    let user = match users.get_active_user(user_id).await {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!(user_id = %user_id, error = %e, "Rejected token for unusable account");
            return Err(unauthorized("Account is not available"));
        }
    };

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Extractor-style access to the current user inside handlers
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                ErrorResponse::new(ErrorCode::Unauthorized, "Authentication required")
                    .into_response_with(ErrorCode::Unauthorized.status())
            })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

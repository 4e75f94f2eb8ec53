use super::jwt::JwtAuth;
use crate::errors::{ErrorCode, ErrorResponse};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract a bearer token from the Authorization header
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

fn unauthorized(message: &str) -> Response {
    ErrorResponse::new(ErrorCode::Unauthorized, message)
        .into_response_with(ErrorCode::Unauthorized.status())
}

/// JWT authentication middleware.
///
/// Verifies the bearer token signature and inserts [`super::JwtClaims`] into
/// request extensions. Does NOT hit the database; layer the users domain's
/// live-account check behind this for authenticated routes.
pub async fn auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header");
            return Err(unauthorized("No token provided"));
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err(unauthorized("Invalid token"));
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Role gate for admin-only routes; must run after [`auth_middleware`].
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, Response> {
    let is_admin = request
        .extensions()
        .get::<super::JwtClaims>()
        .map(|c| c.is_admin())
        .unwrap_or(false);

    if !is_admin {
        tracing::debug!("Rejected non-admin access to admin route");
        return Err(ErrorResponse::new(
            ErrorCode::Forbidden,
            "Administrator role required",
        )
        .into_response_with(ErrorCode::Forbidden.status()));
    }

    Ok(next.run(request).await)
}

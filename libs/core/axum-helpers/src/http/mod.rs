//! HTTP middleware: CORS and security headers

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Add the standard security headers to every response
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

/// Build a CORS layer from a comma-separated origin list.
///
/// Returns an error when the list is empty or an origin does not parse; the
/// caller decides whether that is fatal.
pub fn create_cors_layer(origins_str: &str) -> Result<CorsLayer, String> {
    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| format!("Invalid origin '{}': {}", s, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if allowed_origins.is_empty() {
        return Err("CORS origin list cannot be empty".to_string());
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_rejects_empty_list() {
        assert!(create_cors_layer("").is_err());
        assert!(create_cors_layer(" , ").is_err());
    }

    #[test]
    fn cors_layer_accepts_origins() {
        assert!(create_cors_layer("http://localhost:3000,https://example.com").is_ok());
    }
}

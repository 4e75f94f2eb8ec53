//! Core (non-module) route composition and auth layering helpers.

use axum::{middleware, routing::get, Json, Router};
use axum_helpers::{admin_middleware, auth_middleware, run_health_checks, HealthCheckFuture};
use domain_users::auth::current_user_middleware;

use crate::state::AppState;

/// Bearer-token verification plus the live-user check.
///
/// Outermost layer verifies the JWT signature; the inner layer loads the user
/// row and rejects missing or deactivated accounts.
pub fn require_auth(router: Router, state: &AppState) -> Router {
    router
        .layer(middleware::from_fn_with_state(
            state.users.clone(),
            current_user_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            auth_middleware,
        ))
}

/// [`require_auth`] plus the admin role gate
pub fn require_admin(router: Router, state: &AppState) -> Router {
    require_auth(router.layer(middleware::from_fn(admin_middleware)), state)
}

/// Core routes that exist regardless of module flags
pub fn routes(state: &AppState) -> Router {
    let public = Router::new()
        .nest(
            "/auth",
            domain_users::handlers::auth_router(state.users.clone()),
        )
        .nest(
            "/events",
            domain_events::handlers::public_router(state.events.clone())
                .merge(domain_booths::handlers::floor_plan_router(state.booths.clone())),
        );

    let me = require_auth(
        domain_users::handlers::me_router(state.users.clone()),
        state,
    );

    let admin = Router::new()
        .nest(
            "/users",
            domain_users::handlers::admin_router(state.users.clone()),
        )
        .nest(
            "/events",
            domain_events::handlers::admin_router(state.events.clone()),
        )
        .nest(
            "/booths",
            domain_booths::handlers::admin_router(state.booths.clone()),
        )
        .nest(
            "/reservations",
            domain_reservations::handlers::admin_router(state.reservations.clone()),
        );

    public
        .nest("/users", me)
        .nest("/admin", require_admin(admin, state))
}

/// Readiness endpoint with a live database ping
pub fn ready_router(state: AppState) -> Router {
    Router::new().route(
        "/ready",
        get(move || {
            let db = state.db.clone();
            async move {
                let checks: Vec<(&str, HealthCheckFuture)> = vec![(
                    "database",
                    Box::pin(async {
                        database::postgres::check_health(&db)
                            .await
                            .map_err(|e| e.to_string())
                    }),
                )];

                let (status, Json(body)) = run_health_checks(checks).await;
                (status, Json(body))
            }
        }),
    )
}

/// WebSocket endpoint for booth-status pushes
pub fn ws_router(state: &AppState) -> Router {
    Router::new()
        .route("/ws", get(realtime::ws::ws_handler))
        .with_state(state.broadcaster.clone())
}

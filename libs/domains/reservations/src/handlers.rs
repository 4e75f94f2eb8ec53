use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_helpers::{ApiResponse, UuidPath, ValidatedJson};
use domain_users::CurrentUser;
use serde::Deserialize;

use crate::error::ReservationResult;
use crate::models::{
    ExhibitorInfo, ReservationResponse, ReserveBooth, DEFAULT_HOLD_MINUTES,
};
use crate::service::ReservationEngine;

/// Exhibitor-facing endpoints; mounted by the sales module
pub fn sales_router(engine: ReservationEngine) -> Router {
    Router::new()
        .route("/reserve", post(reserve_booth))
        .route("/my-reservations", get(my_reservations))
        .route("/reservations/{id}/cancel", post(cancel_reservation))
        .with_state(engine)
}

/// Admin listing
pub fn admin_router(engine: ReservationEngine) -> Router {
    Router::new()
        .route("/", get(list_reservations))
        .route("/{id}", get(get_reservation))
        .with_state(engine)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReservationListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// Place a 15-minute hold on a booth
#[utoipa::path(
    post,
    path = "/reserve",
    tag = "sales",
    request_body = ReserveBooth,
    responses(
        (status = 201, description = "Hold placed", body = ReservationResponse),
        (status = 400, description = "Booth unavailable or already reserved"),
        (status = 404, description = "Booth not found")
    )
)]
pub async fn reserve_booth(
    State(engine): State<ReservationEngine>,
    current: CurrentUser,
    ValidatedJson(input): ValidatedJson<ReserveBooth>,
) -> ReservationResult<impl IntoResponse> {
    let reservation = engine
        .reserve(
            input,
            ExhibitorInfo {
                id: current.id,
                email: current.email,
                name: current.name,
            },
            DEFAULT_HOLD_MINUTES,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(ReservationResponse::from(reservation)),
    ))
}

/// The caller's reservations, newest first
#[utoipa::path(
    get,
    path = "/my-reservations",
    tag = "sales",
    responses((status = 200, description = "Caller's reservations", body = Vec<ReservationResponse>))
)]
pub async fn my_reservations(
    State(engine): State<ReservationEngine>,
    current: CurrentUser,
) -> ReservationResult<impl IntoResponse> {
    let reservations = engine.my_reservations(current.id).await?;
    let reservations: Vec<ReservationResponse> =
        reservations.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(reservations))
}

/// Cancel a pending hold
#[utoipa::path(
    post,
    path = "/reservations/{id}/cancel",
    tag = "sales",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationResponse),
        (status = 400, description = "Reservation is not pending"),
        (status = 403, description = "Not the reservation owner"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(engine): State<ReservationEngine>,
    current: CurrentUser,
    UuidPath(id): UuidPath,
) -> ReservationResult<impl IntoResponse> {
    let reservation = engine.get_reservation(id).await?;
    if reservation.exhibitor_id != current.id && !current.is_admin() {
        return Err(crate::error::ReservationError::Forbidden(
            "Only the reservation owner may cancel it".to_string(),
        ));
    }

    let cancelled = engine.cancel(id).await?;
    Ok(ApiResponse::ok(ReservationResponse::from(cancelled)))
}

/// List reservations (admin)
#[utoipa::path(
    get,
    path = "",
    tag = "reservations-admin",
    params(ReservationListQuery),
    responses((status = 200, description = "Reservations", body = Vec<ReservationResponse>))
)]
pub async fn list_reservations(
    State(engine): State<ReservationEngine>,
    Query(query): Query<ReservationListQuery>,
) -> ReservationResult<impl IntoResponse> {
    let reservations = engine.list_reservations(query.limit, query.offset).await?;
    let reservations: Vec<ReservationResponse> =
        reservations.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(reservations))
}

/// Fetch one reservation (admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "reservations-admin",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation", body = ReservationResponse),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(engine): State<ReservationEngine>,
    UuidPath(id): UuidPath,
) -> ReservationResult<impl IntoResponse> {
    let reservation = engine.get_reservation(id).await?;
    Ok(ApiResponse::ok(ReservationResponse::from(reservation)))
}

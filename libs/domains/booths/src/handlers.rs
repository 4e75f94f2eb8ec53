use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use axum_helpers::{ApiResponse, UuidPath, ValidatedJson};

use crate::error::BoothResult;
use crate::models::{AvailableBoothFilter, BoothResponse, CreateBooth, CreateFloorPlan, UpdateBooth};
use crate::service::BoothStore;

/// Public availability listing; mounted by the sales module
pub fn availability_router(store: BoothStore) -> Router {
    Router::new()
        .route("/booths", get(available_booths))
        .with_state(store)
}

/// Floor plan SVG view
pub fn floor_plan_router(store: BoothStore) -> Router {
    Router::new()
        .route("/{id}/floor-plan.svg", get(floor_plan_svg))
        .with_state(store)
}

/// Admin CRUD endpoints
pub fn admin_router(store: BoothStore) -> Router {
    Router::new()
        .route("/", get(list_booths).post(create_booth))
        .route("/{id}", get(get_booth).put(update_booth).delete(delete_booth))
        .route("/floor-plans", axum::routing::post(create_floor_plan))
        .with_state(store)
}

/// Available booths for an event with optional size/price filters
#[utoipa::path(
    get,
    path = "/booths",
    tag = "sales",
    params(AvailableBoothFilter),
    responses(
        (status = 200, description = "Available booths ordered by number", body = Vec<BoothResponse>),
        (status = 400, description = "Missing or invalid event_id")
    )
)]
pub async fn available_booths(
    State(store): State<BoothStore>,
    Query(filter): Query<AvailableBoothFilter>,
) -> BoothResult<impl IntoResponse> {
    let booths = store.get_available(filter).await?;
    let booths: Vec<BoothResponse> = booths.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(booths))
}

/// Rendered floor plan for an event
#[utoipa::path(
    get,
    path = "/{id}/floor-plan.svg",
    tag = "events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "SVG floor plan", content_type = "image/svg+xml"),
        (status = 404, description = "No floor plan for this event")
    )
)]
pub async fn floor_plan_svg(
    State(store): State<BoothStore>,
    UuidPath(event_id): UuidPath,
) -> BoothResult<impl IntoResponse> {
    let svg = store.render_floor_plan_svg(event_id).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct BoothListQuery {
    pub event_id: uuid::Uuid,
}

/// List an event's booths (admin)
#[utoipa::path(
    get,
    path = "",
    tag = "booths-admin",
    params(BoothListQuery),
    responses((status = 200, description = "Booths for the event", body = Vec<BoothResponse>))
)]
pub async fn list_booths(
    State(store): State<BoothStore>,
    Query(query): Query<BoothListQuery>,
) -> BoothResult<impl IntoResponse> {
    let booths = store.list_by_event(query.event_id).await?;
    let booths: Vec<BoothResponse> = booths.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(booths))
}

/// Fetch one booth (admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "booths-admin",
    params(("id" = String, Path, description = "Booth ID")),
    responses(
        (status = 200, description = "Booth", body = BoothResponse),
        (status = 404, description = "Booth not found")
    )
)]
pub async fn get_booth(
    State(store): State<BoothStore>,
    UuidPath(id): UuidPath,
) -> BoothResult<impl IntoResponse> {
    let booth = store.get_booth(id).await?;
    Ok(ApiResponse::ok(BoothResponse::from(booth)))
}

/// Create a booth (admin)
#[utoipa::path(
    post,
    path = "",
    tag = "booths-admin",
    request_body = CreateBooth,
    responses(
        (status = 201, description = "Booth created", body = BoothResponse),
        (status = 409, description = "Booth number already taken")
    )
)]
pub async fn create_booth(
    State(store): State<BoothStore>,
    ValidatedJson(input): ValidatedJson<CreateBooth>,
) -> BoothResult<impl IntoResponse> {
    let booth = store.create_booth(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(BoothResponse::from(booth)),
    ))
}

/// Update a booth (admin). Status is not updatable here.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "booths-admin",
    params(("id" = String, Path, description = "Booth ID")),
    request_body = UpdateBooth,
    responses(
        (status = 200, description = "Updated booth", body = BoothResponse),
        (status = 404, description = "Booth not found")
    )
)]
pub async fn update_booth(
    State(store): State<BoothStore>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBooth>,
) -> BoothResult<impl IntoResponse> {
    let booth = store.update_booth(id, input).await?;
    Ok(ApiResponse::ok(BoothResponse::from(booth)))
}

/// Delete a booth (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "booths-admin",
    params(("id" = String, Path, description = "Booth ID")),
    responses(
        (status = 204, description = "Booth deleted"),
        (status = 404, description = "Booth not found")
    )
)]
pub async fn delete_booth(
    State(store): State<BoothStore>,
    UuidPath(id): UuidPath,
) -> BoothResult<impl IntoResponse> {
    store.delete_booth(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a floor plan (admin)
#[utoipa::path(
    post,
    path = "/floor-plans",
    tag = "booths-admin",
    request_body = CreateFloorPlan,
    responses((status = 201, description = "Floor plan created"))
)]
pub async fn create_floor_plan(
    State(store): State<BoothStore>,
    ValidatedJson(input): ValidatedJson<CreateFloorPlan>,
) -> BoothResult<impl IntoResponse> {
    let plan = store.create_floor_plan(input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(plan)))
}

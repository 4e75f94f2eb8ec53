use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use axum_helpers::{ApiResponse, UuidPath, ValidatedJson};
use serde::Deserialize;

use crate::error::EventResult;
use crate::models::{CreateEvent, EventResponse, EventStatus, UpdateEvent};
use crate::service::EventService;

/// Public read-only endpoints
pub fn public_router(service: EventService) -> Router {
    Router::new()
        .route("/", get(list_public_events))
        .route("/{id}", get(get_event))
        .with_state(service)
}

/// Admin CRUD endpoints
pub fn admin_router(service: EventService) -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", get(get_event).put(update_event).delete(delete_event))
        .with_state(service)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct EventListQuery {
    pub status: Option<EventStatus>,
}

/// List published/active events
#[utoipa::path(
    get,
    path = "",
    tag = "events",
    responses((status = 200, description = "Events open to exhibitors", body = Vec<EventResponse>))
)]
pub async fn list_public_events(
    State(service): State<EventService>,
) -> EventResult<impl IntoResponse> {
    let events = service.list_public_events().await?;
    let events: Vec<EventResponse> = events.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(events))
}

/// List all events with optional status filter (admin)
#[utoipa::path(
    get,
    path = "",
    tag = "events-admin",
    params(EventListQuery),
    responses((status = 200, description = "All events", body = Vec<EventResponse>))
)]
pub async fn list_events(
    State(service): State<EventService>,
    Query(query): Query<EventListQuery>,
) -> EventResult<impl IntoResponse> {
    let events = service.list_events(query.status).await?;
    let events: Vec<EventResponse> = events.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(events))
}

/// Fetch one event
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "events",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event", body = EventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(service): State<EventService>,
    UuidPath(id): UuidPath,
) -> EventResult<impl IntoResponse> {
    let event = service.get_event(id).await?;
    Ok(ApiResponse::ok(EventResponse::from(event)))
}

/// Create an event (admin)
#[utoipa::path(
    post,
    path = "",
    tag = "events-admin",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_event(
    State(service): State<EventService>,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.create_event(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(EventResponse::from(event)),
    ))
}

/// Update an event (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "events-admin",
    params(("id" = String, Path, description = "Event ID")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Updated event", body = EventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(service): State<EventService>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> EventResult<impl IntoResponse> {
    let event = service.update_event(id, input).await?;
    Ok(ApiResponse::ok(EventResponse::from(event)))
}

/// Delete an event (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "events-admin",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(service): State<EventService>,
    UuidPath(id): UuidPath,
) -> EventResult<impl IntoResponse> {
    service.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

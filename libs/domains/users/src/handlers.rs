use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_helpers::{ApiResponse, UuidPath, ValidatedJson};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::error::UserResult;
use crate::models::{AuthTokens, LoginRequest, RegisterUser, UpdateUser, UserResponse};
use crate::service::UserService;

/// Public auth endpoints: register and login
pub fn auth_router(service: UserService) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(service)
}

/// Authenticated self-service endpoints
pub fn me_router(service: UserService) -> Router {
    Router::new().route("/me", get(me)).with_state(service)
}

/// Admin CRUD endpoints
pub fn admin_router(service: UserService) -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/{id}", get(get_user).put(update_user).delete(deactivate_user))
        .with_state(service)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

/// Register a new exhibitor account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(service): State<UserService>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(UserResponse::from(user)),
    ))
}

/// Exchange credentials for a token pair
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AuthTokens),
        (status = 401, description = "Invalid credentials or inactive account")
    )
)]
pub async fn login(
    State(service): State<UserService>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<impl IntoResponse> {
    let (_, tokens) = service.login(input).await?;
    Ok(ApiResponse::ok(tokens))
}

/// The calling user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(service): State<UserService>,
    current: CurrentUser,
) -> UserResult<impl IntoResponse> {
    let user = service.get_user(current.id).await?;
    Ok(ApiResponse::ok(UserResponse::from(user)))
}

/// List users (admin)
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    params(ListQuery),
    responses(
        (status = 200, description = "Users", body = Vec<UserResponse>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(service): State<UserService>,
    Query(query): Query<ListQuery>,
) -> UserResult<impl IntoResponse> {
    let users = service.list_users(query.limit, query.offset).await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(users))
}

/// Fetch one user (admin)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(service): State<UserService>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    let user = service.get_user(id).await?;
    Ok(ApiResponse::ok(UserResponse::from(user)))
}

/// Update a user (admin)
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(service): State<UserService>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.update_user(id, input).await?;
    Ok(ApiResponse::ok(UserResponse::from(user)))
}

/// Deactivate a user (admin)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn deactivate_user(
    State(service): State<UserService>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.deactivate_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::user::{CreateUserRequest, RenameUserRequest, UserResponse},
    error::AppError,
    services::user_service,
    state::SharedState,
};

/// Routes handling user profiles.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user).put(rename_user))
}

/// Fetch a user profile, creating a default record for unknown ids.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User profile", body = UserResponse)
    )
)]
pub async fn get_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service::get_user(&state, &id).await?;
    Ok(Json(user))
}

/// Register a user with a client-supplied identifier.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User registered (or already present)", body = UserResponse),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_user(
    State(state): State<SharedState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;
    let user = user_service::create_user(&state, payload).await?;
    Ok(Json(user))
}

/// Change a user's display name.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User identifier")),
    request_body = RenameUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn rename_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<RenameUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload.validate()?;
    let user = user_service::rename_user(&state, &id, payload.name).await?;
    Ok(Json(user))
}

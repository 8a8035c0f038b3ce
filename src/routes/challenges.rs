use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use validator::Validate;

use crate::{
    dto::{
        challenge::{
            ChallengeFilter, ChallengeResponse, CreateChallengeRequest, ListChallengesQuery,
            ToggleResponse, UserScopeQuery,
        },
        common::MessageResponse,
    },
    error::AppError,
    services::{challenge_service, query_service},
    state::SharedState,
};

/// Fallback identity used when a client omits `user_id`.
pub(crate) const DEFAULT_USER_ID: &str = "user1";

/// Routes handling challenge CRUD, assignment and completion toggling.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/challenges", get(list_challenges).post(create_challenge))
        .route("/challenges/global", get(global_challenges))
        .route(
            "/challenges/{id}",
            get(get_challenge).delete(delete_challenge),
        )
        .route("/challenges/{id}/assign", post(assign_challenge))
        .route("/challenges/{id}/toggle", put(toggle_challenge))
}

fn user_or_default(user_id: Option<String>) -> String {
    user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_owned())
}

/// List the requesting user's challenges, optionally filtered by completion.
#[utoipa::path(
    get,
    path = "/challenges",
    tag = "challenges",
    params(
        ("user_id" = Option<String>, Query, description = "Requesting user id, defaults to `user1`"),
        ("filter_type" = Option<String>, Query, description = "`active`, `completed`, or omitted for all"),
    ),
    responses(
        (status = 200, description = "User challenges with completion flags", body = Vec<ChallengeResponse>)
    )
)]
pub async fn list_challenges(
    State(state): State<SharedState>,
    Query(query): Query<ListChallengesQuery>,
) -> Result<Json<Vec<ChallengeResponse>>, AppError> {
    let user_id = user_or_default(query.user_id);
    let filter = ChallengeFilter::from_query(query.filter_type.as_deref());
    let challenges = query_service::list_user_challenges(&state, &user_id, filter).await?;
    Ok(Json(challenges))
}

/// Publish a new challenge.
#[utoipa::path(
    post,
    path = "/challenges",
    tag = "challenges",
    request_body = CreateChallengeRequest,
    responses(
        (status = 200, description = "Challenge created", body = ChallengeResponse),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_challenge(
    State(state): State<SharedState>,
    Json(payload): Json<CreateChallengeRequest>,
) -> Result<Json<ChallengeResponse>, AppError> {
    payload.validate()?;
    let challenge = challenge_service::create_challenge(&state, payload).await?;
    Ok(Json(challenge))
}

/// List every global challenge with the requesting user's completion flags.
#[utoipa::path(
    get,
    path = "/challenges/global",
    tag = "challenges",
    params(
        ("user_id" = Option<String>, Query, description = "Requesting user id, defaults to `user1`"),
    ),
    responses(
        (status = 200, description = "Global challenges", body = Vec<ChallengeResponse>)
    )
)]
pub async fn global_challenges(
    State(state): State<SharedState>,
    Query(query): Query<UserScopeQuery>,
) -> Result<Json<Vec<ChallengeResponse>>, AppError> {
    let user_id = user_or_default(query.user_id);
    let challenges = query_service::list_global_challenges(&state, &user_id).await?;
    Ok(Json(challenges))
}

/// Fetch a single challenge by id.
#[utoipa::path(
    get,
    path = "/challenges/{id}",
    tag = "challenges",
    params(("id" = String, Path, description = "Challenge identifier")),
    responses(
        (status = 200, description = "Challenge found", body = ChallengeResponse),
        (status = 404, description = "Unknown challenge")
    )
)]
pub async fn get_challenge(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ChallengeResponse>, AppError> {
    let challenge = challenge_service::get_challenge(&state, &id).await?;
    Ok(Json(challenge))
}

/// Delete a challenge definition.
#[utoipa::path(
    delete,
    path = "/challenges/{id}",
    tag = "challenges",
    params(("id" = String, Path, description = "Challenge identifier")),
    responses(
        (status = 200, description = "Challenge deleted", body = MessageResponse),
        (status = 404, description = "Unknown challenge")
    )
)]
pub async fn delete_challenge(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    challenge_service::delete_challenge(&state, &id).await?;
    Ok(Json(MessageResponse::new("Challenge deleted successfully")))
}

/// Explicitly assign a challenge to the requesting user.
#[utoipa::path(
    post,
    path = "/challenges/{id}/assign",
    tag = "challenges",
    params(
        ("id" = String, Path, description = "Challenge identifier"),
        ("user_id" = Option<String>, Query, description = "Requesting user id, defaults to `user1`"),
    ),
    responses(
        (status = 200, description = "Challenge assigned", body = MessageResponse),
        (status = 404, description = "Unknown challenge"),
        (status = 409, description = "Already assigned to this user")
    )
)]
pub async fn assign_challenge(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<UserScopeQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let user_id = user_or_default(query.user_id);
    challenge_service::assign(&state, &user_id, &id).await?;
    Ok(Json(MessageResponse::new("Challenge assigned successfully")))
}

/// Toggle the completion state of a challenge for the requesting user.
#[utoipa::path(
    put,
    path = "/challenges/{id}/toggle",
    tag = "challenges",
    params(
        ("id" = String, Path, description = "Challenge identifier"),
        ("user_id" = Option<String>, Query, description = "Requesting user id, defaults to `user1`"),
    ),
    responses(
        (status = 200, description = "New completion state and fresh user stats", body = ToggleResponse)
    )
)]
pub async fn toggle_challenge(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<UserScopeQuery>,
) -> Result<Json<ToggleResponse>, AppError> {
    let user_id = user_or_default(query.user_id);
    let outcome = challenge_service::toggle(&state, &user_id, &id).await?;
    Ok(Json(outcome))
}

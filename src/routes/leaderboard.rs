use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::leaderboard::LeaderboardEntry, error::AppError, services::query_service,
    state::SharedState,
};

/// Routes exposing the ranked leaderboard.
pub fn router() -> Router<SharedState> {
    Router::new().route("/leaderboard", get(leaderboard))
}

/// Rank users by number of completed challenges.
#[utoipa::path(
    get,
    path = "/leaderboard",
    tag = "leaderboard",
    responses(
        (status = 200, description = "Ranked users with at least one completion", body = Vec<LeaderboardEntry>)
    )
)]
pub async fn leaderboard(
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = query_service::leaderboard(&state).await?;
    Ok(Json(entries))
}

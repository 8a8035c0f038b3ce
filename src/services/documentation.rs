use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Challenge Arena Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::challenges::list_challenges,
        crate::routes::challenges::create_challenge,
        crate::routes::challenges::global_challenges,
        crate::routes::challenges::get_challenge,
        crate::routes::challenges::delete_challenge,
        crate::routes::challenges::assign_challenge,
        crate::routes::challenges::toggle_challenge,
        crate::routes::users::get_user,
        crate::routes::users::create_user,
        crate::routes::users::rename_user,
        crate::routes::leaderboard::leaderboard,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::MessageResponse,
            crate::dto::challenge::CreateChallengeRequest,
            crate::dto::challenge::ChallengeResponse,
            crate::dto::challenge::ToggleResponse,
            crate::dto::user::CreateUserRequest,
            crate::dto::user::RenameUserRequest,
            crate::dto::user::UserResponse,
            crate::dto::user::UserStats,
            crate::dto::leaderboard::LeaderboardEntry,
            crate::dao::models::Difficulty,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "challenges", description = "Challenge creation, assignment and completion"),
        (name = "users", description = "User profiles and aggregate stats"),
        (name = "leaderboard", description = "Ranked completion standings"),
    )
)]
pub struct ApiDoc;

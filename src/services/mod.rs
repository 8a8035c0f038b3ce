/// Challenge creation, assignment and completion toggling.
pub mod challenge_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read views: challenge listings and the leaderboard.
pub mod query_service;
/// Storage connection supervisor with degraded-mode handling.
pub mod storage_supervisor;
/// User profile operations.
pub mod user_service;

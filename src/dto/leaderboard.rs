use serde::Serialize;
use utoipa::ToSchema;

/// One ranked row of the leaderboard.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// User identifier.
    pub id: String,
    /// Display name, `"User"` when the user record is missing.
    pub name: String,
    /// Number of completed assignments counted for this user.
    pub completed_count: u32,
    /// 1-based position after sorting; recomputed on every call.
    pub rank: u32,
    /// Avatar URL; not populated yet, kept for response-shape compatibility.
    pub avatar: Option<String>,
}

use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;

/// Difficulty tier of a challenge, driving the suggested star reward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Low effort, small reward.
    Easy,
    /// Moderate effort.
    Medium,
    /// Sustained effort over days or weeks.
    Hard,
    /// The kind of challenge few participants finish.
    Extreme,
}

/// Challenge definition shared across the storage and service layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeEntity {
    /// Opaque unique identifier (UUID for created challenges, fixed ids for seeds).
    pub id: String,
    /// Short display title.
    pub title: String,
    /// What completing the challenge requires.
    pub description: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Star reward granted on completion.
    pub stars: u32,
    /// Deadline by which the challenge should be completed.
    pub deadline: SystemTime,
    /// Identifier of the user that authored the challenge, if any.
    pub created_by: Option<String>,
    /// Whether the challenge came from the AI suggestion flow.
    pub is_ai: bool,
    /// Whether the challenge is visible to every user.
    pub is_global: bool,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
    /// Advisory participant counter for global challenges, best-effort only.
    pub participants_count: u64,
    /// Advisory completion counter for global challenges, best-effort only.
    pub completed_count: u64,
}

/// Display name given to users materialized lazily by the store policy.
pub const DEFAULT_USER_NAME: &str = "Challenger";

/// User record holding the aggregate stats maintained by the reconciler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntity {
    /// Opaque unique identifier, supplied by the client.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of challenges the user currently has completed.
    pub completed_challenges: u32,
    /// Sum of star rewards over the user's completed challenges.
    pub total_stars: u32,
    /// Derived flag, true once `completed_challenges` reaches the publish threshold.
    pub can_publish: bool,
}

impl UserEntity {
    /// Materialize a user with zero stats, as done whenever a previously
    /// unseen user id first touches the system.
    pub fn with_default_stats(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed_challenges: 0,
            total_stars: 0,
            can_publish: false,
        }
    }
}

/// Link between a user and a challenge, carrying the per-user completion flag.
///
/// The pair `(user_id, challenge_id)` is unique; the authoritative completion
/// status of a challenge for a user always lives here, never on the challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignmentEntity {
    /// Identifier of the user side of the pair.
    pub user_id: String,
    /// Identifier of the challenge side of the pair.
    pub challenge_id: String,
    /// Whether the user has marked the challenge complete.
    pub completed: bool,
    /// When the assignment was created.
    pub created_at: SystemTime,
    /// When the challenge was last marked complete; cleared on un-completion.
    pub completed_at: Option<SystemTime>,
}

impl AssignmentEntity {
    /// Fresh, incomplete assignment for a pair.
    pub fn new(user_id: impl Into<String>, challenge_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            challenge_id: challenge_id.into(),
            completed: false,
            created_at: SystemTime::now(),
            completed_at: None,
        }
    }
}

/// Point-in-time copy of the three collections, taken under a single lock so
/// read views never observe torn state.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// All challenges, in insertion order.
    pub challenges: Vec<ChallengeEntity>,
    /// All users, in insertion order.
    pub users: Vec<UserEntity>,
    /// All assignments, in insertion order.
    pub assignments: Vec<AssignmentEntity>,
}

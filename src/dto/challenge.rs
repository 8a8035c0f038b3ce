use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dao::models::{ChallengeEntity, Difficulty},
    dto::{
        format_system_time,
        user::UserStats,
        validation::{validate_deadline, validate_not_blank, validate_stars},
    },
};

/// Payload used to publish a brand-new challenge.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateChallengeRequest {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub stars: u32,
    /// RFC 3339 deadline, e.g. `2026-09-01T00:00:00Z`.
    pub deadline: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub is_ai: bool,
    #[serde(default)]
    pub is_global: bool,
}

impl Validate for CreateChallengeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_not_blank(&self.title) {
            errors.add("title", e);
        }

        if let Err(e) = validate_not_blank(&self.description) {
            errors.add("description", e);
        }

        if let Err(e) = validate_stars(self.stars) {
            errors.add("stars", e);
        }

        if let Err(e) = validate_deadline(&self.deadline) {
            errors.add("deadline", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Challenge projection exposed to REST clients, annotated with the
/// requesting user's completion flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChallengeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub stars: u32,
    pub deadline: String,
    pub created_by: Option<String>,
    pub is_ai: bool,
    pub is_global: bool,
    pub participants_count: u64,
    pub completed_count: u64,
    pub created_at: String,
    /// Completion status for the requesting user; false without an assignment.
    pub completed: bool,
}

impl From<(ChallengeEntity, bool)> for ChallengeResponse {
    fn from((entity, completed): (ChallengeEntity, bool)) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            difficulty: entity.difficulty,
            stars: entity.stars,
            deadline: format_system_time(entity.deadline),
            created_by: entity.created_by,
            is_ai: entity.is_ai,
            is_global: entity.is_global,
            participants_count: entity.participants_count,
            completed_count: entity.completed_count,
            created_at: format_system_time(entity.created_at),
            completed,
        }
    }
}

impl From<ChallengeEntity> for ChallengeResponse {
    fn from(entity: ChallengeEntity) -> Self {
        (entity, false).into()
    }
}

/// Outcome of a completion toggle: the new flag plus the user's fresh
/// aggregate stats.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleResponse {
    pub completed: bool,
    pub user_stats: UserStats,
}

/// Completion filter applied to a user's challenge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeFilter {
    /// Keep only incomplete challenges.
    Active,
    /// Keep only completed challenges.
    Completed,
}

impl ChallengeFilter {
    /// Lenient parse of the `filter_type` query parameter. Anything other
    /// than the two known values means "no filter", matching the behavior
    /// clients already rely on.
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        match value {
            Some("active") => Some(ChallengeFilter::Active),
            Some("completed") => Some(ChallengeFilter::Completed),
            _ => None,
        }
    }

    /// Whether a challenge with the given completion flag passes the filter.
    pub fn keeps(self, completed: bool) -> bool {
        match self {
            ChallengeFilter::Active => !completed,
            ChallengeFilter::Completed => completed,
        }
    }
}

/// Query parameters for the user-scoped challenge listing.
#[derive(Debug, Deserialize)]
pub struct ListChallengesQuery {
    pub user_id: Option<String>,
    pub filter_type: Option<String>,
}

/// Query parameters for operations scoped to a single user.
#[derive(Debug, Deserialize)]
pub struct UserScopeQuery {
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_known_values_only() {
        assert_eq!(
            ChallengeFilter::from_query(Some("active")),
            Some(ChallengeFilter::Active)
        );
        assert_eq!(
            ChallengeFilter::from_query(Some("completed")),
            Some(ChallengeFilter::Completed)
        );
        assert_eq!(ChallengeFilter::from_query(Some("all")), None);
        assert_eq!(ChallengeFilter::from_query(Some("ACTIVE")), None);
        assert_eq!(ChallengeFilter::from_query(None), None);
    }

    #[test]
    fn create_request_validation() {
        let request = CreateChallengeRequest {
            title: "Morning run".into(),
            description: "Run 5km before work".into(),
            difficulty: Difficulty::Medium,
            stars: 8,
            deadline: "2026-09-01T00:00:00Z".into(),
            created_by: Some("user1".into()),
            is_ai: false,
            is_global: false,
        };
        assert!(request.validate().is_ok());

        let blank_title = CreateChallengeRequest {
            title: "  ".into(),
            ..request
        };
        let errors = blank_title.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }
}

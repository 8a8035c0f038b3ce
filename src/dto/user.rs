use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{dao::models::UserEntity, dto::validation::validate_not_blank};

/// Payload used to register a user with a client-supplied identifier.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub id: String,
    pub name: String,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_not_blank(&self.id) {
            errors.add("id", e);
        }

        if let Err(e) = validate_not_blank(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Payload used to change a user's display name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameUserRequest {
    pub name: String,
}

impl Validate for RenameUserRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_not_blank(&self.name) {
            errors.add("name", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// User profile projection exposed to REST clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub completed_challenges: u32,
    pub total_stars: u32,
    pub can_publish: bool,
}

impl From<UserEntity> for UserResponse {
    fn from(user: UserEntity) -> Self {
        Self {
            id: user.id,
            name: user.name,
            completed_challenges: user.completed_challenges,
            total_stars: user.total_stars,
            can_publish: user.can_publish,
        }
    }
}

/// Aggregate counters returned alongside every toggle.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserStats {
    pub completed_challenges: u32,
    pub total_stars: u32,
    pub can_publish: bool,
}

impl From<&UserEntity> for UserStats {
    fn from(user: &UserEntity) -> Self {
        Self {
            completed_challenges: user.completed_challenges,
            total_stars: user.total_stars,
            can_publish: user.can_publish,
        }
    }
}

use tracing::debug;

use crate::{
    dao::models::{DEFAULT_USER_NAME, UserEntity},
    dto::user::{CreateUserRequest, UserResponse},
    error::ServiceError,
    state::SharedState,
};

/// Fetch a user profile, materializing a default record on first sight.
///
/// Mirrors the store's lazy-user-creation policy: an unknown id is a new
/// challenger with zero stats, not an error.
pub async fn get_user(state: &SharedState, user_id: &str) -> Result<UserResponse, ServiceError> {
    let store = state.require_challenge_store().await?;

    if let Some(user) = store.find_user(user_id).await? {
        return Ok(user.into());
    }

    let user = UserEntity::with_default_stats(user_id, DEFAULT_USER_NAME);
    store.put_user(user.clone()).await?;
    debug!(user = %user.id, "materialized user on first fetch");

    Ok(user.into())
}

/// Register a user with a client-supplied id and name.
///
/// Registering an id that already exists returns the existing record
/// unchanged rather than overwriting its stats.
pub async fn create_user(
    state: &SharedState,
    request: CreateUserRequest,
) -> Result<UserResponse, ServiceError> {
    let store = state.require_challenge_store().await?;

    if let Some(existing) = store.find_user(&request.id).await? {
        return Ok(existing.into());
    }

    let user = UserEntity::with_default_stats(request.id, request.name);
    store.put_user(user.clone()).await?;

    Ok(user.into())
}

/// Change a user's display name.
pub async fn rename_user(
    state: &SharedState,
    user_id: &str,
    name: String,
) -> Result<UserResponse, ServiceError> {
    let store = state.require_challenge_store().await?;

    let Some(mut user) = store.find_user(user_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "user `{user_id}` not found"
        )));
    };

    user.name = name;
    store.put_user(user.clone()).await?;

    Ok(user.into())
}

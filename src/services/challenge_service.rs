use std::time::SystemTime;

use tracing::debug;
use uuid::Uuid;

use crate::{
    dao::models::{AssignmentEntity, ChallengeEntity, DEFAULT_USER_NAME, UserEntity},
    dto::{
        challenge::{ChallengeResponse, CreateChallengeRequest, ToggleResponse},
        parse_system_time,
    },
    error::ServiceError,
    state::{
        SharedState,
        completion::{self, Completion, Transition},
    },
};

/// Publish a new challenge and persist it.
///
/// The id is a fresh UUID; uniqueness is the only contract callers may rely
/// on, not the format.
pub async fn create_challenge(
    state: &SharedState,
    request: CreateChallengeRequest,
) -> Result<ChallengeResponse, ServiceError> {
    let store = state.require_challenge_store().await?;

    let deadline = parse_system_time(&request.deadline).ok_or_else(|| {
        ServiceError::InvalidInput("deadline must be an RFC 3339 timestamp".into())
    })?;

    let entity = ChallengeEntity {
        id: Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        difficulty: request.difficulty,
        stars: request.stars,
        deadline,
        created_by: request.created_by,
        is_ai: request.is_ai,
        is_global: request.is_global,
        created_at: SystemTime::now(),
        participants_count: 0,
        completed_count: 0,
    };

    store.put_challenge(entity.clone()).await?;
    debug!(id = %entity.id, title = %entity.title, "challenge created");

    Ok(entity.into())
}

/// Fetch a single challenge by id.
pub async fn get_challenge(
    state: &SharedState,
    challenge_id: &str,
) -> Result<ChallengeResponse, ServiceError> {
    let store = state.require_challenge_store().await?;

    let Some(challenge) = store.find_challenge(challenge_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "challenge `{challenge_id}` not found"
        )));
    };

    Ok(challenge.into())
}

/// Remove a challenge definition.
///
/// Assignments referencing the id are left in place; toggles on them keep
/// working through the fallback star reward.
pub async fn delete_challenge(
    state: &SharedState,
    challenge_id: &str,
) -> Result<(), ServiceError> {
    let store = state.require_challenge_store().await?;

    if !store.delete_challenge(challenge_id).await? {
        return Err(ServiceError::NotFound(format!(
            "challenge `{challenge_id}` not found"
        )));
    }

    Ok(())
}

/// Explicitly assign a challenge to a user, rejecting duplicates.
///
/// This is the stricter entry point used by the join-a-global-challenge
/// flow; the personal flow usually skips it and lets [`toggle`] create the
/// assignment on first use.
pub async fn assign(
    state: &SharedState,
    user_id: &str,
    challenge_id: &str,
) -> Result<(), ServiceError> {
    let store = state.require_challenge_store().await?;
    let lock = state.pair_lock(user_id, challenge_id);
    let _guard = lock.lock().await;

    let Some(challenge) = store.find_challenge(challenge_id).await? else {
        return Err(ServiceError::NotFound(format!(
            "challenge `{challenge_id}` not found"
        )));
    };

    if store.find_assignment(user_id, challenge_id).await?.is_some() {
        return Err(ServiceError::DuplicateAssignment {
            user_id: user_id.to_owned(),
            challenge_id: challenge_id.to_owned(),
        });
    }

    store
        .put_assignment(AssignmentEntity::new(user_id, challenge_id))
        .await?;

    // Advisory display counter; not part of the consistency guarantees.
    if challenge.is_global {
        let mut challenge = challenge;
        challenge.participants_count += 1;
        store.put_challenge(challenge).await?;
    }

    debug!(user = %user_id, challenge = %challenge_id, "challenge assigned");

    Ok(())
}

/// Flip the completion state of a user/challenge pair and reconcile the
/// user's aggregate stats in the same logical unit.
///
/// A missing assignment is created on the fly (toggle acts as
/// assign-and-complete in one step) and a missing user is materialized with
/// zero stats first. The pair mutex serializes concurrent toggles so each
/// transition applies its delta exactly once.
pub async fn toggle(
    state: &SharedState,
    user_id: &str,
    challenge_id: &str,
) -> Result<ToggleResponse, ServiceError> {
    let store = state.require_challenge_store().await?;
    let lock = state.pair_lock(user_id, challenge_id);
    let _guard = lock.lock().await;

    let existing = store.find_assignment(user_id, challenge_id).await?;
    let transition = Completion::of(existing.as_ref()).toggle();

    let mut assignment =
        existing.unwrap_or_else(|| AssignmentEntity::new(user_id, challenge_id));
    assignment.completed = transition.completed();
    assignment.completed_at = transition.completed().then(SystemTime::now);

    // Resolve the reward at toggle time; a stale or deleted challenge
    // reference falls back to a fixed value instead of failing the toggle.
    let challenge = store.find_challenge(challenge_id).await?;
    let stars = challenge
        .as_ref()
        .map(|challenge| challenge.stars)
        .unwrap_or(completion::FALLBACK_STARS);

    let mut user = match store.find_user(user_id).await? {
        Some(user) => user,
        None => UserEntity::with_default_stats(user_id, DEFAULT_USER_NAME),
    };
    completion::reconcile(&mut user, transition, stars);

    store.put_assignment(assignment.clone()).await?;
    store.put_user(user.clone()).await?;

    // Advisory display counter on global challenges; best-effort only.
    if let Some(mut challenge) = challenge.filter(|challenge| challenge.is_global) {
        match transition {
            Transition::Completed => challenge.completed_count += 1,
            Transition::Uncompleted => {
                challenge.completed_count = challenge.completed_count.saturating_sub(1)
            }
        }
        store.put_challenge(challenge).await?;
    }

    debug!(
        user = %user.id,
        challenge = %challenge_id,
        completed = assignment.completed,
        "challenge completion toggled"
    );

    Ok(ToggleResponse {
        completed: assignment.completed,
        user_stats: (&user).into(),
    })
}

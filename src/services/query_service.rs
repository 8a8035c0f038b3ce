use std::collections::HashMap;

use tracing::info;

use crate::{
    dto::{
        challenge::{ChallengeFilter, ChallengeResponse},
        leaderboard::LeaderboardEntry,
    },
    error::ServiceError,
    state::SharedState,
};

/// Every challenge the user holds an assignment for, annotated with the
/// assignment's completion flag.
///
/// The filter is a pure post-projection step. Entries come back in challenge
/// insertion order; callers must not rely on a particular sort.
pub async fn list_user_challenges(
    state: &SharedState,
    user_id: &str,
    filter: Option<ChallengeFilter>,
) -> Result<Vec<ChallengeResponse>, ServiceError> {
    let store = state.require_challenge_store().await?;
    let snapshot = store.snapshot().await?;

    let completed_by_challenge: HashMap<&str, bool> = snapshot
        .assignments
        .iter()
        .filter(|assignment| assignment.user_id == user_id)
        .map(|assignment| (assignment.challenge_id.as_str(), assignment.completed))
        .collect();

    let mut result = Vec::new();
    for challenge in snapshot.challenges {
        let Some(&completed) = completed_by_challenge.get(challenge.id.as_str()) else {
            continue;
        };
        if filter.is_some_and(|filter| !filter.keeps(completed)) {
            continue;
        }
        result.push((challenge, completed).into());
    }

    Ok(result)
}

/// Every global challenge, annotated with the requesting user's completion
/// flag (false without an assignment).
pub async fn list_global_challenges(
    state: &SharedState,
    user_id: &str,
) -> Result<Vec<ChallengeResponse>, ServiceError> {
    ensure_seeded(state).await?;

    let store = state.require_challenge_store().await?;
    let snapshot = store.snapshot().await?;

    let completed_by_challenge: HashMap<&str, bool> = snapshot
        .assignments
        .iter()
        .filter(|assignment| assignment.user_id == user_id)
        .map(|assignment| (assignment.challenge_id.as_str(), assignment.completed))
        .collect();

    Ok(snapshot
        .challenges
        .into_iter()
        .filter(|challenge| challenge.is_global)
        .map(|challenge| {
            let completed = completed_by_challenge
                .get(challenge.id.as_str())
                .copied()
                .unwrap_or(false);
            (challenge, completed).into()
        })
        .collect())
}

/// Ranked leaderboard over completed assignments.
///
/// One entry per user with at least one completion. Sorted by completed
/// count descending; ties break by ascending user id so the order is
/// deterministic across calls. Ranks are the fresh 1-based positions.
pub async fn leaderboard(state: &SharedState) -> Result<Vec<LeaderboardEntry>, ServiceError> {
    let store = state.require_challenge_store().await?;
    let snapshot = store.snapshot().await?;

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for assignment in &snapshot.assignments {
        if assignment.completed {
            *counts.entry(assignment.user_id.as_str()).or_insert(0) += 1;
        }
    }

    let names: HashMap<&str, &str> = snapshot
        .users
        .iter()
        .map(|user| (user.id.as_str(), user.name.as_str()))
        .collect();

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(index, (user_id, completed_count))| LeaderboardEntry {
            id: user_id.to_owned(),
            name: names.get(user_id).copied().unwrap_or("User").to_owned(),
            completed_count,
            rank: index as u32 + 1,
            avatar: None,
        })
        .collect())
}

/// Install the configured global challenge seed set, at most once per
/// process lifetime, lazily on the first global read.
///
/// Seeding skips ids already present, so a failed attempt can safely retry
/// on the next read.
async fn ensure_seeded(state: &SharedState) -> Result<(), ServiceError> {
    state
        .seed_guard()
        .get_or_try_init(|| async {
            let store = state.require_challenge_store().await?;
            let mut installed = 0usize;
            for seed in state.config().seed_challenges() {
                if store.find_challenge(&seed.id).await?.is_none() {
                    store.put_challenge(seed).await?;
                    installed += 1;
                }
            }
            info!(installed, "installed global challenge seed set");
            Ok::<(), ServiceError>(())
        })
        .await
        .map(|_| ())
}

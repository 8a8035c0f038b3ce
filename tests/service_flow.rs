//! Service-level tests driving the core flows against the in-memory store.

use std::sync::Arc;

use challenge_arena_back::{
    config::AppConfig,
    dao::{
        challenge_store::{ChallengeStore, memory::MemoryChallengeStore},
        models::{AssignmentEntity, Difficulty},
    },
    dto::{
        challenge::{ChallengeFilter, CreateChallengeRequest},
        user::CreateUserRequest,
    },
    error::ServiceError,
    services::{challenge_service, query_service, user_service},
    state::{AppState, SharedState},
};

async fn fresh_state() -> (SharedState, Arc<MemoryChallengeStore>) {
    let state = AppState::new(AppConfig::default());
    let store = Arc::new(MemoryChallengeStore::new());
    state.install_challenge_store(store.clone()).await;
    (state, store)
}

fn challenge_request(title: &str, stars: u32, difficulty: Difficulty) -> CreateChallengeRequest {
    CreateChallengeRequest {
        title: title.into(),
        description: format!("{title} description"),
        difficulty,
        stars,
        deadline: "2026-12-31T00:00:00Z".into(),
        created_by: None,
        is_ai: false,
        is_global: false,
    }
}

async fn create_challenge(state: &SharedState, title: &str, stars: u32) -> String {
    let response =
        challenge_service::create_challenge(state, challenge_request(title, stars, Difficulty::Medium))
            .await
            .unwrap();
    response.id
}

#[tokio::test]
async fn toggle_twice_restores_stats_exactly() {
    let (state, _store) = fresh_state().await;
    let challenge_id = create_challenge(&state, "Morning run", 7).await;

    // First toggle auto-creates the assignment and completes it.
    let first = challenge_service::toggle(&state, "u1", &challenge_id)
        .await
        .unwrap();
    assert!(first.completed);
    assert_eq!(first.user_stats.completed_challenges, 1);
    assert_eq!(first.user_stats.total_stars, 7);

    let second = challenge_service::toggle(&state, "u1", &challenge_id)
        .await
        .unwrap();
    assert!(!second.completed);
    assert_eq!(second.user_stats.completed_challenges, 0);
    assert_eq!(second.user_stats.total_stars, 0);
}

#[tokio::test]
async fn uncompletion_never_drives_counters_negative() {
    let (state, store) = fresh_state().await;
    let challenge_id = create_challenge(&state, "Ice bath", 9).await;

    // Completed assignment for a user whose aggregates were never credited.
    let mut assignment = AssignmentEntity::new("u1", challenge_id.clone());
    assignment.completed = true;
    store.put_assignment(assignment).await.unwrap();

    let outcome = challenge_service::toggle(&state, "u1", &challenge_id)
        .await
        .unwrap();
    assert!(!outcome.completed);
    assert_eq!(outcome.user_stats.completed_challenges, 0);
    assert_eq!(outcome.user_stats.total_stars, 0);
}

#[tokio::test]
async fn can_publish_flips_at_five_completions() {
    let (state, _store) = fresh_state().await;

    let mut ids = Vec::new();
    for index in 0..5 {
        ids.push(create_challenge(&state, &format!("challenge {index}"), 3).await);
    }

    for id in &ids[..4] {
        let outcome = challenge_service::toggle(&state, "u1", id).await.unwrap();
        assert!(!outcome.user_stats.can_publish);
    }

    let fifth = challenge_service::toggle(&state, "u1", &ids[4])
        .await
        .unwrap();
    assert_eq!(fifth.user_stats.completed_challenges, 5);
    assert!(fifth.user_stats.can_publish);

    let dropped = challenge_service::toggle(&state, "u1", &ids[4])
        .await
        .unwrap();
    assert_eq!(dropped.user_stats.completed_challenges, 4);
    assert!(!dropped.user_stats.can_publish);
}

#[tokio::test]
async fn leaderboard_ranks_by_count_with_deterministic_ties() {
    let (state, _store) = fresh_state().await;

    let mut ids = Vec::new();
    for index in 0..5 {
        ids.push(create_challenge(&state, &format!("challenge {index}"), 2).await);
    }

    user_service::get_user(&state, "alice").await.unwrap();
    user_service::get_user(&state, "bob").await.unwrap();
    user_service::get_user(&state, "carol").await.unwrap();

    for id in &ids[..3] {
        challenge_service::toggle(&state, "alice", id).await.unwrap();
    }
    for id in &ids {
        challenge_service::toggle(&state, "bob", id).await.unwrap();
        challenge_service::toggle(&state, "carol", id).await.unwrap();
    }

    let entries = query_service::leaderboard(&state).await.unwrap();
    assert_eq!(entries.len(), 3);

    // bob and carol tie on 5; the tie breaks by ascending user id.
    assert_eq!(entries[0].id, "bob");
    assert_eq!(entries[0].completed_count, 5);
    assert_eq!(entries[1].id, "carol");
    assert_eq!(entries[1].completed_count, 5);
    assert_eq!(entries[2].id, "alice");
    assert_eq!(entries[2].completed_count, 3);

    let ranks: Vec<u32> = entries.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn leaderboard_skips_users_without_completions_and_names_unknowns() {
    let (state, store) = fresh_state().await;
    let challenge_id = create_challenge(&state, "Plank", 4).await;

    // A completion from a user that never got a profile record.
    let mut assignment = AssignmentEntity::new("ghost", challenge_id.clone());
    assignment.completed = true;
    store.put_assignment(assignment).await.unwrap();

    // An incomplete assignment must not produce an entry.
    challenge_service::assign(&state, "idler", &challenge_id)
        .await
        .unwrap();

    let entries = query_service::leaderboard(&state).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "ghost");
    assert_eq!(entries[0].name, "User");
    assert_eq!(entries[0].rank, 1);
}

#[tokio::test]
async fn duplicate_assign_is_rejected_and_leaves_one_record() {
    let (state, store) = fresh_state().await;
    let challenge_id = create_challenge(&state, "Meditation", 5).await;

    challenge_service::assign(&state, "u1", &challenge_id)
        .await
        .unwrap();

    let err = challenge_service::assign(&state, "u1", &challenge_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateAssignment { .. }));

    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.assignments.len(), 1);
    assert!(!snapshot.assignments[0].completed);
}

#[tokio::test]
async fn assign_requires_an_existing_challenge() {
    let (state, _store) = fresh_state().await;

    let err = challenge_service::assign(&state, "u1", "no-such-challenge")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn filters_partition_the_challenge_list() {
    let (state, _store) = fresh_state().await;

    let first = create_challenge(&state, "first", 1).await;
    let second = create_challenge(&state, "second", 1).await;
    let third = create_challenge(&state, "third", 1).await;

    challenge_service::toggle(&state, "u1", &first).await.unwrap();
    challenge_service::assign(&state, "u1", &second).await.unwrap();
    challenge_service::toggle(&state, "u1", &third).await.unwrap();

    let active =
        query_service::list_user_challenges(&state, "u1", Some(ChallengeFilter::Active))
            .await
            .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second);

    let completed =
        query_service::list_user_challenges(&state, "u1", Some(ChallengeFilter::Completed))
            .await
            .unwrap();
    assert_eq!(completed.len(), 2);
    assert!(completed.iter().all(|challenge| challenge.completed));

    let all = query_service::list_user_challenges(&state, "u1", None)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn listing_only_covers_the_requesting_user() {
    let (state, _store) = fresh_state().await;

    let mine = create_challenge(&state, "mine", 1).await;
    let theirs = create_challenge(&state, "theirs", 1).await;

    challenge_service::toggle(&state, "u1", &mine).await.unwrap();
    challenge_service::toggle(&state, "u2", &theirs).await.unwrap();

    let listed = query_service::list_user_challenges(&state, "u1", None)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, mine);
}

#[tokio::test]
async fn toggle_falls_back_to_fixed_reward_for_missing_challenges() {
    let (state, _store) = fresh_state().await;

    let outcome = challenge_service::toggle(&state, "u1", "stale-reference")
        .await
        .unwrap();
    assert!(outcome.completed);
    assert_eq!(outcome.user_stats.completed_challenges, 1);
    assert_eq!(outcome.user_stats.total_stars, 5);
}

#[tokio::test]
async fn global_listing_seeds_once_and_annotates_completion() {
    let (state, _store) = fresh_state().await;

    let first_read = query_service::list_global_challenges(&state, "u1")
        .await
        .unwrap();
    assert_eq!(first_read.len(), 5);
    assert!(first_read.iter().all(|challenge| challenge.is_global));
    assert!(first_read.iter().all(|challenge| !challenge.completed));

    challenge_service::toggle(&state, "u1", "g1").await.unwrap();
    // A personal challenge must not leak into the global view.
    create_challenge(&state, "personal", 3).await;

    let second_read = query_service::list_global_challenges(&state, "u1")
        .await
        .unwrap();
    assert_eq!(second_read.len(), 5);
    let fitness = second_read
        .iter()
        .find(|challenge| challenge.id == "g1")
        .unwrap();
    assert!(fitness.completed);

    // Another user sees the same set without u1's flags.
    let other_view = query_service::list_global_challenges(&state, "u2")
        .await
        .unwrap();
    assert!(other_view.iter().all(|challenge| !challenge.completed));
}

#[tokio::test]
async fn get_user_materializes_default_profile() {
    let (state, store) = fresh_state().await;

    let profile = user_service::get_user(&state, "newcomer").await.unwrap();
    assert_eq!(profile.name, "Challenger");
    assert_eq!(profile.completed_challenges, 0);
    assert_eq!(profile.total_stars, 0);
    assert!(!profile.can_publish);

    assert!(store.find_user("newcomer").await.unwrap().is_some());
}

#[tokio::test]
async fn create_user_is_idempotent_on_existing_ids() {
    let (state, _store) = fresh_state().await;

    user_service::create_user(
        &state,
        CreateUserRequest {
            id: "u9".into(),
            name: "Dana".into(),
        },
    )
    .await
    .unwrap();

    let challenge_id = create_challenge(&state, "Stretching", 2).await;
    challenge_service::toggle(&state, "u9", &challenge_id)
        .await
        .unwrap();

    let again = user_service::create_user(
        &state,
        CreateUserRequest {
            id: "u9".into(),
            name: "Somebody Else".into(),
        },
    )
    .await
    .unwrap();

    // The original record survives, stats included.
    assert_eq!(again.name, "Dana");
    assert_eq!(again.completed_challenges, 1);
}

#[tokio::test]
async fn rename_requires_an_existing_user() {
    let (state, _store) = fresh_state().await;

    let err = user_service::rename_user(&state, "unknown", "Zoe".into())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn end_to_end_create_assign_toggle_roundtrip() {
    let (state, _store) = fresh_state().await;

    let created = challenge_service::create_challenge(
        &state,
        challenge_request("Climb a mountain", 8, Difficulty::Hard),
    )
    .await
    .unwrap();
    assert_eq!(created.stars, 8);
    assert_eq!(created.participants_count, 0);

    challenge_service::assign(&state, "u1", &created.id)
        .await
        .unwrap();

    let completed = challenge_service::toggle(&state, "u1", &created.id)
        .await
        .unwrap();
    assert!(completed.completed);
    assert_eq!(completed.user_stats.completed_challenges, 1);
    assert_eq!(completed.user_stats.total_stars, 8);
    assert!(!completed.user_stats.can_publish);

    let reverted = challenge_service::toggle(&state, "u1", &created.id)
        .await
        .unwrap();
    assert!(!reverted.completed);
    assert_eq!(reverted.user_stats.completed_challenges, 0);
    assert_eq!(reverted.user_stats.total_stars, 0);
    assert!(!reverted.user_stats.can_publish);
}

#[tokio::test]
async fn concurrent_toggles_on_one_pair_apply_each_delta_once() {
    let (state, _store) = fresh_state().await;
    let challenge_id = create_challenge(&state, "Sprint", 4).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = state.clone();
        let challenge_id = challenge_id.clone();
        handles.push(tokio::spawn(async move {
            challenge_service::toggle(&state, "u1", &challenge_id)
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // An even number of toggles always lands back on incomplete/zero.
    let final_state = query_service::list_user_challenges(&state, "u1", None)
        .await
        .unwrap();
    assert_eq!(final_state.len(), 1);
    assert!(!final_state[0].completed);

    let profile = user_service::get_user(&state, "u1").await.unwrap();
    assert_eq!(profile.completed_challenges, 0);
    assert_eq!(profile.total_stars, 0);
}

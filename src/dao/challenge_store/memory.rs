use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::dao::{
    challenge_store::ChallengeStore,
    models::{AssignmentEntity, ChallengeEntity, StoreSnapshot, UserEntity},
    storage::StorageResult,
};

/// Volatile in-process store; lifetime equals process lifetime.
///
/// All three collections live behind one lock, so a [`StoreSnapshot`] is
/// always internally consistent. `IndexMap` keeps insertion order, which the
/// listing views surface as-is.
#[derive(Clone, Default)]
pub struct MemoryChallengeStore {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    challenges: IndexMap<String, ChallengeEntity>,
    users: IndexMap<String, UserEntity>,
    assignments: IndexMap<(String, String), AssignmentEntity>,
}

impl MemoryChallengeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn put_challenge(&self, challenge: ChallengeEntity) {
        let mut guard = self.inner.write().await;
        guard.challenges.insert(challenge.id.clone(), challenge);
    }

    async fn find_challenge(&self, id: &str) -> Option<ChallengeEntity> {
        let guard = self.inner.read().await;
        guard.challenges.get(id).cloned()
    }

    async fn delete_challenge(&self, id: &str) -> bool {
        let mut guard = self.inner.write().await;
        // shift_remove keeps the listing order of the survivors intact.
        guard.challenges.shift_remove(id).is_some()
    }

    async fn put_user(&self, user: UserEntity) {
        let mut guard = self.inner.write().await;
        guard.users.insert(user.id.clone(), user);
    }

    async fn find_user(&self, id: &str) -> Option<UserEntity> {
        let guard = self.inner.read().await;
        guard.users.get(id).cloned()
    }

    async fn put_assignment(&self, assignment: AssignmentEntity) {
        let mut guard = self.inner.write().await;
        let key = (assignment.user_id.clone(), assignment.challenge_id.clone());
        guard.assignments.insert(key, assignment);
    }

    async fn find_assignment(&self, user_id: &str, challenge_id: &str) -> Option<AssignmentEntity> {
        let guard = self.inner.read().await;
        guard
            .assignments
            .get(&(user_id.to_owned(), challenge_id.to_owned()))
            .cloned()
    }

    async fn snapshot(&self) -> StoreSnapshot {
        let guard = self.inner.read().await;
        StoreSnapshot {
            challenges: guard.challenges.values().cloned().collect(),
            users: guard.users.values().cloned().collect(),
            assignments: guard.assignments.values().cloned().collect(),
        }
    }
}

impl ChallengeStore for MemoryChallengeStore {
    fn put_challenge(&self, challenge: ChallengeEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.put_challenge(challenge).await;
            Ok(())
        })
    }

    fn find_challenge(
        &self,
        id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<ChallengeEntity>>> {
        let store = self.clone();
        let id = id.to_owned();
        Box::pin(async move { Ok(store.find_challenge(&id).await) })
    }

    fn delete_challenge(&self, id: &str) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let id = id.to_owned();
        Box::pin(async move { Ok(store.delete_challenge(&id).await) })
    }

    fn put_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.put_user(user).await;
            Ok(())
        })
    }

    fn find_user(&self, id: &str) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        let id = id.to_owned();
        Box::pin(async move { Ok(store.find_user(&id).await) })
    }

    fn put_assignment(&self, assignment: AssignmentEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.put_assignment(assignment).await;
            Ok(())
        })
    }

    fn find_assignment(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<AssignmentEntity>>> {
        let store = self.clone();
        let user_id = user_id.to_owned();
        let challenge_id = challenge_id.to_owned();
        Box::pin(async move { Ok(store.find_assignment(&user_id, &challenge_id).await) })
    }

    fn snapshot(&self) -> BoxFuture<'static, StorageResult<StoreSnapshot>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.snapshot().await) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

/// In-process store backing the default deployment.
pub mod memory;

use crate::dao::models::{AssignmentEntity, ChallengeEntity, StoreSnapshot, UserEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Abstraction over the persistence layer for challenges, users and
/// assignments.
///
/// The service layer is written purely against this interface so any
/// datastore (in-memory maps, a relational table, a document store) can back
/// it. `put_*` operations are upserts; `find_*` operations return `None`
/// rather than failing when the record is absent.
pub trait ChallengeStore: Send + Sync {
    fn put_challenge(&self, challenge: ChallengeEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_challenge(&self, id: &str) -> BoxFuture<'static, StorageResult<Option<ChallengeEntity>>>;
    fn delete_challenge(&self, id: &str) -> BoxFuture<'static, StorageResult<bool>>;
    fn put_user(&self, user: UserEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_user(&self, id: &str) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    fn put_assignment(&self, assignment: AssignmentEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn find_assignment(
        &self,
        user_id: &str,
        challenge_id: &str,
    ) -> BoxFuture<'static, StorageResult<Option<AssignmentEntity>>>;
    /// Consistent copy of all three collections at a single instant, used by
    /// the read views.
    fn snapshot(&self) -> BoxFuture<'static, StorageResult<StoreSnapshot>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

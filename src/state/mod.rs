/// Completion state machine and stats reconciliation rule.
pub mod completion;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OnceCell, RwLock, watch};

use crate::{
    config::AppConfig, dao::challenge_store::ChallengeStore, error::ServiceError,
};

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Key identifying one user/challenge pair in the mutation lock registry.
type PairKey = (String, String);

/// Central application state: the installed store, the seed configuration,
/// and the per-pair mutation locks.
pub struct AppState {
    challenge_store: RwLock<Option<Arc<dyn ChallengeStore>>>,
    config: AppConfig,
    degraded: watch::Sender<bool>,
    pair_locks: DashMap<PairKey, Arc<Mutex<()>>>,
    seeded: OnceCell<()>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            challenge_store: RwLock::new(None),
            config,
            degraded: degraded_tx,
            pair_locks: DashMap::new(),
            seeded: OnceCell::new(),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn challenge_store(&self) -> Option<Arc<dyn ChallengeStore>> {
        let guard = self.challenge_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the current store or fail with [`ServiceError::Degraded`].
    pub async fn require_challenge_store(&self) -> Result<Arc<dyn ChallengeStore>, ServiceError> {
        self.challenge_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a store implementation and leave degraded mode.
    pub async fn install_challenge_store(&self, store: Arc<dyn ChallengeStore>) {
        {
            let mut guard = self.challenge_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_challenge_store(&self) {
        {
            let mut guard = self.challenge_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }

    /// Mutation lock for one user/challenge pair.
    ///
    /// Holding the returned mutex across a read-modify-write guarantees the
    /// reconciliation delta for that pair is applied exactly once per
    /// transition, even under concurrent toggles.
    pub fn pair_lock(&self, user_id: &str, challenge_id: &str) -> Arc<Mutex<()>> {
        self.pair_locks
            .entry((user_id.to_owned(), challenge_id.to_owned()))
            .or_default()
            .clone()
    }

    /// Guard ensuring the global-challenge seed set is installed at most once
    /// per process lifetime.
    pub fn seed_guard(&self) -> &OnceCell<()> {
        &self.seeded
    }
}

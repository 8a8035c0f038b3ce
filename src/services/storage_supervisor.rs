use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{challenge_store::ChallengeStore, storage::StorageError},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Connect to the storage backend, install it into the shared state, and
/// keep polling its health, flipping the degraded flag when connectivity
/// changes.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn ChallengeStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        let store = match connect().await {
            Ok(store) => store,
            Err(err) => {
                warn!(error = %err, "storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
                continue;
            }
        };

        state.install_challenge_store(store.clone()).await;
        info!("storage connection established; leaving degraded mode");
        delay = INITIAL_DELAY;

        loop {
            sleep(HEALTH_POLL_INTERVAL).await;

            match store.health_check().await {
                Ok(()) => {
                    if state.is_degraded() {
                        info!("storage healthy again; leaving degraded mode");
                        state.update_degraded(false);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "storage health check failed; entering degraded mode");
                    state.update_degraded(true);

                    if let Err(reconnect_err) = store.try_reconnect().await {
                        warn!(error = %reconnect_err, "storage reconnect failed; dropping store");
                        state.clear_challenge_store().await;
                        break;
                    }
                }
            }
        }

        sleep(delay).await;
        delay = (delay * 2).min(MAX_DELAY);
    }
}

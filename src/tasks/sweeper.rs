//! Expiration Sweeper
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cache::{CacheStore, StatsRecorder};
use crate::error::{CacheError, Result};

/// Handle to a running expiration sweep loop.
///
/// The loop wakes every `interval`, takes the store's write lock once and
/// removes every expired entry. Stopping is idempotent: any number of stop
/// requests, before or after the loop has exited, return without blocking
/// on the loop. Dropping the handle also stops the loop.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl Sweeper {
    /// Spawns the sweep loop on the current Tokio runtime.
    ///
    /// The first sweep runs one full `interval` after spawning.
    ///
    /// # Errors
    /// - `CacheError::InvalidConfig` if `interval` is zero
    /// - `CacheError::NoRuntime` if called outside a Tokio runtime
    pub fn spawn<V>(
        store: Arc<RwLock<CacheStore<V>>>,
        stats: Arc<StatsRecorder>,
        interval: Duration,
    ) -> Result<Self>
    where
        V: Send + Sync + 'static,
    {
        if interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "gc_interval must be greater than zero".to_string(),
            ));
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = runtime.spawn(run_sweeper(store, stats, interval, shutdown_rx));

        Ok(Self {
            shutdown_tx,
            handle: Mutex::new(Some(handle)),
            interval,
        })
    }

    /// Returns the fixed interval between sweeps.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true until a stop has been requested or the loop has exited.
    pub fn is_running(&self) -> bool {
        if *self.shutdown_tx.borrow() {
            return false;
        }
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Asks the loop to exit without waiting for it.
    pub fn request_stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Asks the loop to exit and waits until it has.
    ///
    /// Once this returns no further sweeps will run. Calling it again is a
    /// no-op.
    pub async fn stop(&self) {
        self.request_stop();

        // Take the handle before awaiting so the mutex is not held across
        // the await point.
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            // A panicked or cancelled task has exited as well.
            let _ = handle.await;
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.request_stop();
    }
}

async fn run_sweeper<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    stats: Arc<StatsRecorder>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    V: Send + Sync + 'static,
{
    info!(interval_ms = interval.as_millis() as u64, "Expiration sweeper started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            changed = shutdown_rx.changed() => {
                // A dropped sender means the owning handle is gone.
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let removed = store.write().delete_expired();
                stats.record_sweep();
                stats.record_expired(removed);

                if removed > 0 {
                    info!(removed, "Expiration sweep removed expired entries");
                } else {
                    debug!("Expiration sweep found no expired entries");
                }
            }
        }
    }

    info!("Expiration sweeper stopped");
}

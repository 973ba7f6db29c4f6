//! Backend polling loop.
//!
//! The poller is the only writer that reconciles the alert store against
//! the backend: one immediate fetch-and-replace cycle at spawn, then one
//! per interval. It is policy-free beyond that; failure handling is
//! log-and-retain, and the next tick is the only retry.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::events::MonitorEvent;
use crate::ports::{AlertSource, MonitorEventEmitter};
use crate::store::AlertStore;

/// Default refresh cadence (the reference dashboard polls every 30 s).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Gap between refresh cycles. The first cycle runs immediately.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Handle to a running poll loop.
///
/// Dropping the handle does not stop the loop; call [`AlertPoller::stop`].
pub struct AlertPoller {
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

impl AlertPoller {
    /// Spawn the polling task.
    ///
    /// The first fetch happens immediately, then once per
    /// `config.interval` (missed ticks are skipped, not bunched). Fetch
    /// failures are logged, emitted as [`MonitorEvent::PollFailed`], and
    /// leave the store's previous state in place.
    pub fn spawn(
        source: Arc<dyn AlertSource>,
        store: Arc<AlertStore>,
        emitter: Arc<dyn MonitorEventEmitter>,
        config: PollerConfig,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            debug!(interval_ms = config.interval.as_millis(), "starting alert poller");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match source.fetch_alerts().await {
                            Ok(records) => {
                                // A stop issued while the fetch was in
                                // flight discards the result.
                                if task_token.is_cancelled() {
                                    debug!("discarding poll result after stop");
                                    break;
                                }
                                store.replace(records);
                            }
                            Err(e) => {
                                warn!(error = %e, "alert poll failed, keeping previous state");
                                emitter.emit(MonitorEvent::poll_failed(e.to_string()));
                            }
                        }
                    }
                    _ = task_token.cancelled() => {
                        debug!("alert poller cancelled");
                        break;
                    }
                }
            }
        });

        Self { cancel_token, task }
    }

    /// Stop the loop and wait for the task to finish.
    ///
    /// An in-flight fetch is allowed to complete; its result is discarded.
    pub async fn stop(self) {
        self.cancel_token.cancel();
        let _ = self.task.await;
    }
}

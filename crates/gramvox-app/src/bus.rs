//! Broadcast fan-out for monitor events.

use gramvox_core::{MonitorEvent, MonitorEventEmitter};
use tokio::sync::broadcast;

/// Default per-subscriber buffer depth.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus delivering [`MonitorEvent`]s to every subscriber.
///
/// Thin wrapper over a `tokio::sync::broadcast` channel. Emission never
/// blocks and never fails: with no subscribers the event is dropped, and a
/// subscriber that falls more than the buffer depth behind loses the oldest
/// events rather than stalling the sender.
///
/// Clones share the underlying channel, so the store, the poller, and the
/// voice bridge can each hold a handle while consumers subscribe through
/// any of them.
#[derive(Debug, Clone)]
pub struct MonitorBus {
    sender: broadcast::Sender<MonitorEvent>,
}

impl MonitorBus {
    /// Bus whose subscribers each buffer up to `capacity` events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Bus with the default buffer depth.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Subscribe to events emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for MonitorBus {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl MonitorEventEmitter for MonitorBus {
    fn emit(&self, event: MonitorEvent) {
        // send only errors when no subscriber exists; events are
        // fire-and-forget either way.
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn MonitorEventEmitter> {
        Box::new(self.clone())
    }
}

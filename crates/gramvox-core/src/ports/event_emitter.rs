//! Event emitter trait for cross-crate event broadcasting.
//!
//! This module defines the abstraction for publishing monitor events.
//! Implementations handle transport details (broadcast channels, SSE, GUI
//! bridges).

use crate::events::MonitorEvent;

/// Trait for emitting monitor events.
///
/// This abstraction keeps event plumbing consistent across the store, the
/// poller, and the voice bridge, and prevents channel types from becoming
/// part of the public API surface.
///
/// # Implementations
///
/// - `NoopEmitter` - for tests and headless contexts that don't need events
/// - Adapter-specific implementations (`gramvox-app`'s broadcast bus)
pub trait MonitorEventEmitter: Send + Sync {
    /// Emit a monitor event.
    ///
    /// Implementations should buffer or fan out without blocking; the store
    /// calls this synchronously after each mutation.
    fn emit(&self, event: MonitorEvent);

    /// Clone this emitter into a boxed trait object.
    ///
    /// This enables cloning of `Arc<dyn MonitorEventEmitter>` without
    /// requiring the underlying type to implement Clone.
    fn clone_box(&self) -> Box<dyn MonitorEventEmitter>;
}

/// A no-op event emitter for tests and headless contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl MonitorEventEmitter for NoopEmitter {
    fn emit(&self, _event: MonitorEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn MonitorEventEmitter> {
        Box::new(self.clone())
    }
}

//! Facade-level error type.

use gramvox_client::ApiError;
use gramvox_core::SettingsError;
use thiserror::Error;

/// Convenience alias for facade results.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Errors surfaced by [`VillageMonitor`](crate::VillageMonitor) operations.
///
/// Voice, store, and preference failures are handled where they occur
/// (logged, previous state retained) and never reach this type.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A backend request failed.
    #[error("backend request failed: {0}")]
    Api(#[from] ApiError),

    /// A requested setting value was rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

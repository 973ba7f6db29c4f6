//! Alert source port.
//!
//! The poller pulls the live alert set through this trait. The REST client
//! in `gramvox-client` is the production implementation; tests substitute
//! scripted sources.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AlertRecord;

/// Errors an alert source can produce.
///
/// All variants are non-fatal to consumers: the poller logs them and keeps
/// the previous live set.
#[derive(Debug, Error)]
pub enum AlertSourceError {
    /// The backend could not be reached.
    #[error("backend unreachable: {message}")]
    Network {
        /// Transport-level failure description.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body did not match the expected shape.
    #[error("invalid backend response: {message}")]
    InvalidResponse {
        /// Decode failure description.
        message: String,
    },
}

/// Port the poller pulls live alerts from.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch the current live alert set, newest first.
    async fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, AlertSourceError>;
}

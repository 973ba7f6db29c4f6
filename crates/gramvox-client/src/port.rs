//! Alert source port implementation.
//!
//! Implements the core-owned [`AlertSource`] trait for [`ApiClient`] and
//! maps client errors into the port error space at this boundary.

use async_trait::async_trait;
use gramvox_core::{AlertRecord, AlertSource, AlertSourceError};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

/// Convert a client error into the core port error.
fn map_source_error(err: ApiError) -> AlertSourceError {
    match err {
        ApiError::Status { status, .. } => AlertSourceError::Status { status },
        ApiError::NotFound { .. } => AlertSourceError::Status { status: 404 },
        ApiError::Network(e) => AlertSourceError::Network {
            message: e.to_string(),
        },
        ApiError::InvalidUrl(e) => AlertSourceError::Network {
            message: e.to_string(),
        },
        ApiError::Decode(e) => AlertSourceError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl<B: HttpBackend> AlertSource for ApiClient<B> {
    async fn fetch_alerts(&self) -> Result<Vec<AlertRecord>, AlertSourceError> {
        self.list_alerts().await.map_err(map_source_error)
    }
}

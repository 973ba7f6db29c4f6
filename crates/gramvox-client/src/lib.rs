#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod error;
mod http;
mod port;

// Client
pub use client::{ApiClient, ApiConfig, DefaultApiClient};

// Errors
pub use error::{ApiError, ApiResult};

// Transport seam
pub use http::{HttpBackend, ReqwestBackend};

// Canned-response transport for downstream test suites
#[cfg(any(test, feature = "test-utils"))]
pub use http::testing;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

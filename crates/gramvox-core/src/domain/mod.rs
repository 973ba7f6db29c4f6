//! Domain types for village monitoring.
//!
//! These types mirror the backend's wire shapes but carry no transport
//! concerns. They are shared by the store, the poller, the HTTP client,
//! and the voice layer.

mod alert;
mod stats;
mod village;

pub use alert::{AlertKind, AlertRecord, Severity};
pub use stats::{DashboardStats, SimulationOutcome, SimulationRequest};
pub use village::{SensorReading, Village};

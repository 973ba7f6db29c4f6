#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod bridge;
pub mod bus;
pub mod error;
pub mod monitor;

// Re-export the facade surface for convenience
pub use bridge::spawn_voice_bridge;
pub use bus::MonitorBus;
pub use error::{MonitorError, MonitorResult};
pub use monitor::{DashboardView, DefaultVillageMonitor, VillageMonitor, VillageStatus};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use tracing_subscriber as _;

#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod poller;
pub mod ports;
pub mod prefs;
pub mod settings;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::{
    AlertKind, AlertRecord, DashboardStats, SensorReading, Severity, SimulationOutcome,
    SimulationRequest, Village,
};
pub use events::MonitorEvent;
pub use poller::{AlertPoller, DEFAULT_POLL_INTERVAL, PollerConfig};
pub use ports::{AlertSource, AlertSourceError, MonitorEventEmitter, NoopEmitter};
pub use prefs::{PrefsError, data_root, load_language, persist_language, prefs_file_path};
pub use settings::{
    DEFAULT_BACKEND_URL, DEFAULT_POLL_INTERVAL_SECS, SUPPORTED_LANGUAGES, Settings, SettingsError,
    SettingsUpdate, validate_settings,
};
pub use store::{AlertStore, StoreError};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;

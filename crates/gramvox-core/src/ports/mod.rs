//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - No subprocess or filesystem implementation details
//! - Errors are port-owned; adapters map their own errors at the boundary

pub mod event_emitter;
pub mod source;

pub use event_emitter::{MonitorEventEmitter, NoopEmitter};
pub use source::{AlertSource, AlertSourceError};

#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod announcer;
pub mod engine;
pub mod error;
pub mod phrases;

// Re-export key types for convenience
pub use announcer::{AnnouncerState, VoiceAnnouncer, VoiceEvent};
pub use engine::spd::SpdEngine;
pub use engine::{EngineSignal, HostVoice, SpeechEngine, Utterance, UtteranceId};
pub use error::VoiceError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

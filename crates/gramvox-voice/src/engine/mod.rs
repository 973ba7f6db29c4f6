//! Speech engine adapter boundary.
//!
//! The [`SpeechEngine`] trait is the only place the crate touches host
//! audio. Engines return immediately from [`SpeechEngine::speak`] and
//! report utterance lifecycle asynchronously via [`EngineSignal`]s on the
//! channel handed out at construction. Voice lists may populate after
//! startup; [`EngineSignal::VoicesChanged`] tells consumers to re-read
//! [`SpeechEngine::voices`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VoiceError;

pub mod spd;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// ── Adapter types ──────────────────────────────────────────────────

/// Identity of one submitted utterance.
///
/// Engines assign these monotonically; lifecycle signals reference them so
/// that late signals for a preempted utterance can be told apart from
/// signals for the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId(u64);

impl UtteranceId {
    /// Mint an id. Engines assign these monotonically per submission.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// One voice the host synthesizer offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVoice {
    /// Engine-specific identifier, passed back when speaking.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Locale tag, e.g. `hi-IN` or `en-US`.
    pub locale: String,
}

/// A prepared speech request.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// Text to synthesize.
    pub text: String,

    /// Speech locale the text is in.
    pub locale: String,

    /// Specific voice to use, if one was resolved.
    pub voice: Option<HostVoice>,

    /// Playback rate multiplier (1.0 is the host default).
    pub rate: f32,

    /// Pitch multiplier (1.0 is the host default).
    pub pitch: f32,

    /// Volume in 0.0..=1.0.
    pub volume: f32,
}

impl Utterance {
    /// Create an utterance with host-default rate, pitch, and volume.
    #[must_use]
    pub fn new(text: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            locale: locale.into(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Lifecycle signals reported by an engine.
#[derive(Debug, Clone)]
pub enum EngineSignal {
    /// The utterance began playing.
    Started(UtteranceId),

    /// The utterance finished playing.
    Finished(UtteranceId),

    /// The utterance failed mid-playback or never started.
    Failed {
        /// The failed utterance.
        id: UtteranceId,
        /// Host-reported failure description.
        error: String,
    },

    /// The host's voice set changed; re-read [`SpeechEngine::voices`].
    VoicesChanged,
}

// ── Adapter trait ──────────────────────────────────────────────────

/// Capability boundary around the host's speech synthesizer.
pub trait SpeechEngine: Send + Sync {
    /// Whether the host can synthesize speech at all.
    fn is_available(&self) -> bool;

    /// Snapshot of the voices the host currently reports.
    ///
    /// May be empty until enumeration completes; the engine sends
    /// [`EngineSignal::VoicesChanged`] when the set changes.
    fn voices(&self) -> Vec<HostVoice>;

    /// Start speaking one utterance and return its id immediately.
    ///
    /// Playback runs in the background; completion arrives as a signal.
    fn speak(&self, utterance: &Utterance) -> Result<UtteranceId, VoiceError>;

    /// Stop all playback, current and pending. Fire and forget.
    fn cancel_all(&self);
}

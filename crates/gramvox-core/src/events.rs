//! Canonical event union for all monitor notifications.
//!
//! This module is the single source of truth for events consumed by
//! presentation adapters (dashboard widgets, the alerts list, the voice
//! status indicator).
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "alert_added", "alert": { "id": "…", "severity": "critical" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::AlertRecord;

/// Canonical event types for all adapters.
///
/// This enum unifies store mutations, poll outcomes, and voice lifecycle
/// changes into a single discriminated union. Each variant carries enough
/// context to be self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitorEvent {
    // ========== Alert Store Events ==========
    /// The live alert set was swapped wholesale by a poll cycle.
    AlertsReplaced {
        /// Size of the new live set.
        count: usize,
    },

    /// A single alert was prepended to the live set.
    AlertAdded {
        /// The record that was added.
        alert: AlertRecord,
    },

    /// An alert was dismissed and removed from the live set.
    AlertDismissed {
        /// Id of the removed record.
        #[serde(rename = "alertId")]
        alert_id: String,
    },

    /// The live set was emptied.
    AlertsCleared,

    // ========== Poller Events ==========
    /// A poll cycle failed; the previous live set is retained.
    PollFailed {
        /// Human-readable failure description.
        error: String,
    },

    // ========== Voice Events ==========
    /// The announcer moved between idle, speaking, and cancelling.
    VoiceStateChanged {
        /// New state label (`"idle"`, `"speaking"`, `"cancelling"`).
        state: String,
    },

    /// Host speech playback began for an announcement.
    SpeakingStarted,

    /// Host speech playback finished normally.
    SpeakingFinished,

    /// Host speech playback failed; the announcement is abandoned.
    SpeechFailed {
        /// Error description.
        error: String,
    },

    // ========== Preference Events ==========
    /// The active display language changed.
    LanguageChanged {
        /// New language code (`"en"`, `"hi"`, `"kn"`, `"ta"`, `"ml"`).
        language: String,
    },
}

impl MonitorEvent {
    /// Get the event name for wire protocols.
    ///
    /// Presentation adapters subscribe by these names; they must stay
    /// stable.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::AlertsReplaced { .. } => "alerts:replaced",
            Self::AlertAdded { .. } => "alerts:added",
            Self::AlertDismissed { .. } => "alerts:dismissed",
            Self::AlertsCleared => "alerts:cleared",
            Self::PollFailed { .. } => "alerts:poll_failed",
            Self::VoiceStateChanged { .. } => "voice:state_changed",
            Self::SpeakingStarted => "voice:speaking_started",
            Self::SpeakingFinished => "voice:speaking_finished",
            Self::SpeechFailed { .. } => "voice:error",
            Self::LanguageChanged { .. } => "language:changed",
        }
    }

    /// Create an alerts replaced event.
    pub const fn alerts_replaced(count: usize) -> Self {
        Self::AlertsReplaced { count }
    }

    /// Create an alert added event.
    pub const fn alert_added(alert: AlertRecord) -> Self {
        Self::AlertAdded { alert }
    }

    /// Create an alert dismissed event.
    pub fn alert_dismissed(alert_id: impl Into<String>) -> Self {
        Self::AlertDismissed {
            alert_id: alert_id.into(),
        }
    }

    /// Create a poll failed event.
    pub fn poll_failed(error: impl Into<String>) -> Self {
        Self::PollFailed {
            error: error.into(),
        }
    }

    /// Create a language changed event.
    pub fn language_changed(language: impl Into<String>) -> Self {
        Self::LanguageChanged {
            language: language.into(),
        }
    }
}

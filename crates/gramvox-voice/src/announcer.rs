//! Voice announcement controller.
//!
//! Serializes speech onto the host synthesizer: at most one utterance is
//! active, and a new request preempts the current one (no queueing). The
//! controller tracks playback through a state machine:
//!
//! ```text
//!   Idle → Speaking → Idle
//!     ▲       │
//!     │       ▼
//!     └── Cancelling
//! ```
//!
//! Transitions are driven by [`EngineSignal`]s delivered on the channel the
//! engine was constructed with; [`VoiceAnnouncer::spawn_signal_pump`] moves
//! them onto the controller. Signals for preempted utterances are dropped.

use std::sync::{Arc, Mutex};

use gramvox_core::AlertKind;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::engine::{EngineSignal, HostVoice, SpeechEngine, Utterance, UtteranceId};
use crate::phrases;

/// Playback rate, slightly slower than the host default for clarity.
const SPEECH_RATE: f32 = 0.9;

/// Neutral pitch.
const SPEECH_PITCH: f32 = 1.0;

/// Announcement volume.
const SPEECH_VOLUME: f32 = 0.8;

// ── State machine ──────────────────────────────────────────────────

/// Speech lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncerState {
    /// No utterance is active.
    Idle,

    /// The host confirmed an utterance is playing.
    Speaking,

    /// A cancel was issued and the host has not yet confirmed the end.
    Cancelling,
}

impl AnnouncerState {
    /// Stable lowercase label, used in events and status displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
            Self::Cancelling => "cancelling",
        }
    }
}

/// Events emitted by the announcer for the application layer.
#[derive(Debug, Clone)]
pub enum VoiceEvent {
    /// The state machine moved.
    StateChanged(AnnouncerState),

    /// Playback started on the host.
    SpeakingStarted,

    /// Playback ended, naturally or by cancellation.
    SpeakingFinished,

    /// The host reported a failure.
    Error(String),
}

struct Inner {
    enabled: bool,
    state: AnnouncerState,
    /// Utterance we want playing; submitted but possibly not yet started.
    current: Option<UtteranceId>,
    /// Most recently preempted utterance; its late signals are dropped.
    cancelled: Option<UtteranceId>,
    /// Fallback voice, re-resolved whenever the host voice set changes.
    default_voice: Option<HostVoice>,
}

// ── Controller ─────────────────────────────────────────────────────

/// Announcement controller over a [`SpeechEngine`].
pub struct VoiceAnnouncer {
    engine: Arc<dyn SpeechEngine>,
    inner: Mutex<Inner>,
    event_tx: mpsc::UnboundedSender<VoiceEvent>,
}

impl VoiceAnnouncer {
    /// Create the controller and a receiver for [`VoiceEvent`]s.
    ///
    /// Announcements start enabled. The default voice is resolved from
    /// whatever the engine reports now, which may be nothing yet.
    #[must_use]
    pub fn new(engine: Arc<dyn SpeechEngine>) -> (Arc<Self>, mpsc::UnboundedReceiver<VoiceEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let announcer = Arc::new(Self {
            inner: Mutex::new(Inner {
                enabled: true,
                state: AnnouncerState::Idle,
                current: None,
                cancelled: None,
                default_voice: pick_default_voice(&engine.voices()),
            }),
            engine,
            event_tx,
        });
        (announcer, event_rx)
    }

    /// Consume engine signals until the engine side closes.
    pub fn spawn_signal_pump(
        self: &Arc<Self>,
        mut signals: mpsc::UnboundedReceiver<EngineSignal>,
    ) -> tokio::task::JoinHandle<()> {
        let announcer = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                announcer.handle_signal(signal);
            }
            tracing::debug!("Engine signal channel closed");
        })
    }

    // ── Queries ────────────────────────────────────────────────────

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().unwrap().enabled
    }

    #[must_use]
    pub fn state(&self) -> AnnouncerState {
        self.inner.lock().unwrap().state
    }

    /// Whether the host confirmed an utterance is playing right now.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.state() == AnnouncerState::Speaking
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Enable or disable announcements.
    ///
    /// Disabling cancels any active utterance before the flag flips, so
    /// [`is_speaking`](Self::is_speaking) is false when this returns.
    pub fn set_enabled(&self, enabled: bool) {
        let mut events = Vec::new();
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.enabled == enabled {
                return;
            }
            if !enabled && (inner.current.is_some() || inner.state != AnnouncerState::Idle) {
                self.cancel_active_locked(&mut inner, &mut events);
            }
            inner.enabled = enabled;
        }
        tracing::info!(enabled, "Voice announcements toggled");
        for event in events {
            self.emit(event);
        }
    }

    /// Speak `text` in the given display language.
    ///
    /// No-op when disabled, when `text` is blank, or when the host has no
    /// synthesizer. Any active utterance is preempted first.
    pub fn speak(&self, text: &str, language: &str) {
        if text.trim().is_empty() {
            return;
        }
        if !self.engine.is_available() {
            tracing::debug!("No synthesizer available, dropping announcement");
            return;
        }

        let locale = phrases::speech_locale(language);
        let mut events = Vec::new();
        {
            // The lock is held across the engine calls so the signal pump
            // cannot observe the new utterance before `current` is set.
            let mut inner = self.inner.lock().unwrap();
            if !inner.enabled {
                return;
            }

            self.cancel_active_locked(&mut inner, &mut events);

            let voice = self.resolve_voice(&inner, locale, language);
            let mut utterance = Utterance::new(text, locale);
            utterance.voice = voice;
            utterance.rate = SPEECH_RATE;
            utterance.pitch = SPEECH_PITCH;
            utterance.volume = SPEECH_VOLUME;

            match self.engine.speak(&utterance) {
                Ok(id) => inner.current = Some(id),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to submit utterance");
                    events.push(VoiceEvent::Error(e.to_string()));
                }
            }
        }
        for event in events {
            self.emit(event);
        }
    }

    /// Cancel any active utterance unconditionally.
    pub fn stop(&self) {
        let mut events = Vec::new();
        {
            let mut inner = self.inner.lock().unwrap();
            self.cancel_active_locked(&mut inner, &mut events);
        }
        for event in events {
            self.emit(event);
        }
    }

    /// Speak `message` prefixed with the language's urgency marker.
    pub fn emergency_announcement(&self, message: &str, language: &str) {
        let marked = format!("{} {}", phrases::urgency_marker(language), message);
        self.speak(&marked, language);
    }

    /// Announce a hazard alert for a village in the given language.
    ///
    /// Message templates fall back from the requested language to English,
    /// then to a generic alert line for unrecognized hazards.
    pub fn announce_hazard(&self, kind: AlertKind, village_name: &str, language: &str) {
        let message = phrases::hazard_message(kind, village_name, language);
        self.speak(&message, language);
    }

    // ── Signal handling ────────────────────────────────────────────

    fn handle_signal(&self, signal: EngineSignal) {
        match signal {
            EngineSignal::Started(id) => self.on_started(id),
            EngineSignal::Finished(id) => self.on_finished(id),
            EngineSignal::Failed { id, error } => self.on_failed(id, &error),
            EngineSignal::VoicesChanged => self.on_voices_changed(),
        }
    }

    fn on_started(&self, id: UtteranceId) {
        let mut events = Vec::new();
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.current != Some(id) {
                return;
            }
            set_state_locked(&mut inner, AnnouncerState::Speaking, &mut events);
            events.push(VoiceEvent::SpeakingStarted);
        }
        for event in events {
            self.emit(event);
        }
    }

    fn on_finished(&self, id: UtteranceId) {
        let mut events = Vec::new();
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.cancelled == Some(id) {
                // The preempted utterance wound down; its end was already
                // reported when it was cancelled.
                inner.cancelled = None;
                if inner.state == AnnouncerState::Cancelling && inner.current.is_none() {
                    set_state_locked(&mut inner, AnnouncerState::Idle, &mut events);
                }
            } else if inner.current == Some(id) {
                inner.current = None;
                set_state_locked(&mut inner, AnnouncerState::Idle, &mut events);
                events.push(VoiceEvent::SpeakingFinished);
            }
        }
        for event in events {
            self.emit(event);
        }
    }

    fn on_failed(&self, id: UtteranceId, error: &str) {
        let mut events = Vec::new();
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.cancelled == Some(id) {
                // Cancelled utterances often exit abnormally; not a failure.
                inner.cancelled = None;
                if inner.state == AnnouncerState::Cancelling && inner.current.is_none() {
                    set_state_locked(&mut inner, AnnouncerState::Idle, &mut events);
                }
            } else if inner.current == Some(id) {
                tracing::warn!(%id, error, "Speech playback failed");
                inner.current = None;
                set_state_locked(&mut inner, AnnouncerState::Idle, &mut events);
                events.push(VoiceEvent::Error(error.to_string()));
            }
        }
        for event in events {
            self.emit(event);
        }
    }

    fn on_voices_changed(&self) {
        let voices = self.engine.voices();
        let mut inner = self.inner.lock().unwrap();
        inner.default_voice = pick_default_voice(&voices);
        tracing::debug!(count = voices.len(), "Host voices changed, default re-resolved");
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Clear the host queue and remember the preempted utterance.
    ///
    /// The host stop is fire and forget; the speaking flag flips here,
    /// before any confirmation arrives.
    fn cancel_active_locked(&self, inner: &mut Inner, events: &mut Vec<VoiceEvent>) {
        self.engine.cancel_all();

        let was_speaking = inner.state == AnnouncerState::Speaking;
        if let Some(active) = inner.current.take() {
            inner.cancelled = Some(active);
            set_state_locked(inner, AnnouncerState::Cancelling, events);
        }
        if was_speaking {
            events.push(VoiceEvent::SpeakingFinished);
        }
    }

    /// Pick a voice for the locale, falling back to the cached default.
    fn resolve_voice(&self, inner: &Inner, locale: &str, language: &str) -> Option<HostVoice> {
        self.engine
            .voices()
            .iter()
            .find(|v| v.locale.contains(locale) || v.locale.contains(language))
            .cloned()
            .or_else(|| inner.default_voice.clone())
    }

    fn emit(&self, event: VoiceEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Voice event receiver dropped");
        }
    }
}

impl Drop for VoiceAnnouncer {
    fn drop(&mut self) {
        self.engine.cancel_all();
    }
}

fn set_state_locked(inner: &mut Inner, new_state: AnnouncerState, events: &mut Vec<VoiceEvent>) {
    if inner.state != new_state {
        tracing::debug!(old = ?inner.state, new = ?new_state, "Announcer state transition");
        inner.state = new_state;
        events.push(VoiceEvent::StateChanged(new_state));
    }
}

/// First Hindi voice, else first US English voice, else the first voice.
fn pick_default_voice(voices: &[HostVoice]) -> Option<HostVoice> {
    voices
        .iter()
        .find(|v| v.locale.contains("hi"))
        .or_else(|| voices.iter().find(|v| v.locale.contains("en-US")))
        .or_else(|| voices.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::MockEngine;

    fn voice(id: &str, locale: &str) -> HostVoice {
        HostVoice {
            id: id.to_string(),
            name: id.to_string(),
            locale: locale.to_string(),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<VoiceEvent>) -> Vec<VoiceEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn finished_count(events: &[VoiceEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, VoiceEvent::SpeakingFinished))
            .count()
    }

    #[test]
    fn starts_idle_and_enabled() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine);
        assert!(announcer.is_enabled());
        assert_eq!(announcer.state(), AnnouncerState::Idle);
        assert!(!announcer.is_speaking());
    }

    #[test]
    fn speak_is_noop_when_disabled() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.set_enabled(false);
        announcer.speak("hello", "en");

        assert!(engine.spoken().is_empty());
        assert_eq!(engine.cancel_count(), 0);
    }

    #[test]
    fn speak_ignores_blank_text() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("", "en");
        announcer.speak("   ", "en");

        assert!(engine.spoken().is_empty());
    }

    #[test]
    fn speak_is_noop_without_synthesizer() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        engine.set_available(false);
        announcer.speak("hello", "en");

        assert!(engine.spoken().is_empty());
    }

    #[test]
    fn speak_submits_announcement_parameters() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("hello", "hi");

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "hello");
        assert_eq!(spoken[0].locale, "hi-IN");
        assert!((spoken[0].rate - 0.9).abs() < f32::EPSILON);
        assert!((spoken[0].pitch - 1.0).abs() < f32::EPSILON);
        assert!((spoken[0].volume - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn started_and_finished_signals_walk_the_state_machine() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, mut events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("hello", "en");
        assert!(!announcer.is_speaking());

        announcer.handle_signal(EngineSignal::Started(engine.ids()[0]));
        assert!(announcer.is_speaking());

        announcer.handle_signal(EngineSignal::Finished(engine.ids()[0]));
        assert_eq!(announcer.state(), AnnouncerState::Idle);

        let seen = drain(&mut events);
        assert!(seen.iter().any(|e| matches!(e, VoiceEvent::SpeakingStarted)));
        assert_eq!(finished_count(&seen), 1);
    }

    #[test]
    fn second_speak_preempts_the_first() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("first", "en");
        announcer.handle_signal(EngineSignal::Started(engine.ids()[0]));
        announcer.speak("second", "en");

        // Every speak clears the host queue first.
        assert_eq!(engine.cancel_count(), 2);
        assert_eq!(engine.spoken().len(), 2);
        assert_eq!(engine.spoken()[1].text, "second");

        // The first utterance was preempted; only the second may start.
        assert_eq!(announcer.state(), AnnouncerState::Cancelling);
        announcer.handle_signal(EngineSignal::Started(engine.ids()[1]));
        assert!(announcer.is_speaking());
    }

    #[test]
    fn stale_started_signal_is_dropped() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("first", "en");
        announcer.speak("second", "en");

        announcer.handle_signal(EngineSignal::Started(engine.ids()[0]));
        assert!(!announcer.is_speaking());
    }

    #[test]
    fn cancelled_utterance_finish_is_not_reported_twice() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, mut events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("hello", "en");
        announcer.handle_signal(EngineSignal::Started(engine.ids()[0]));
        announcer.stop();
        assert!(!announcer.is_speaking());

        announcer.handle_signal(EngineSignal::Finished(engine.ids()[0]));
        assert_eq!(announcer.state(), AnnouncerState::Idle);

        // One SpeakingFinished from the stop, none from the late signal.
        assert_eq!(finished_count(&drain(&mut events)), 1);
    }

    #[test]
    fn disabling_while_speaking_flips_the_flag_synchronously() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("hello", "en");
        announcer.handle_signal(EngineSignal::Started(engine.ids()[0]));
        assert!(announcer.is_speaking());

        announcer.set_enabled(false);
        assert!(!announcer.is_speaking());
        assert!(!announcer.is_enabled());
        assert_eq!(engine.cancel_count(), 2);
    }

    #[test]
    fn playback_failure_clears_state_and_surfaces_error() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, mut events) = VoiceAnnouncer::new(engine.clone());

        announcer.speak("hello", "en");
        announcer.handle_signal(EngineSignal::Started(engine.ids()[0]));
        announcer.handle_signal(EngineSignal::Failed {
            id: engine.ids()[0],
            error: "audio device lost".to_string(),
        });

        assert_eq!(announcer.state(), AnnouncerState::Idle);
        let seen = drain(&mut events);
        assert!(
            seen.iter()
                .any(|e| matches!(e, VoiceEvent::Error(msg) if msg.contains("audio device lost")))
        );
    }

    #[test]
    fn submit_failure_stays_idle() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, mut events) = VoiceAnnouncer::new(engine.clone());

        engine.fail_next_speak();
        announcer.speak("hello", "en");

        assert_eq!(announcer.state(), AnnouncerState::Idle);
        assert!(!announcer.is_speaking());
        let seen = drain(&mut events);
        assert!(seen.iter().any(|e| matches!(e, VoiceEvent::Error(_))));
    }

    #[test]
    fn matching_locale_wins_voice_resolution() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        engine.set_voices(vec![voice("us", "en-US"), voice("tamil", "ta-IN")]);
        announcer.handle_signal(EngineSignal::VoicesChanged);

        announcer.speak("vanakkam", "ta");
        assert_eq!(
            engine.spoken()[0].voice.as_ref().map(|v| v.id.as_str()),
            Some("tamil")
        );
    }

    #[test]
    fn unmatched_language_uses_cached_default() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        engine.set_voices(vec![voice("us", "en-US"), voice("hindi", "hi-IN")]);
        announcer.handle_signal(EngineSignal::VoicesChanged);

        // No Kannada voice on the host; the Hindi default applies.
        announcer.speak("namaskara", "kn");
        assert_eq!(
            engine.spoken()[0].voice.as_ref().map(|v| v.id.as_str()),
            Some("hindi")
        );
    }

    #[test]
    fn default_voice_re_resolves_after_voices_changed() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        // Construction saw an empty list, so there is no voice to use.
        announcer.speak("first", "kn");
        assert!(engine.spoken()[0].voice.is_none());

        engine.set_voices(vec![voice("german", "de-DE")]);
        announcer.handle_signal(EngineSignal::VoicesChanged);

        announcer.speak("second", "kn");
        assert_eq!(
            engine.spoken()[1].voice.as_ref().map(|v| v.id.as_str()),
            Some("german")
        );
    }

    #[test]
    fn emergency_announcement_carries_the_language_marker() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.emergency_announcement("Evacuate now", "hi");

        let spoken = engine.spoken();
        assert!(spoken[0].text.starts_with("आपातकाल!"));
        assert!(spoken[0].text.ends_with("Evacuate now"));
        assert_eq!(spoken[0].locale, "hi-IN");
    }

    #[test]
    fn hazard_announcement_falls_back_to_english_template() {
        let (engine, _signals) = MockEngine::new();
        let (announcer, _events) = VoiceAnnouncer::new(engine.clone());

        announcer.announce_hazard(AlertKind::Flood, "Ramnagar", "ta");

        let spoken = engine.spoken();
        assert_eq!(
            spoken[0].text,
            "Flood warning for Ramnagar. Prepare evacuation if necessary."
        );
        assert_eq!(spoken[0].locale, "ta-IN");
    }
}

//! Scriptable engine for exercising the announcer without host audio.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::engine::{EngineSignal, HostVoice, SpeechEngine, Utterance, UtteranceId};
use crate::error::VoiceError;

/// In-memory engine whose signals are driven explicitly by the test.
///
/// `speak` records the utterance and hands back an id; nothing plays until
/// the test calls [`start_current`](MockEngine::start_current),
/// [`finish_current`](MockEngine::finish_current), or
/// [`fail_current`](MockEngine::fail_current).
pub struct MockEngine {
    available: AtomicBool,
    voices: Mutex<Vec<HostVoice>>,
    spoken: Mutex<Vec<Utterance>>,
    issued: Mutex<Vec<UtteranceId>>,
    cancel_calls: AtomicUsize,
    fail_next: AtomicBool,
    next_id: AtomicU64,
    signal_tx: mpsc::UnboundedSender<EngineSignal>,
}

impl MockEngine {
    /// Create an available engine with no voices and its signal channel.
    #[must_use]
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EngineSignal>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        let engine = Arc::new(Self {
            available: AtomicBool::new(true),
            voices: Mutex::new(Vec::new()),
            spoken: Mutex::new(Vec::new()),
            issued: Mutex::new(Vec::new()),
            cancel_calls: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            signal_tx,
        });
        (engine, signal_rx)
    }

    // ── Scripting ──────────────────────────────────────────────────

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Replace the voice set and fire `VoicesChanged`.
    pub fn set_voices(&self, voices: Vec<HostVoice>) {
        *self.voices.lock().unwrap() = voices;
        let _ = self.signal_tx.send(EngineSignal::VoicesChanged);
    }

    /// Make the next `speak` call return a playback error.
    pub fn fail_next_speak(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Signal that the most recently submitted utterance began playing.
    pub fn start_current(&self) {
        if let Some(id) = self.last_issued() {
            let _ = self.signal_tx.send(EngineSignal::Started(id));
        }
    }

    /// Signal that the most recently submitted utterance finished.
    pub fn finish_current(&self) {
        if let Some(id) = self.last_issued() {
            let _ = self.signal_tx.send(EngineSignal::Finished(id));
        }
    }

    /// Signal a mid-playback failure of the most recent utterance.
    pub fn fail_current(&self, error: &str) {
        if let Some(id) = self.last_issued() {
            let _ = self.signal_tx.send(EngineSignal::Failed {
                id,
                error: error.to_string(),
            });
        }
    }

    /// Send a raw signal, e.g. for a stale utterance id from [`ids`](MockEngine::ids).
    pub fn emit(&self, signal: EngineSignal) {
        let _ = self.signal_tx.send(signal);
    }

    // ── Observations ───────────────────────────────────────────────

    /// Every utterance submitted so far, in order.
    #[must_use]
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }

    /// Ids handed out so far, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<UtteranceId> {
        self.issued.lock().unwrap().clone()
    }

    /// Number of `cancel_all` calls observed.
    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }

    fn last_issued(&self) -> Option<UtteranceId> {
        self.issued.lock().unwrap().last().copied()
    }
}

impl SpeechEngine for MockEngine {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn voices(&self) -> Vec<HostVoice> {
        self.voices.lock().unwrap().clone()
    }

    fn speak(&self, utterance: &Utterance) -> Result<UtteranceId, VoiceError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(VoiceError::Playback("scripted failure".to_string()));
        }

        let id = UtteranceId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.spoken.lock().unwrap().push(utterance.clone());
        self.issued.lock().unwrap().push(id);
        Ok(id)
    }

    fn cancel_all(&self) {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
    }
}

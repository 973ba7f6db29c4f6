//! Speech engine backed by speech-dispatcher's `spd-say` CLI.
//!
//! Each utterance runs one `spd-say -w` child; the child's exit is the end
//! signal. Cancellation clears the dispatcher queue with `spd-say -C`,
//! which makes in-flight children exit on their own. Voice enumeration
//! (`spd-say -L`) runs once in the background at construction and fires
//! [`EngineSignal::VoicesChanged`] when the list lands.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::process::Command;
use tokio::sync::mpsc;

use crate::engine::{EngineSignal, HostVoice, SpeechEngine, Utterance, UtteranceId};
use crate::error::VoiceError;

const SPD_BINARY: &str = "spd-say";

/// Engine adapter over the host's speech-dispatcher installation.
pub struct SpdEngine {
    /// Resolved `spd-say` path, `None` when the host has no synthesizer.
    binary: Option<PathBuf>,
    next_id: AtomicU64,
    voices: Mutex<Vec<HostVoice>>,
    signal_tx: mpsc::UnboundedSender<EngineSignal>,
}

impl SpdEngine {
    /// Probe the host and return the engine plus its signal channel.
    ///
    /// Must be called within a tokio runtime; voice enumeration runs as a
    /// background task.
    #[must_use]
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<EngineSignal>) {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let binary = which::which(SPD_BINARY).ok();
        if binary.is_none() {
            tracing::warn!("spd-say not found on PATH, voice announcements disabled");
        }

        let engine = Arc::new(Self {
            binary,
            next_id: AtomicU64::new(1),
            voices: Mutex::new(Vec::new()),
            signal_tx,
        });

        if engine.binary.is_some() {
            let handle = Arc::clone(&engine);
            tokio::spawn(async move { handle.reload_voices().await });
        }

        (engine, signal_rx)
    }

    /// Re-enumerate host voices and signal consumers on success.
    pub async fn reload_voices(&self) {
        let Some(ref binary) = self.binary else {
            return;
        };

        match fetch_voice_list(binary).await {
            Ok(voices) => {
                tracing::debug!(count = voices.len(), "Host voices enumerated");
                *self.voices.lock().unwrap() = voices;
                let _ = self.signal_tx.send(EngineSignal::VoicesChanged);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to enumerate host voices"),
        }
    }
}

impl SpeechEngine for SpdEngine {
    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn voices(&self) -> Vec<HostVoice> {
        self.voices.lock().unwrap().clone()
    }

    fn speak(&self, utterance: &Utterance) -> Result<UtteranceId, VoiceError> {
        let Some(ref binary) = self.binary else {
            return Err(VoiceError::Unavailable);
        };

        let id = UtteranceId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        let mut cmd = Command::new(binary);
        cmd.arg("-w")
            .arg("-r")
            .arg(signed_scale(utterance.rate).to_string())
            .arg("-p")
            .arg(signed_scale(utterance.pitch).to_string())
            .arg("-i")
            .arg(volume_scale(utterance.volume).to_string())
            .arg("-l")
            .arg(&utterance.locale);

        if let Some(ref voice) = utterance.voice {
            cmd.arg("-y").arg(&voice.id);
        }

        cmd.arg("--").arg(&utterance.text);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let mut child = cmd.spawn().map_err(|e| VoiceError::Playback(e.to_string()))?;
        tracing::debug!(%id, chars = utterance.text.len(), locale = %utterance.locale, "Utterance submitted");

        let signal_tx = self.signal_tx.clone();
        tokio::spawn(async move {
            let _ = signal_tx.send(EngineSignal::Started(id));
            match child.wait().await {
                Ok(status) if status.success() => {
                    let _ = signal_tx.send(EngineSignal::Finished(id));
                }
                Ok(status) => {
                    let _ = signal_tx.send(EngineSignal::Failed {
                        id,
                        error: format!("synthesizer exited with {status}"),
                    });
                }
                Err(e) => {
                    let _ = signal_tx.send(EngineSignal::Failed {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        });

        Ok(id)
    }

    fn cancel_all(&self) {
        let Some(ref binary) = self.binary else {
            return;
        };

        // Synchronous on purpose: the dispatcher queue must be clear before
        // the caller submits the next utterance. spd-say -C only writes one
        // command to the local dispatcher socket.
        match std::process::Command::new(binary).arg("-C").status() {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!(%status, "Cancel request exited abnormally"),
            Err(e) => tracing::warn!(error = %e, "Failed to issue cancel request"),
        }
    }
}

// ── spd-say plumbing ───────────────────────────────────────────────

async fn fetch_voice_list(binary: &Path) -> Result<Vec<HostVoice>, VoiceError> {
    let output = Command::new(binary)
        .arg("-L")
        .output()
        .await
        .map_err(|e| VoiceError::VoiceListing {
            source: anyhow::Error::new(e),
        })?;

    if !output.status.success() {
        return Err(VoiceError::VoiceListing {
            source: anyhow::anyhow!("voice listing exited with {}", output.status),
        });
    }

    Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `spd-say -L` output.
///
/// The listing is a header line followed by one voice per line:
/// whitespace-separated name (may itself contain spaces), language code,
/// and dialect variant (`none` when absent).
fn parse_voice_list(listing: &str) -> Vec<HostVoice> {
    listing
        .lines()
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 3 || tokens == ["NAME", "LANGUAGE", "VARIANT"] {
                return None;
            }

            let variant = tokens[tokens.len() - 1];
            let language = tokens[tokens.len() - 2];
            let name = tokens[..tokens.len() - 2].join(" ");

            Some(HostVoice {
                id: name.clone(),
                name,
                locale: normalize_locale(language, variant),
            })
        })
        .collect()
}

/// Canonicalize a language/variant pair into a BCP 47 style tag.
fn normalize_locale(language: &str, variant: &str) -> String {
    let raw = if variant.is_empty() || variant.eq_ignore_ascii_case("none") {
        language.to_string()
    } else {
        format!("{language}-{variant}")
    };

    raw.split('-')
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                segment.to_ascii_lowercase()
            } else {
                segment.to_ascii_uppercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Map a 1.0-centered multiplier onto spd-say's -100..=100 scale.
#[allow(clippy::cast_possible_truncation)]
fn signed_scale(multiplier: f32) -> i32 {
    (((multiplier - 1.0) * 100.0).round() as i32).clamp(-100, 100)
}

/// Map a 0.0..=1.0 volume onto spd-say's -100..=100 scale.
#[allow(clippy::cast_possible_truncation)]
fn volume_scale(volume: f32) -> i32 {
    ((volume * 200.0 - 100.0).round() as i32).clamp(-100, 100)
}

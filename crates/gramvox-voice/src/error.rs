//! Voice subsystem error types.

/// Errors that can occur while driving the host synthesizer.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// No speech synthesizer is available on this host.
    #[error("No speech synthesizer available on this host")]
    Unavailable,

    /// Failed to start or complete playback of an utterance.
    #[error("Speech playback failed: {0}")]
    Playback(String),

    /// Failed to enumerate the host's voices.
    #[error("Failed to list host voices: {source}")]
    VoiceListing { source: anyhow::Error },

    /// IO error while talking to the synthesizer process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

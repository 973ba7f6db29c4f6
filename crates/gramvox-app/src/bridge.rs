//! Bridge from announcer events to the monitor bus.

use std::sync::Arc;

use gramvox_core::{MonitorEvent, MonitorEventEmitter};
use gramvox_voice::VoiceEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Spawn the pump that republishes [`VoiceEvent`]s as [`MonitorEvent`]s.
///
/// Voice status rides the same bus as alert changes, so consumers need a
/// single subscription. The task ends on its own when the announcer, the
/// only sender, is dropped.
pub fn spawn_voice_bridge(
    mut events: mpsc::UnboundedReceiver<VoiceEvent>,
    emitter: Arc<dyn MonitorEventEmitter>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let forwarded = match event {
                VoiceEvent::StateChanged(state) => MonitorEvent::VoiceStateChanged {
                    state: state.label().to_string(),
                },
                VoiceEvent::SpeakingStarted => MonitorEvent::SpeakingStarted,
                VoiceEvent::SpeakingFinished => MonitorEvent::SpeakingFinished,
                VoiceEvent::Error(error) => MonitorEvent::SpeechFailed { error },
            };
            emitter.emit(forwarded);
        }
        debug!("Voice event channel closed, stopping bridge");
    })
}

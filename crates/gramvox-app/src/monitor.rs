//! The monitor facade.
//!
//! [`VillageMonitor`] is the composition root for the subsystem: it owns
//! the backend client, the shared alert store, the polling loop, the voice
//! announcer, and the active display language, and exposes the operations
//! presentation adapters call. Everything it emits travels over one
//! [`MonitorBus`], so a consumer needs a single subscription to follow
//! alert changes, poll failures, voice status, and language switches.
//!
//! Construction wires the pieces together and spawns the voice plumbing;
//! backend polling begins only on [`start`](VillageMonitor::start).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use gramvox_client::{ApiClient, ApiConfig, DefaultApiClient, HttpBackend, ReqwestBackend};
use gramvox_core::{
    AlertKind, AlertPoller, AlertRecord, AlertSource, AlertStore, DashboardStats, MonitorEvent,
    MonitorEventEmitter, PollerConfig, SUPPORTED_LANGUAGES, Settings, SettingsError, Severity,
    SimulationOutcome, SimulationRequest, Village, load_language, persist_language,
};
use gramvox_voice::{AnnouncerState, EngineSignal, SpdEngine, SpeechEngine, VoiceAnnouncer};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::bridge::spawn_voice_bridge;
use crate::bus::MonitorBus;
use crate::error::MonitorResult;

// ── Derived views ──────────────────────────────────────────────────

/// Alert-derived classification for a village's map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VillageStatus {
    /// No live alert references the village.
    Normal,

    /// At least one live alert, none of them critical.
    Warning,

    /// At least one critical live alert.
    Critical,
}

/// Aggregate payload for the dashboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    /// Backend-computed counts for the header cards.
    pub stats: DashboardStats,

    /// Current village roster, with telemetry.
    pub villages: Vec<Village>,
}

// ── Facade ─────────────────────────────────────────────────────────

/// Facade over the alert and voice notification subsystem.
///
/// One instance serves the whole process. All methods take `&self`;
/// internal state sits behind its own locks, none of which are held
/// across await points.
pub struct VillageMonitor<B: HttpBackend> {
    client: Arc<ApiClient<B>>,
    store: Arc<AlertStore>,
    announcer: Arc<VoiceAnnouncer>,
    bus: MonitorBus,
    poller: Mutex<Option<AlertPoller>>,
    /// Roster from the last successful village fetch.
    villages: RwLock<Vec<Village>>,
    language: RwLock<String>,
    poll_interval: Duration,
}

impl<B: HttpBackend + 'static> VillageMonitor<B> {
    /// Wire the subsystem together from its parts.
    ///
    /// Spawns the engine signal pump and the voice bridge, so a Tokio
    /// runtime must be current. Polling starts on [`start`](Self::start),
    /// not here.
    pub fn new(
        client: ApiClient<B>,
        engine: Arc<dyn SpeechEngine>,
        engine_signals: mpsc::UnboundedReceiver<EngineSignal>,
        settings: &Settings,
    ) -> Self {
        let bus = MonitorBus::with_defaults();
        let store = Arc::new(AlertStore::new(Arc::new(bus.clone())));

        let (announcer, voice_events) = VoiceAnnouncer::new(engine);
        announcer.set_enabled(settings.effective_voice_enabled());

        // Both pumps end on their own when their channels close.
        let _pump = announcer.spawn_signal_pump(engine_signals);
        let _bridge = spawn_voice_bridge(voice_events, Arc::new(bus.clone()));

        Self {
            client: Arc::new(client),
            store,
            announcer,
            bus,
            poller: Mutex::new(None),
            villages: RwLock::new(Vec::new()),
            language: RwLock::new(settings.effective_language().to_string()),
            poll_interval: settings.effective_poll_interval(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Shared live alert store.
    pub const fn store(&self) -> &Arc<AlertStore> {
        &self.store
    }

    /// Voice announcement controller.
    pub const fn announcer(&self) -> &Arc<VoiceAnnouncer> {
        &self.announcer
    }

    /// Typed backend client.
    pub const fn client(&self) -> &Arc<ApiClient<B>> {
        &self.client
    }

    /// Subscribe to every event emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.bus.subscribe()
    }

    /// Whether the polling loop is running.
    pub fn is_polling(&self) -> bool {
        self.poller.lock().unwrap().is_some()
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    /// Begin polling the backend and load the initial village roster.
    ///
    /// Idempotent; a second call while polling is a no-op. The roster
    /// fetch is best-effort, a failure leaves the cache empty until the
    /// next refresh.
    pub async fn start(&self) {
        {
            let mut poller = self.poller.lock().unwrap();
            if poller.is_some() {
                debug!("Monitor already polling");
                return;
            }

            let source: Arc<dyn AlertSource> = self.client.clone();
            *poller = Some(AlertPoller::spawn(
                source,
                Arc::clone(&self.store),
                Arc::new(self.bus.clone()),
                PollerConfig {
                    interval: self.poll_interval,
                },
            ));
            info!(
                interval_secs = self.poll_interval.as_secs(),
                "Monitor polling started"
            );
        }

        if let Err(e) = self.refresh_villages().await {
            warn!(error = %e, "Initial village fetch failed");
        }
    }

    /// Stop polling and silence any active announcement.
    ///
    /// Waits for the poll loop to wind down; an in-flight fetch is
    /// discarded. Idempotent.
    pub async fn shutdown(&self) {
        let poller = self.poller.lock().unwrap().take();
        if let Some(poller) = poller {
            poller.stop().await;
        }
        self.announcer.stop();
        info!("Monitor stopped");
    }

    // ── Alerts ─────────────────────────────────────────────────────

    /// Fetch the live alert set from the backend and replace the store.
    ///
    /// This is the manual counterpart of a poll cycle, for pull-to-refresh
    /// style interactions.
    pub async fn refresh_alerts(&self) -> MonitorResult<Vec<AlertRecord>> {
        let records = self.client.list_alerts().await?;
        self.store.replace(records.clone());
        Ok(records)
    }

    /// Dismiss an alert on the backend, then drop it locally.
    ///
    /// The remote dismissal is authoritative: if the PATCH fails the local
    /// record stays and the error surfaces. A record the store no longer
    /// holds after a successful PATCH is not an error.
    pub async fn dismiss_alert(&self, alert_id: &str) -> MonitorResult<()> {
        self.client.dismiss_alert(alert_id).await?;

        if let Err(e) = self.store.dismiss(alert_id) {
            debug!(alert_id = %alert_id, error = %e, "Dismissed alert was not held locally");
        }
        Ok(())
    }

    // ── Voice ──────────────────────────────────────────────────────

    /// Speak an alert's message in the active display language.
    pub fn speak_alert(&self, alert: &AlertRecord) {
        self.announcer.speak(&alert.message, &self.language());
    }

    /// Announce a hazard for a village using the phrase templates.
    pub fn announce_hazard(&self, kind: AlertKind, village_name: &str) {
        self.announcer
            .announce_hazard(kind, village_name, &self.language());
    }

    /// Speak a message prefixed with the language's urgency marker.
    pub fn announce_emergency(&self, message: &str) {
        self.announcer
            .emergency_announcement(message, &self.language());
    }

    /// Cancel any active announcement.
    pub fn stop_speaking(&self) {
        self.announcer.stop();
    }

    /// Enable or disable voice announcements.
    pub fn set_voice_enabled(&self, enabled: bool) {
        self.announcer.set_enabled(enabled);
    }

    /// Whether voice announcements are enabled.
    pub fn is_voice_enabled(&self) -> bool {
        self.announcer.is_enabled()
    }

    /// Current speech lifecycle state.
    pub fn voice_state(&self) -> AnnouncerState {
        self.announcer.state()
    }

    // ── Simulation ─────────────────────────────────────────────────

    /// Trigger a hazard simulation on the backend.
    ///
    /// The returned alert is echoed into the store immediately (the next
    /// poll reconciles) and its message is spoken in the active language.
    /// The village roster is refreshed afterwards, best-effort, since the
    /// backend embeds alert text on the village records.
    pub async fn trigger_scenario(
        &self,
        scenario: AlertKind,
        village_id: &str,
        severity: Severity,
    ) -> MonitorResult<SimulationOutcome> {
        let request = SimulationRequest {
            scenario,
            village_id: village_id.to_string(),
            severity,
        };
        let outcome = self.client.trigger_simulation(&request).await?;
        info!(scenario = %scenario, village_id = %village_id, "Simulation triggered");

        self.store.add(outcome.alert.clone());
        self.announcer
            .speak(&outcome.alert.message, &self.language());

        if let Err(e) = self.refresh_villages().await {
            warn!(error = %e, "Village refresh after simulation failed");
        }

        Ok(outcome)
    }

    // ── Villages ───────────────────────────────────────────────────

    /// Fetch the village roster and update the cached copy.
    pub async fn refresh_villages(&self) -> MonitorResult<Vec<Village>> {
        let villages = self.client.list_villages().await?;
        *self.villages.write().unwrap() = villages.clone();
        Ok(villages)
    }

    /// Cached village roster from the last successful fetch.
    pub fn villages(&self) -> Vec<Village> {
        self.villages.read().unwrap().clone()
    }

    /// Fetch one village's full record, including sensor history.
    pub async fn village(&self, village_id: &str) -> MonitorResult<Village> {
        Ok(self.client.get_village(village_id).await?)
    }

    /// Classification for one village based on the live alert set.
    ///
    /// The store is the single source of truth here; the alert strings the
    /// backend embeds on village records are ignored.
    pub fn status_for(&self, village_id: &str) -> VillageStatus {
        let alerts = self.store.by_village(village_id);
        if alerts
            .iter()
            .any(|alert| alert.severity == Severity::Critical)
        {
            VillageStatus::Critical
        } else if alerts.is_empty() {
            VillageStatus::Normal
        } else {
            VillageStatus::Warning
        }
    }

    /// Status of every cached village, keyed by village id.
    ///
    /// Villages the backend has not returned yet are absent; call
    /// [`refresh_villages`](Self::refresh_villages) first.
    #[must_use]
    pub fn village_statuses(&self) -> HashMap<String, VillageStatus> {
        let villages = self.villages.read().unwrap();
        villages
            .iter()
            .map(|village| (village.id.clone(), self.status_for(&village.id)))
            .collect()
    }

    // ── Dashboard ──────────────────────────────────────────────────

    /// Fetch the dashboard aggregates and a fresh village roster.
    pub async fn dashboard(&self) -> MonitorResult<DashboardView> {
        let stats = self.client.dashboard_stats().await?;
        let villages = self.refresh_villages().await?;
        Ok(DashboardView { stats, villages })
    }

    // ── Language ───────────────────────────────────────────────────

    /// Active display language code.
    pub fn language(&self) -> String {
        self.language.read().unwrap().clone()
    }

    /// Switch the display language.
    ///
    /// The code must be one of [`SUPPORTED_LANGUAGES`]. The choice is
    /// persisted best-effort; a failed write keeps the in-memory switch.
    pub fn set_language(&self, code: &str) -> MonitorResult<()> {
        if !SUPPORTED_LANGUAGES.contains(&code) {
            return Err(SettingsError::UnsupportedLanguage(code.to_string()).into());
        }

        *self.language.write().unwrap() = code.to_string();

        if let Err(e) = persist_language(code) {
            warn!(error = %e, "Failed to persist language preference");
        }

        info!(language = %code, "Display language changed");
        self.bus.emit(MonitorEvent::language_changed(code));
        Ok(())
    }
}

// ── Production composition ─────────────────────────────────────────

/// Monitor over the production reqwest transport.
pub type DefaultVillageMonitor = VillageMonitor<ReqwestBackend>;

impl DefaultVillageMonitor {
    /// Production composition: reqwest transport against the configured
    /// backend and the host `spd-say` synthesizer.
    ///
    /// A persisted language preference, when present, overrides the one in
    /// `settings`.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut settings = settings.clone();
        match load_language() {
            Ok(Some(code)) => settings.language = Some(code),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read language preference"),
        }

        let client = DefaultApiClient::new(&ApiConfig {
            base_url: settings.effective_backend_url().to_string(),
        });
        let (engine, signals) = SpdEngine::new();
        Self::new(client, engine, signals, &settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use chrono::Utc;
    use gramvox_client::testing::{FakeBackend, fake_client};
    use gramvox_voice::engine::testing::MockEngine;
    use serde_json::json;
    use std::env;

    fn test_settings() -> Settings {
        Settings {
            poll_interval_secs: Some(5),
            ..Settings::default()
        }
    }

    fn monitor_with(backend: FakeBackend) -> (VillageMonitor<FakeBackend>, Arc<MockEngine>) {
        let (engine, signals) = MockEngine::new();
        let monitor = VillageMonitor::new(
            fake_client(backend),
            engine.clone(),
            signals,
            &test_settings(),
        );
        (monitor, engine)
    }

    fn alert(id: &str, village_id: &str, severity: Severity) -> AlertRecord {
        AlertRecord {
            id: id.to_string(),
            village_id: village_id.to_string(),
            kind: AlertKind::Drought,
            message: format!("alert {id}"),
            severity,
            timestamp: Utc::now(),
        }
    }

    fn alert_json(id: &str, village_id: &str, severity: &str) -> serde_json::Value {
        json!({
            "id": id,
            "village_id": village_id,
            "alert_type": "drought",
            "message": format!("DROUGHT ALERT: {id}"),
            "severity": severity,
            "timestamp": "2024-01-05T10:00:00+00:00",
            "is_active": true
        })
    }

    fn village_json(id: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "district": "Mandya",
            "state": "Karnataka",
            "crop": "paddy",
            "coords": [12.522, 76.899],
            "population": 1500,
            "area_hectares": 250.0,
            "soil_type": "clayey",
            "irrigation_type": "canal",
            "last_updated": "2024-01-05T10:00:00+00:00"
        })
    }

    // ── Alert flows ────────────────────────────────────────────────

    #[tokio::test]
    async fn refresh_alerts_replaces_the_store() {
        let backend = FakeBackend::new().with_json(
            "/api/alerts",
            json!([
                alert_json("a-1", "v-1", "high"),
                alert_json("a-2", "v-2", "low")
            ]),
        );
        let (monitor, _engine) = monitor_with(backend);
        monitor.store().add(alert("stale", "v-9", Severity::Low));

        let fresh = monitor.refresh_alerts().await.unwrap();

        assert_eq!(fresh.len(), 2);
        assert_eq!(monitor.store().count(), 2);
        assert!(monitor.store().alerts().iter().all(|a| a.id != "stale"));
    }

    #[tokio::test]
    async fn dismiss_clears_remote_then_local() {
        let backend = FakeBackend::new().with_json("/dismiss", json!({"message": "dismissed"}));
        let observer = backend.clone();
        let (monitor, _engine) = monitor_with(backend);
        monitor
            .store()
            .replace(vec![alert("a-1", "v-1", Severity::High)]);

        monitor.dismiss_alert("a-1").await.unwrap();

        assert!(monitor.store().is_empty());
        let requests = observer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "PATCH");
        assert!(requests[0].url.contains("/api/alerts/a-1/dismiss"));
    }

    #[tokio::test]
    async fn failed_remote_dismiss_keeps_the_alert() {
        let backend = FakeBackend::new().with_status("/dismiss", 500);
        let (monitor, _engine) = monitor_with(backend);
        monitor
            .store()
            .replace(vec![alert("a-1", "v-1", Severity::High)]);

        let err = monitor.dismiss_alert("a-1").await.unwrap_err();

        assert!(matches!(err, MonitorError::Api(_)));
        assert_eq!(monitor.store().count(), 1);
    }

    #[tokio::test]
    async fn dismiss_succeeds_even_if_not_held_locally() {
        let backend = FakeBackend::new().with_json("/dismiss", json!({"message": "dismissed"}));
        let (monitor, _engine) = monitor_with(backend);

        monitor.dismiss_alert("a-9").await.unwrap();

        assert!(monitor.store().is_empty());
    }

    // ── Voice flows ────────────────────────────────────────────────

    #[tokio::test]
    async fn speak_alert_uses_the_active_language() {
        let (monitor, engine) = monitor_with(FakeBackend::new());
        let record = alert("a-1", "v-1", Severity::Critical);

        monitor.speak_alert(&record);

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, record.message);
        assert_eq!(spoken[0].locale, "en-US");
    }

    #[tokio::test]
    async fn hazard_announcements_use_the_template() {
        let (monitor, engine) = monitor_with(FakeBackend::new());

        monitor.announce_hazard(AlertKind::Flood, "Kirangur");

        let spoken = engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert!(spoken[0].text.contains("Kirangur"));
    }

    #[tokio::test]
    async fn muting_suppresses_announcements() {
        let (monitor, engine) = monitor_with(FakeBackend::new());

        monitor.set_voice_enabled(false);
        monitor.speak_alert(&alert("a-1", "v-1", Severity::High));

        assert!(!monitor.is_voice_enabled());
        assert!(engine.spoken().is_empty());
    }

    #[tokio::test]
    async fn construction_honors_voice_enablement() {
        let settings = Settings {
            voice_enabled: Some(false),
            ..Settings::default()
        };
        let (engine, signals) = MockEngine::new();
        let monitor = VillageMonitor::new(
            fake_client(FakeBackend::new()),
            engine,
            signals,
            &settings,
        );

        assert!(!monitor.is_voice_enabled());
        assert_eq!(monitor.voice_state(), AnnouncerState::Idle);
    }

    // ── Simulation ─────────────────────────────────────────────────

    #[tokio::test]
    async fn trigger_scenario_echoes_speaks_and_refreshes() {
        let backend = FakeBackend::new()
            .with_json(
                "/api/simulate/trigger",
                json!({
                    "message": "Simulation 'drought' triggered for village v-1",
                    "alert": alert_json("sim-1", "v-1", "critical"),
                    "timestamp": "2024-01-05T10:00:01+00:00"
                }),
            )
            .with_json("/api/villages", json!([village_json("v-1", "Kirangur")]));
        let observer = backend.clone();
        let (monitor, engine) = monitor_with(backend);

        let outcome = monitor
            .trigger_scenario(AlertKind::Drought, "v-1", Severity::Critical)
            .await
            .unwrap();

        assert_eq!(outcome.alert.id, "sim-1");
        assert_eq!(monitor.store().alerts()[0].id, "sim-1");
        assert_eq!(engine.spoken()[0].text, outcome.alert.message);
        assert_eq!(monitor.villages().len(), 1);

        let posts: Vec<_> = observer
            .requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect();
        assert_eq!(posts.len(), 1);
        let body = posts[0].body.as_ref().unwrap();
        assert_eq!(body["scenario"], "drought");
        assert_eq!(body["village_id"], "v-1");
        assert_eq!(body["severity"], "critical");
    }

    // ── Villages and dashboard ─────────────────────────────────────

    #[tokio::test]
    async fn status_for_is_severity_keyed() {
        let (monitor, _engine) = monitor_with(FakeBackend::new());
        monitor.store().replace(vec![
            alert("a-1", "v-critical", Severity::Critical),
            alert("a-2", "v-critical", Severity::Low),
            alert("a-3", "v-warning", Severity::High),
        ]);

        assert_eq!(monitor.status_for("v-critical"), VillageStatus::Critical);
        assert_eq!(monitor.status_for("v-warning"), VillageStatus::Warning);
        assert_eq!(monitor.status_for("v-quiet"), VillageStatus::Normal);
    }

    #[tokio::test]
    async fn village_statuses_cover_the_cached_roster() {
        let backend = FakeBackend::new().with_json(
            "/api/villages",
            json!([
                village_json("v-1", "Kirangur"),
                village_json("v-2", "Manjari")
            ]),
        );
        let (monitor, _engine) = monitor_with(backend);

        monitor.refresh_villages().await.unwrap();
        monitor
            .store()
            .replace(vec![alert("a-1", "v-1", Severity::Critical)]);

        let statuses = monitor.village_statuses();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses["v-1"], VillageStatus::Critical);
        assert_eq!(statuses["v-2"], VillageStatus::Normal);
    }

    #[tokio::test]
    async fn village_detail_fetches_live() {
        let backend =
            FakeBackend::new().with_json("/api/villages/v-1", village_json("v-1", "Kirangur"));
        let (monitor, _engine) = monitor_with(backend);

        let village = monitor.village("v-1").await.unwrap();

        assert_eq!(village.name, "Kirangur");
        assert!(monitor.villages().is_empty());
    }

    #[tokio::test]
    async fn dashboard_combines_stats_and_villages() {
        let backend = FakeBackend::new()
            .with_json(
                "/api/dashboard/stats",
                json!({
                    "total_villages": 4,
                    "active_alerts": 3,
                    "critical_alerts": 1,
                    "critical_villages": 1,
                    "last_updated": "2024-01-05T10:00:00+00:00"
                }),
            )
            .with_json("/api/villages", json!([village_json("v-1", "Kirangur")]));
        let (monitor, _engine) = monitor_with(backend);

        let view = monitor.dashboard().await.unwrap();

        assert_eq!(view.stats.total_villages, 4);
        assert_eq!(view.villages.len(), 1);
        assert_eq!(monitor.villages().len(), 1);
    }

    // ── Lifecycle ──────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn start_and_shutdown_toggle_polling() {
        let backend = FakeBackend::new()
            .with_json("/api/alerts", json!([]))
            .with_json("/api/villages", json!([]));
        let (monitor, _engine) = monitor_with(backend);
        assert!(!monitor.is_polling());

        monitor.start().await;
        assert!(monitor.is_polling());
        monitor.start().await;
        assert!(monitor.is_polling());

        monitor.shutdown().await;
        assert!(!monitor.is_polling());

        monitor.shutdown().await;
        assert!(!monitor.is_polling());
    }

    // ── Language ───────────────────────────────────────────────────

    #[tokio::test]
    async fn set_language_rejects_unknown_codes() {
        let (monitor, _engine) = monitor_with(FakeBackend::new());

        let err = monitor.set_language("fr").unwrap_err();

        assert!(matches!(
            err,
            MonitorError::Settings(SettingsError::UnsupportedLanguage(_))
        ));
        assert_eq!(monitor.language(), "en");
    }

    /// Serializes tests that touch `GRAMVOX_DATA_DIR`.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that restores an environment variable on drop.
    struct EnvVarGuard {
        key: String,
        previous: Option<String>,
    }

    impl EnvVarGuard {
        #[allow(unsafe_code)]
        fn set(key: &str, value: &str) -> Self {
            let previous = env::var(key).ok();
            unsafe {
                env::set_var(key, value);
            }
            Self {
                key: key.to_string(),
                previous,
            }
        }
    }

    impl Drop for EnvVarGuard {
        #[allow(unsafe_code)]
        fn drop(&mut self) {
            if let Some(ref value) = self.previous {
                unsafe {
                    env::set_var(&self.key, value);
                }
            } else {
                unsafe {
                    env::remove_var(&self.key);
                }
            }
        }
    }

    #[tokio::test]
    async fn set_language_switches_persists_and_notifies() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let _env = EnvVarGuard::set("GRAMVOX_DATA_DIR", temp.path().to_string_lossy().as_ref());

        let (monitor, engine) = monitor_with(FakeBackend::new());
        let mut rx = monitor.subscribe();

        monitor.set_language("hi").unwrap();

        assert_eq!(monitor.language(), "hi");
        let event = rx.recv().await.unwrap();
        assert!(
            matches!(event, MonitorEvent::LanguageChanged { ref language } if language == "hi")
        );
        assert_eq!(load_language().unwrap().as_deref(), Some("hi"));

        monitor.speak_alert(&alert("a-1", "v-1", Severity::High));
        assert_eq!(engine.spoken()[0].locale, "hi-IN");
    }
}

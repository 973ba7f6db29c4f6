//! Typed client for the backend REST API.
//!
//! Thin methods over [`HttpBackend`]: each endpoint builds its URL against
//! the configured base and deserializes straight into the `gramvox-core`
//! domain types.

use gramvox_core::{
    AlertRecord, DEFAULT_BACKEND_URL, DashboardStats, SimulationOutcome, SimulationRequest,
    Village,
};
use url::Url;

use crate::error::ApiResult;
use crate::http::{HttpBackend, ReqwestBackend};

/// Production client over the reqwest backend.
pub type DefaultApiClient = ApiClient<ReqwestBackend>;

/// Backend connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server root, e.g. `http://localhost:8000`.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

/// Client for the village-monitoring backend.
///
/// Generic over the HTTP transport; tests pair it with the canned-response
/// fake from the `testing` module, production code uses
/// [`DefaultApiClient`].
pub struct ApiClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
}

impl DefaultApiClient {
    /// Client over the production HTTP backend.
    ///
    /// An unparseable base URL falls back to [`DEFAULT_BACKEND_URL`].
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let base_url = Url::parse(&config.base_url).unwrap_or_else(|_| {
            tracing::warn!(url = %config.base_url, "Invalid base URL, using the default");
            Url::parse(DEFAULT_BACKEND_URL).expect("default URL is valid")
        });
        Self::with_backend(base_url, ReqwestBackend::new())
    }
}

impl<B: HttpBackend> ApiClient<B> {
    /// Client over a custom transport.
    pub const fn with_backend(base_url: Url, backend: B) -> Self {
        Self { backend, base_url }
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// All live alerts, newest first.
    pub async fn list_alerts(&self) -> ApiResult<Vec<AlertRecord>> {
        self.backend.get_json(&self.url("/api/alerts")?).await
    }

    /// Live alerts for one village.
    pub async fn village_alerts(&self, village_id: &str) -> ApiResult<Vec<AlertRecord>> {
        let url = self.url(&format!("/api/alerts/{village_id}"))?;
        self.backend.get_json(&url).await
    }

    /// Acknowledge an alert server-side. The response body is ignored.
    pub async fn dismiss_alert(&self, alert_id: &str) -> ApiResult<()> {
        let url = self.url(&format!("/api/alerts/{alert_id}/dismiss"))?;
        self.backend.patch_json(&url).await
    }

    /// All monitored villages with telemetry history.
    pub async fn list_villages(&self) -> ApiResult<Vec<Village>> {
        self.backend.get_json(&self.url("/api/villages")?).await
    }

    /// One village by id.
    pub async fn get_village(&self, village_id: &str) -> ApiResult<Village> {
        let url = self.url(&format!("/api/villages/{village_id}"))?;
        self.backend.get_json(&url).await
    }

    /// Trigger a hazard simulation. The outcome carries the created alert.
    pub async fn trigger_simulation(
        &self,
        request: &SimulationRequest,
    ) -> ApiResult<SimulationOutcome> {
        let url = self.url("/api/simulate/trigger")?;
        self.backend.post_json(&url, request).await
    }

    /// Aggregate counters for the dashboard header.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let url = self.url("/api/dashboard/stats")?;
        self.backend.get_json(&url).await
    }
}

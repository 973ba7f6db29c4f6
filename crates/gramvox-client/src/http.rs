//! HTTP transport for the backend API.
//!
//! A trait seam so the typed client can run over either a real reqwest
//! client or a canned-response fake in tests. Only the three verbs the
//! backend uses are modeled.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ApiError, ApiResult};

// ── Backend trait ──────────────────────────────────────────────────

/// JSON transport the API client runs over.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET `url` and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T>;

    /// PATCH `url` with an empty body. The response body is ignored.
    async fn patch_json(&self, url: &Url) -> ApiResult<()>;

    /// POST `body` as JSON to `url` and deserialize the JSON response.
    async fn post_json<Req, T>(&self, url: &Url, body: &Req) -> ApiResult<T>
    where
        Req: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ── Reqwest backend ────────────────────────────────────────────────

/// Production HTTP backend.
///
/// One pooled reqwest client with a 30 second request timeout. Errors are
/// mapped per status: 404 becomes [`ApiError::NotFound`], any other
/// non-success becomes [`ApiError::Status`].
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create the backend with its own connection pool.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a non-success status to the client error space.
fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    if status.as_u16() == 404 {
        return Err(ApiError::NotFound { url });
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        url,
    })
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T> {
        tracing::debug!(method = "GET", %url, "Backend request");
        let response = self.client.get(url.as_str()).send().await?;
        let data = check_status(response)?.json().await?;
        Ok(data)
    }

    async fn patch_json(&self, url: &Url) -> ApiResult<()> {
        tracing::debug!(method = "PATCH", %url, "Backend request");
        let response = self.client.patch(url.as_str()).send().await?;
        check_status(response)?;
        Ok(())
    }

    async fn post_json<Req, T>(&self, url: &Url, body: &Req) -> ApiResult<T>
    where
        Req: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        tracing::debug!(method = "POST", %url, "Backend request");
        let response = self.client.post(url.as_str()).json(body).send().await?;
        let data = check_status(response)?.json().await?;
        Ok(data)
    }
}

// ── Fake backend for tests ─────────────────────────────────────────

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    //! Canned-response transport for tests.

    use std::sync::{Arc, Mutex};

    use super::{ApiError, ApiResult, DeserializeOwned, HttpBackend, Serialize, Url, async_trait};
    use crate::client::ApiClient;

    /// Client wired to a [`FakeBackend`], for driving higher layers in tests.
    #[must_use]
    pub fn fake_client(backend: FakeBackend) -> ApiClient<FakeBackend> {
        let base_url = Url::parse("http://backend.test").expect("static URL is valid");
        ApiClient::with_backend(base_url, backend)
    }

    /// One request the fake served, in arrival order.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        /// HTTP verb, uppercase.
        pub method: &'static str,
        /// Full request URL.
        pub url: String,
        /// JSON body, for POST requests.
        pub body: Option<serde_json::Value>,
    }

    #[derive(Clone)]
    enum Canned {
        Json(serde_json::Value),
        Status(u16),
    }

    /// HTTP backend that serves scripted responses and records requests.
    ///
    /// Responses are keyed by substring match on the URL, first added
    /// pattern wins. Unmatched URLs answer 404. Clones share state, so a
    /// test can keep a handle after moving the backend into a client.
    #[derive(Clone)]
    pub struct FakeBackend {
        responses: Arc<Mutex<Vec<(String, Canned)>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self {
                responses: Arc::new(Mutex::new(Vec::new())),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Serve `json` for any URL containing `url_contains`.
        #[must_use]
        pub fn with_json(self, url_contains: &str, json: serde_json::Value) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push((url_contains.to_string(), Canned::Json(json)));
            self
        }

        /// Fail with `status` for any URL containing `url_contains`.
        #[must_use]
        pub fn with_status(self, url_contains: &str, status: u16) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push((url_contains.to_string(), Canned::Status(status)));
            self
        }

        /// Replace (or add) the canned body for `url_contains`.
        pub fn set_json(&self, url_contains: &str, json: serde_json::Value) {
            let mut responses = self.responses.lock().unwrap();
            if let Some(entry) = responses.iter_mut().find(|(p, _)| p == url_contains) {
                entry.1 = Canned::Json(json);
            } else {
                responses.push((url_contains.to_string(), Canned::Json(json)));
            }
        }

        /// Requests served so far, in order.
        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn respond(
            &self,
            method: &'static str,
            url: &Url,
            body: Option<serde_json::Value>,
        ) -> ApiResult<serde_json::Value> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                body,
            });

            let canned = self
                .responses
                .lock()
                .unwrap()
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern))
                .map(|(_, canned)| canned.clone());

            match canned {
                Some(Canned::Json(json)) => Ok(json),
                Some(Canned::Status(404)) | None => Err(ApiError::NotFound {
                    url: url.to_string(),
                }),
                Some(Canned::Status(status)) => Err(ApiError::Status {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }

    impl Default for FakeBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ApiResult<T> {
            let json = self.respond("GET", url, None)?;
            serde_json::from_value(json).map_err(Into::into)
        }

        async fn patch_json(&self, url: &Url) -> ApiResult<()> {
            self.respond("PATCH", url, None)?;
            Ok(())
        }

        async fn post_json<Req, T>(&self, url: &Url, body: &Req) -> ApiResult<T>
        where
            Req: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            let json = self.respond("POST", url, serde_json::to_value(body).ok())?;
            serde_json::from_value(json).map_err(Into::into)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::testing::FakeBackend;
    use super::*;

    #[tokio::test]
    async fn fake_returns_canned_json() {
        let backend = FakeBackend::new().with_json("/api/alerts", json!([{"id": "a1"}]));

        let url = Url::parse("http://backend/api/alerts").unwrap();
        let body: serde_json::Value = backend.get_json(&url).await.unwrap();

        assert_eq!(body[0]["id"], "a1");
    }

    #[tokio::test]
    async fn fake_answers_unknown_urls_with_not_found() {
        let backend = FakeBackend::new();
        let url = Url::parse("http://backend/api/nothing").unwrap();

        let result: ApiResult<serde_json::Value> = backend.get_json(&url).await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }

    #[tokio::test]
    async fn fake_scripted_status_maps_to_status_error() {
        let backend = FakeBackend::new().with_status("/api/alerts", 503);
        let url = Url::parse("http://backend/api/alerts").unwrap();

        let result: ApiResult<serde_json::Value> = backend.get_json(&url).await;
        assert!(matches!(result, Err(ApiError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn fake_records_requests_in_order() {
        let backend = FakeBackend::new()
            .with_json("/dismiss", json!({"message": "ok"}))
            .with_json("/api/alerts", json!([]));

        let get = Url::parse("http://backend/api/alerts").unwrap();
        let patch = Url::parse("http://backend/api/alerts/a1/dismiss").unwrap();

        let _: serde_json::Value = backend.get_json(&get).await.unwrap();
        backend.patch_json(&patch).await.unwrap();

        let seen = backend.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].method, "GET");
        assert_eq!(seen[1].method, "PATCH");
        assert!(seen[1].url.ends_with("/a1/dismiss"));
    }

    #[tokio::test]
    async fn fake_records_post_bodies() {
        let backend = FakeBackend::new().with_json("/trigger", json!({"done": true}));
        let url = Url::parse("http://backend/api/simulate/trigger").unwrap();

        let _: serde_json::Value = backend
            .post_json(&url, &json!({"scenario": "flood"}))
            .await
            .unwrap();

        let seen = backend.requests();
        assert_eq!(seen[0].body.as_ref().unwrap()["scenario"], "flood");
    }

    #[tokio::test]
    async fn shared_clones_observe_the_same_requests() {
        let backend = FakeBackend::new().with_json("/api/alerts", json!([]));
        let observer = backend.clone();

        let url = Url::parse("http://backend/api/alerts").unwrap();
        let _: serde_json::Value = backend.get_json(&url).await.unwrap();

        assert_eq!(observer.requests().len(), 1);
    }
}

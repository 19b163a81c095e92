// Candidate-fallback HTTP client.
//
// Every call sweeps the candidate list in order and stops at the first
// 2xx response that decodes. Shared connectivity state (status + active
// endpoint) is only published by the most recently started call, so a slow
// stale call cannot overwrite the outcome of a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use crate::candidates::{CandidateSet, EndpointLabel};
use crate::error::Error;
use crate::sensors::DEFAULT_TIMEOUT;
use crate::status::ConnectionStatus;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

// ── Request description ──────────────────────────────────────────────

/// A single logical API request, replayed against each candidate.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the candidate base URL (e.g. `"/sedes"`).
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
    /// Per-attempt timeout for this endpoint. A timeout configured on the
    /// client replaces it.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Build a POST with a JSON-encoded body.
    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self, Error> {
        let body = serde_json::to_value(body).map_err(Error::Encode)?;
        Ok(Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
            timeout: None,
        })
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client that tries each candidate base URL in order.
///
/// Connectivity is observable through [`status`](Self::status),
/// [`subscribe_status`](Self::subscribe_status) and
/// [`active_endpoint`](Self::active_endpoint).
pub struct ApiClient {
    http: reqwest::Client,
    candidates: CandidateSet,
    /// Configured per-attempt timeout, applied to every call.
    timeout: Option<Duration>,
    status: watch::Sender<ConnectionStatus>,
    active: ArcSwap<Url>,
    /// Sequence number of the most recently started call.
    latest_call: AtomicU64,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with its own `reqwest::Client` from `transport`.
    pub fn new(candidates: CandidateSet, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::from_reqwest(candidates, http, transport.timeout))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        candidates: CandidateSet,
        http: reqwest::Client,
        timeout: Option<Duration>,
    ) -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Checking);
        let active = ArcSwap::from_pointee(candidates.primary().clone());
        Self {
            http,
            candidates,
            timeout,
            status,
            active,
            latest_call: AtomicU64::new(0),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Current connectivity status.
    pub fn status(&self) -> ConnectionStatus {
        *self.status.borrow()
    }

    /// Subscribe to connectivity changes.
    pub fn subscribe_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.subscribe()
    }

    /// The candidate that answered the latest published call, or the
    /// primary candidate before any call succeeded.
    pub fn active_endpoint(&self) -> Arc<Url> {
        self.active.load_full()
    }

    pub fn active_label(&self) -> EndpointLabel {
        EndpointLabel::for_url(&self.active.load())
    }

    // ── Fallback sweep ───────────────────────────────────────────────

    /// Execute `request` against each candidate until one succeeds.
    ///
    /// Returns the first successful decoded body. When every candidate
    /// fails, returns the last candidate's error unchanged.
    pub async fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, Error> {
        let seq = self.latest_call.fetch_add(1, Ordering::SeqCst) + 1;
        let timeout = self.effective_timeout(request);
        let mut last_error = None;

        for candidate in &self.candidates {
            match self.attempt(candidate, request, timeout).await {
                Ok(body) => {
                    self.publish(seq, ConnectionStatus::Connected, Some(candidate));
                    return Ok(body);
                }
                Err(e) => {
                    warn!(
                        candidate = %candidate,
                        path = %request.path,
                        error = %e,
                        "request failed, trying next endpoint"
                    );
                    last_error = Some(e);
                }
            }
        }

        self.publish(seq, ConnectionStatus::Error, None);
        Err(last_error.unwrap_or(Error::NoCandidates))
    }

    /// Configured timeout, else the request's own, else [`DEFAULT_TIMEOUT`].
    pub fn effective_timeout(&self, request: &ApiRequest) -> Duration {
        self.timeout.or(request.timeout).unwrap_or(DEFAULT_TIMEOUT)
    }

    /// One request against one candidate.
    async fn attempt<T: DeserializeOwned>(
        &self,
        base: &Url,
        request: &ApiRequest,
        timeout: Duration,
    ) -> Result<T, Error> {
        let url = join_path(base, &request.path)?;
        debug!("{} {url} params={:?}", request.method, request.query);

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .timeout(timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| map_send_error(e, timeout))?;
        handle_response(resp).await
    }

    /// Publish a call outcome if no newer call has started since.
    fn publish(&self, seq: u64, status: ConnectionStatus, endpoint: Option<&Url>) {
        if self.latest_call.load(Ordering::SeqCst) != seq {
            debug!(seq, ?status, "superseded call, outcome not published");
            return;
        }
        if let Some(url) = endpoint {
            self.active.store(Arc::new(url.clone()));
        }
        self.status.send_replace(status);
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Append a relative path to a base URL, keeping any base path prefix.
///
/// `Url::join` would drop the last base segment; this concatenates instead,
/// so `https://host/api` + `/sedes` becomes `https://host/api/sedes`.
fn join_path(base: &Url, path: &str) -> Result<Url, Error> {
    let full = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&full)?)
}

fn map_send_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    } else {
        Error::Transport(err)
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| body_read_error(status, &e))?;

    if !status.is_success() {
        return Err(parse_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// The status line arrived but the body did not, so this is not a
/// connection failure.
fn body_read_error(status: reqwest::StatusCode, err: &reqwest::Error) -> Error {
    Error::Deserialization {
        message: format!("failed to read HTTP {} response body: {err}", status.as_u16()),
        body: String::new(),
    }
}

fn parse_error(status: reqwest::StatusCode, raw: &str) -> Error {
    let detail = serde_json::from_str::<ErrorResponse>(raw)
        .ok()
        .and_then(|err| err.detail)
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

    Error::Api {
        status: status.as_u16(),
        detail,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn join_path_keeps_base_prefix() {
        let base = Url::parse("https://host.example/api").unwrap();
        assert_eq!(
            join_path(&base, "/sedes").unwrap().as_str(),
            "https://host.example/api/sedes"
        );
    }

    #[test]
    fn join_path_root() {
        let base = Url::parse("http://localhost:8000").unwrap();
        assert_eq!(join_path(&base, "/").unwrap().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn parse_error_reads_string_detail() {
        let err = parse_error(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            r#"{"detail":"Cassandra is not connected"}"#,
        );
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.detail(), Some("Cassandra is not connected"));
    }

    #[test]
    fn parse_error_flattens_structured_detail() {
        let err = parse_error(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":[{"loc":["query","sede"],"msg":"field required"}]}"#,
        );
        assert_eq!(err.status(), Some(422));
        assert!(err.detail().unwrap().contains("field required"));
    }

    #[test]
    fn parse_error_tolerates_non_json_body() {
        let err = parse_error(reqwest::StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn body_read_failure_is_not_a_connection_error() {
        let source = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        let err = body_read_error(reqwest::StatusCode::OK, &source);

        assert!(!err.is_connection());
        assert!(
            matches!(err, Error::Deserialization { ref message, .. } if message.contains("HTTP 200")),
            "got: {err:?}"
        );
    }

    #[test]
    fn configured_timeout_replaces_endpoint_timeout() {
        let candidates = CandidateSet::parse(["http://localhost:8000"]).unwrap();
        let req = ApiRequest::get("/sedes").timeout(Duration::from_secs(15));

        let configured = ApiClient::from_reqwest(
            candidates.clone(),
            reqwest::Client::new(),
            Some(Duration::from_secs(1)),
        );
        assert_eq!(configured.effective_timeout(&req), Duration::from_secs(1));

        let unconfigured = ApiClient::from_reqwest(candidates, reqwest::Client::new(), None);
        assert_eq!(unconfigured.effective_timeout(&req), Duration::from_secs(15));
        assert_eq!(
            unconfigured.effective_timeout(&ApiRequest::get("/")),
            DEFAULT_TIMEOUT
        );
    }

    #[test]
    fn request_builder_collects_query_and_timeout() {
        let req = ApiRequest::get("/readings")
            .query("sede", "north")
            .query("limit", 20)
            .timeout(Duration::from_secs(3));
        assert_eq!(req.method, Method::GET);
        assert_eq!(
            req.query,
            vec![("sede", "north".to_owned()), ("limit", "20".to_owned())]
        );
        assert_eq!(req.timeout, Some(Duration::from_secs(3)));
    }
}

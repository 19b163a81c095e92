// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::assert_err;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sensorboard_api::{
    ApiClient, ApiRequest, CandidateSet, ConnectionStatus, Error, NewReading, ReadingQuery,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Nothing listens on port 1; connections are refused immediately.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

fn client_for(urls: &[&str]) -> ApiClient {
    let candidates = CandidateSet::parse(urls.iter().copied()).unwrap();
    ApiClient::from_reqwest(candidates, reqwest::Client::new(), None)
}

// ── Fallback sweep ──────────────────────────────────────────────────

#[tokio::test]
async fn test_falls_back_to_second_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Norte", "Sur"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[DEAD_ENDPOINT, &server.uri()]);
    assert_eq!(client.status(), ConnectionStatus::Checking);

    let sites = client.list_sites().await.unwrap();

    assert_eq!(sites, vec!["Norte".to_owned(), "Sur".to_owned()]);
    assert_eq!(client.status(), ConnectionStatus::Connected);
    assert_eq!(
        client.active_endpoint().as_str(),
        format!("{}/", server.uri())
    );
}

#[tokio::test]
async fn test_first_success_stops_the_sweep() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["A"])))
        .expect(1)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["B"])))
        .expect(0)
        .mount(&second)
        .await;

    let client = client_for(&[&first.uri(), &second.uri()]);
    let sites = client.list_sites().await.unwrap();

    assert_eq!(sites, vec!["A".to_owned()]);
}

#[tokio::test]
async fn test_http_error_moves_on_to_next_candidate() {
    let broken = MockServer::start().await;
    let healthy = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;
    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Centro"])))
        .mount(&healthy)
        .await;

    let client = client_for(&[&broken.uri(), &healthy.uri()]);
    let sites = client.list_sites().await.unwrap();

    assert_eq!(sites, vec!["Centro".to_owned()]);
    assert_eq!(client.status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn test_all_candidates_fail_returns_last_error() {
    let last = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "detail": "storage offline" })),
        )
        .mount(&last)
        .await;

    let client = client_for(&[DEAD_ENDPOINT, &last.uri()]);
    let result = client.list_sites().await;

    match result {
        Err(Error::Api { status, ref detail }) => {
            assert_eq!(status, 503);
            assert_eq!(detail.as_deref(), Some("storage offline"));
        }
        other => panic!("expected the last candidate's 503, got: {other:?}"),
    }
    assert_eq!(client.status(), ConnectionStatus::Error);
}

#[tokio::test]
async fn test_all_unreachable_reports_connection_error() {
    let client = client_for(&[DEAD_ENDPOINT]);
    let err = assert_err!(client.list_sites().await);

    assert!(err.is_connection(), "expected a connection error, got: {err:?}");
    assert_eq!(client.status(), ConnectionStatus::Error);
}

#[tokio::test]
async fn test_status_recovers_after_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let mut rx = client.subscribe_status();

    assert!(client.list_sites().await.is_err());
    assert_eq!(*rx.borrow_and_update(), ConnectionStatus::Error);

    assert!(client.list_sites().await.unwrap().is_empty());
    assert_eq!(*rx.borrow_and_update(), ConnectionStatus::Connected);
}

// ── Timeouts ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_per_call_timeout_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let req = ApiRequest::get("/").timeout(Duration::from_millis(200));
    let result: Result<serde_json::Value, Error> = client.call(&req).await;

    assert!(
        matches!(result, Err(Error::Timeout { .. })),
        "expected Timeout, got: {result:?}"
    );
    assert_eq!(client.status(), ConnectionStatus::Error);
}

// ── Request fencing ─────────────────────────────────────────────────

#[tokio::test]
async fn test_stale_failure_does_not_overwrite_newer_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let slow = ApiRequest::get("/slow");
    let fast = ApiRequest::get("/fast");

    let (slow_res, fast_res) = tokio::join!(
        client.call::<serde_json::Value>(&slow),
        client.call::<serde_json::Value>(&fast),
    );

    assert!(slow_res.is_err());
    assert!(fast_res.is_ok());
    assert_eq!(client.status(), ConnectionStatus::Connected);
}

// ── Typed endpoints ─────────────────────────────────────────────────

#[tokio::test]
async fn test_health_tolerates_unexpected_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("hello")))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let report = client.health().await.unwrap();

    assert!(!report.is_healthy());
    assert_eq!(client.status(), ConnectionStatus::Connected);
}

#[tokio::test]
async fn test_list_sensor_types_sends_site_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sensor_types"))
        .and(query_param("sede", "Sede Norte"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["humidity"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let types = client.list_sensor_types("Sede Norte").await.unwrap();

    assert_eq!(types, vec!["humidity".to_owned()]);
}

#[tokio::test]
async fn test_list_readings_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/readings"))
        .and(query_param("sede", "Norte"))
        .and(query_param("sensor_type", "temperature"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "sede": "Norte",
                "sensor_type": "temperature",
                "sensor_id": "t-1",
                "ts": "2024-05-01T12:00:00",
                "value": 22.25
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let readings = client
        .list_readings(&ReadingQuery {
            sede: "Norte".into(),
            sensor_type: "temperature".into(),
            limit: 5,
        })
        .await
        .unwrap();

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].sensor_id, "t-1");
}

#[tokio::test]
async fn test_null_list_body_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sedes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::Value::Null))
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    assert!(client.list_sites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_reading_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/readings"))
        .and(body_json(json!({
            "sede": "Norte",
            "sensor_type": "temperature",
            "sensor_id": "t-9",
            "value": 23.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "timestamp": "2024-05-01T12:00:00.000001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&[&server.uri()]);
    let created = client
        .create_reading(&NewReading {
            sede: "Norte".into(),
            sensor_type: "temperature".into(),
            sensor_id: "t-9".into(),
            value: 23.7,
        })
        .await
        .unwrap();

    assert_eq!(created.status.as_deref(), Some("ok"));
    assert_eq!(
        created.timestamp.as_deref(),
        Some("2024-05-01T12:00:00.000001")
    );
}

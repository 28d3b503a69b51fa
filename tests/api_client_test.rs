//! End-to-end API client tests over real HTTP against a local mock server.

use std::time::Duration;

use campus_portal::error::{ApiError, ErrorCategory, NetworkError, PortalError};
use campus_portal::models::DashboardRole;
use campus_portal::{PortalApiClient, PortalConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, timeout: Duration) -> PortalApiClient {
    let config = PortalConfig::new()
        .with_base_url(format!("{}/api/", server.uri()))
        .with_request_timeout(timeout);
    PortalApiClient::from_config(&config)
}

#[tokio::test]
async fn test_fetch_events_decodes_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "id": "e1", "title": "Open House", "date": "2026-11-02" },
                { "id": "e2", "title": "Graduation" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let events = client_for(&server, Duration::from_secs(5))
        .fetch_events()
        .await
        .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].date,
        chrono::NaiveDate::from_ymd_opt(2026, 11, 2)
    );
    assert!(events[1].date.is_none());
}

#[tokio::test]
async fn test_dashboard_path_uses_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/lecturer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "items": [{ "label": "Classes today", "value": "3" }] }
        })))
        .mount(&server)
        .await;

    let dashboard = client_for(&server, Duration::from_secs(5))
        .fetch_dashboard(DashboardRole::Lecturer)
        .await
        .unwrap();

    assert!(dashboard.greeting.is_none());
    assert_eq!(dashboard.items[0].value, "3");
}

#[tokio::test]
async fn test_unsuccessful_envelope_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "News service is under maintenance"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5))
        .fetch_news()
        .await
        .unwrap_err();

    assert!(matches!(err.inner(), PortalError::Api(ApiError::Rejected { .. })));
    assert_eq!(err.user_message(), "News service is under maintenance");
}

#[tokio::test]
async fn test_client_error_status_is_not_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/programs"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(5))
        .fetch_programs()
        .await
        .unwrap_err();

    match err.inner() {
        PortalError::Network(NetworkError::HttpStatus { status, message }) => {
            assert_eq!(*status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("expected HTTP status error, got {:?}", other),
    }
    assert_eq!(err.category(), ErrorCategory::Client);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/institutions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server, Duration::from_secs(1))
        .fetch_institutions()
        .await
        .unwrap_err();

    assert!(matches!(
        err.inner(),
        PortalError::Network(NetworkError::Timeout { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Network);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = PortalConfig::new()
        .with_base_url("http://127.0.0.1:1/api")
        .with_request_timeout(Duration::from_secs(2));

    let err = PortalApiClient::from_config(&config)
        .fetch_about_topics()
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
}

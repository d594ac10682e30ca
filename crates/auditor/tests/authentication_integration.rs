//! Session handling of a full run over HTTP.

mod common;

use std::time::Duration;

use controller::AuthenticationError;
use fleet_auditor::app;
use fleet_auditor::config::Config;
use fleet_auditor::AuditError;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, auth: &str) -> Config {
    Config::from_toml(&format!(
        r#"
        [controller]
        host = "{}"
        timeout_secs = 1
        {}
        "#,
        server.uri(),
        auth
    ))
    .unwrap()
}

#[tokio::test]
async fn test_authentication_timeout_stops_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<response status="success"><result><key>late-key</key></result></response>"#,
                )
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, "username = \"admin\"\npassword = \"secret\"");
    let err = app::run(&config).await.unwrap_err();

    assert!(matches!(
        err,
        AuditError::Authentication(AuthenticationError::Timeout(_))
    ));
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "POST");
}

#[tokio::test]
async fn test_rejected_credentials_stop_run() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"<response status="error" code="403"><result><msg>Invalid Credential</msg></result></response>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, "username = \"admin\"\npassword = \"wrong\"");
    let err = app::run(&config).await.unwrap_err();

    assert!(matches!(
        err,
        AuditError::Authentication(AuthenticationError::Rejected(_))
    ));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_generated_key_is_used_for_commands() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(body_string_contains("type=keygen"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<response status="success"><result><key>generated-key</key></result></response>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "op"))
        .and(query_param("key", "generated-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(common::devices_xml(&[])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, "username = \"admin\"\npassword = \"secret\"");
    let report = app::run(&config).await.unwrap();

    assert!(report.devices.is_empty());
    assert_eq!(report.controller.as_deref(), Some(mock_server.uri().as_str()));
}

#[tokio::test]
async fn test_pre_issued_key_skips_keygen() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("key", "pre-issued"))
        .and(query_param(
            "cmd",
            "<show><devices><connected></connected></devices></show>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::devices_xml(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, "api_key = \"pre-issued\"");
    let report = app::run(&config).await.unwrap();

    assert!(report.devices.is_empty());
}

use std::time::Duration;

use controller::{
    AuthenticationError, CommandClient, CommandError, ContentPackage, ControllerEndpoint,
    OperationalApi, OperationalCommand, Session, SessionManager,
};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEYGEN_OK: &str =
    r#"<response status="success"><result><key>LUFRPT14MW5xOEo1R09KVlBZNnpnemh0VHRBOWl6TGM9</key></result></response>"#;

fn session_manager(server: &MockServer, timeout: Duration) -> SessionManager {
    SessionManager::new(ControllerEndpoint::new(&server.uri()), timeout, true).unwrap()
}

fn command_client(server: &MockServer, timeout: Duration) -> CommandClient {
    CommandClient::new(ControllerEndpoint::new(&server.uri()), timeout, true).unwrap()
}

#[tokio::test]
async fn test_keygen_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .and(body_string_contains("type=keygen"))
        .and(body_string_contains("user=admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string(KEYGEN_OK))
        .expect(1)
        .mount(&mock_server)
        .await;

    let manager = session_manager(&mock_server, Duration::from_secs(5));
    let session = manager.acquire("admin", "s3cret").await.unwrap();

    assert_eq!(session.key(), "LUFRPT14MW5xOEo1R09KVlBZNnpnemh0VHRBOWl6TGM9");
}

#[tokio::test]
async fn test_keygen_rejected_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"<response status="error" code="403"><result><msg>Invalid Credential</msg></result></response>"#,
        ))
        .mount(&mock_server)
        .await;

    let manager = session_manager(&mock_server, Duration::from_secs(5));
    let err = manager.acquire("admin", "wrong").await.unwrap_err();

    match err {
        AuthenticationError::Rejected(message) => assert_eq!(message, "Invalid Credential"),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_keygen_error_envelope_with_ok_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<response status="error"><msg><line>Account locked</line></msg></response>"#,
        ))
        .mount(&mock_server)
        .await;

    let manager = session_manager(&mock_server, Duration::from_secs(5));
    let err = manager.acquire("admin", "s3cret").await.unwrap_err();

    assert!(matches!(err, AuthenticationError::Rejected(ref m) if m == "Account locked"));
}

#[tokio::test]
async fn test_keygen_missing_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<response status="success"><result/></response>"#),
        )
        .mount(&mock_server)
        .await;

    let manager = session_manager(&mock_server, Duration::from_secs(5));
    let err = manager.acquire("admin", "s3cret").await.unwrap_err();

    assert!(matches!(err, AuthenticationError::MissingKey));
}

#[tokio::test]
async fn test_keygen_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Maintenance</body></html>"))
        .mount(&mock_server)
        .await;

    let manager = session_manager(&mock_server, Duration::from_secs(5));
    let err = manager.acquire("admin", "s3cret").await.unwrap_err();

    assert!(matches!(err, AuthenticationError::Malformed(_)));
}

#[tokio::test]
async fn test_keygen_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(KEYGEN_OK)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let manager = session_manager(&mock_server, Duration::from_millis(200));
    let err = manager.acquire("admin", "s3cret").await.unwrap_err();

    assert!(matches!(err, AuthenticationError::Timeout(200)));
}

#[tokio::test]
async fn test_keygen_unreachable() {
    let manager = SessionManager::new(
        ControllerEndpoint::new("http://127.0.0.1:1"),
        Duration::from_secs(2),
        true,
    )
    .unwrap();
    let err = manager.acquire("admin", "s3cret").await.unwrap_err();

    assert!(matches!(
        err,
        AuthenticationError::Transport(_) | AuthenticationError::Timeout(_)
    ));
}

#[tokio::test]
async fn test_op_command_sends_key_and_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("type", "op"))
        .and(query_param("key", "abc123"))
        .and(query_param("target", "007951000123456"))
        .and(query_param(
            "cmd",
            "<show><system><info></info></system></show>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<response status="success"><result><system><hostname>fw-edge-01</hostname><sw-version>10.2.4</sw-version></system></result></response>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = command_client(&mock_server, Duration::from_secs(5));
    let session = Session::from_api_key("abc123");
    let node = client
        .execute(&session, OperationalCommand::SystemInfo, Some("007951000123456"))
        .await
        .unwrap();

    assert_eq!(node.find_text("sw-version"), Some("10.2.4"));
}

#[tokio::test]
async fn test_op_command_without_target() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param(
            "cmd",
            "<request><wildfire><upgrade><check></check></upgrade></wildfire></request>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<response status="success"><result><content-updates><entry><version>850-900</version><latest>yes</latest></entry></content-updates></result></response>"#,
        ))
        .mount(&mock_server)
        .await;

    let client = command_client(&mock_server, Duration::from_secs(5));
    let session = Session::from_api_key("abc123");
    let node = client
        .execute(
            &session,
            OperationalCommand::ContentUpgradeCheck(ContentPackage::Wildfire),
            None,
        )
        .await
        .unwrap();

    assert_eq!(node.find_text("version"), Some("850-900"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.query_pairs().any(|(name, _)| name == "target"));
}

#[tokio::test]
async fn test_op_command_error_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<response status="error"><msg><line>Device 0099 not connected</line></msg></response>"#,
        ))
        .mount(&mock_server)
        .await;

    let client = command_client(&mock_server, Duration::from_secs(5));
    let result = client
        .execute(
            &Session::from_api_key("abc123"),
            OperationalCommand::LicenseInfo,
            Some("0099"),
        )
        .await;

    assert_eq!(
        result,
        Err(CommandError::ControllerRejected(
            "Device 0099 not connected".into()
        ))
    );
}

#[tokio::test]
async fn test_op_command_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = command_client(&mock_server, Duration::from_secs(5));
    let result = client
        .execute(
            &Session::from_api_key("abc123"),
            OperationalCommand::JobList,
            None,
        )
        .await;

    match result {
        Err(CommandError::ControllerRejected(message)) => {
            assert!(message.starts_with("HTTP 500"));
        }
        other => panic!("expected ControllerRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_op_command_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<response status="success"><result/></response>"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = command_client(&mock_server, Duration::from_millis(250));
    let result = client
        .execute(
            &Session::from_api_key("abc123"),
            OperationalCommand::ListDevices,
            None,
        )
        .await;

    assert_eq!(result, Err(CommandError::Timeout(250)));
}

#[tokio::test]
async fn test_network_error_does_not_leak_key() {
    let client = CommandClient::new(
        ControllerEndpoint::new("http://127.0.0.1:1"),
        Duration::from_secs(2),
        true,
    )
    .unwrap();
    let result = client
        .execute(
            &Session::from_api_key("very-secret-key"),
            OperationalCommand::ListDevices,
            None,
        )
        .await;

    match result {
        Err(CommandError::Network(message)) => assert!(!message.contains("very-secret-key")),
        Err(CommandError::Timeout(_)) => {}
        other => panic!("expected a transport failure, got {:?}", other),
    }
}

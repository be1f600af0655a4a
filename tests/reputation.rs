//! Reputation clients against local servers.

#![cfg(all(feature = "safe-browsing", feature = "backend"))]

mod common;

use common::{Reply, TestServer};
use std::time::Duration;
use urlscan::backends::{BackendClient, BackendConfig, SafeBrowsingClient, SafeBrowsingConfig};
use urlscan::{ReputationChecker, ScanError, ThreatType};

const PHISH_MATCH: &str = r#"{
  "matches": [
    {
      "threatType": "SOCIAL_ENGINEERING",
      "platformType": "ANY_PLATFORM",
      "threat": { "url": "https://phish.test/" },
      "cacheDuration": "300s",
      "threatEntryType": "URL"
    }
  ]
}"#;

fn safe_browsing(server: &TestServer) -> SafeBrowsingClient {
    let config = SafeBrowsingConfig::new("test-key")
        .with_base_url(format!("{}v4", server.url))
        .with_timeout(Duration::from_secs(5));
    SafeBrowsingClient::new(config).unwrap()
}

fn backend(server: &TestServer) -> BackendClient {
    BackendClient::new(BackendConfig::new(format!("{}scan", server.url))).unwrap()
}

#[tokio::test]
async fn safe_browsing_empty_body_is_safe() {
    let server = TestServer::start(Reply::json(200, "{}"));
    let verdict = safe_browsing(&server).check("https://example.com/").await.unwrap();
    assert!(verdict.safe);
    assert!(verdict.matches.is_empty());
}

#[tokio::test]
async fn safe_browsing_sends_lookup_request() {
    let server = TestServer::start(Reply::json(200, "{}"));
    safe_browsing(&server).check("https://example.com/").await.unwrap();

    let request = server.next_request().unwrap();
    assert!(request.starts_with("POST /v4/threatMatches:find?key=test-key HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));

    let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        json["threatInfo"]["threatTypes"],
        serde_json::json!(["MALWARE", "SOCIAL_ENGINEERING", "UNWANTED_SOFTWARE"])
    );
    assert_eq!(json["threatInfo"]["platformTypes"][0], "ANY_PLATFORM");
    assert_eq!(json["threatInfo"]["threatEntries"][0]["url"], "https://example.com/");
}

#[tokio::test]
async fn safe_browsing_match_is_unsafe() {
    let server = TestServer::start(Reply::json(200, PHISH_MATCH));
    let verdict = safe_browsing(&server).check("https://phish.test/").await.unwrap();

    assert!(!verdict.safe);
    assert_eq!(verdict.threat_types(), vec![ThreatType::SocialEngineering]);
    assert_eq!(verdict.matches[0].engine, "safe_browsing");
}

#[tokio::test]
async fn safe_browsing_server_error_propagates() {
    let server = TestServer::start(Reply::json(500, r#"{"error":"boom"}"#));
    let err = safe_browsing(&server).check("https://example.com/").await.unwrap_err();
    assert!(matches!(err, ScanError::ServiceError { status: 500, .. }));
    assert!(err.is_service_failure());
}

#[tokio::test]
async fn safe_browsing_rejected_key() {
    let server = TestServer::start(Reply::json(403, r#"{"error":"denied"}"#));
    let err = safe_browsing(&server).check("https://example.com/").await.unwrap_err();
    assert!(matches!(err, ScanError::AuthenticationFailed { .. }));
}

#[tokio::test]
async fn safe_browsing_garbage_body_is_ambiguous() {
    let server = TestServer::start(Reply::text(200, "<html>captive portal</html>"));
    let err = safe_browsing(&server).check("https://example.com/").await.unwrap_err();
    assert!(matches!(err, ScanError::AmbiguousResponse { .. }));
}

#[tokio::test]
async fn safe_browsing_connection_failure_hides_key() {
    let config = SafeBrowsingConfig::new("very-secret-key")
        .with_base_url(format!("{}v4", common::refused_url()));
    let err = SafeBrowsingClient::new(config)
        .unwrap()
        .check("https://example.com/")
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::ConnectionFailed { .. }));
    assert!(!err.to_string().contains("very-secret-key"));
}

#[tokio::test]
async fn backend_safe_flag() {
    let server = TestServer::start(Reply::json(200, r#"{"safe":true}"#));
    assert!(backend(&server).check("https://example.com/").await.unwrap().safe);

    let request = server.next_request().unwrap();
    assert!(request.starts_with("POST /scan HTTP/1.1"));
    assert!(request.ends_with(r#"{"url":"https://example.com/"}"#));

    let server = TestServer::start(Reply::json(200, r#"{"safe":false}"#));
    assert!(!backend(&server).check("https://example.com/").await.unwrap().safe);
}

#[tokio::test]
async fn backend_missing_flag_is_ambiguous() {
    let server = TestServer::start(Reply::json(200, "{}"));
    let err = backend(&server).check("https://example.com/").await.unwrap_err();
    assert!(matches!(err, ScanError::AmbiguousResponse { .. }));
}

#[tokio::test]
async fn backend_error_status_propagates() {
    let server = TestServer::start(Reply::json(502, "{}"));
    let err = backend(&server).check("https://example.com/").await.unwrap_err();
    assert_eq!(err.to_string(), "'backend' scan failed with status 502");
}

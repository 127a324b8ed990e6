//! HTTP participant adapter tests against a mock control API

use std::time::Duration;

use nodewatch_client::{HttpParticipant, ParticipantClientConfig};
use nodewatch_common::{AppFault, MeshParticipant, NodeIdentity, NodewatchError, ParticipantError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(seed: u8) -> NodeIdentity {
    let mut raw = [seed; 33];
    raw[0] = 0x02;
    NodeIdentity::from_bytes(raw)
}

async fn connected(server: &MockServer) -> HttpParticipant {
    Mock::given(method("GET"))
        .and(path("/api/about"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"public_key": key(1).to_hex()})))
        .mount(server)
        .await;

    HttpParticipant::connect(ParticipantClientConfig::new(&server.uri()))
        .await
        .unwrap()
}

fn app_path(app: &str) -> String {
    format!("/api/visors/{}/apps/{}", key(1).to_hex(), app)
}

#[tokio::test]
async fn test_connect_learns_local_key() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    assert_eq!(participant.local_pk(), &key(1));
}

#[tokio::test]
async fn test_connect_failure_is_startup_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/about"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = HttpParticipant::connect(ParticipantClientConfig::new(&server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, NodewatchError::ParticipantStartupFailure(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_transport_lifecycle() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    let transport_id = "6f1c5c3e-7a8b-4b43-9d0e-1f2a3b4c5d6e";
    let transports = format!("/api/visors/{}/transports", key(1).to_hex());

    Mock::given(method("POST"))
        .and(path(transports.as_str()))
        .and(body_json(json!({
            "remote_pk": key(2).to_hex(),
            "transport_type": "dmsg",
            "timeout_ms": 10000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": transport_id})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/{}", transports, transport_id).as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let handle = participant
        .add_transport(&key(2), "dmsg", Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(handle.id.to_string(), transport_id);
    assert_eq!(handle.remote, key(2));

    participant.remove_transport(&handle).await.unwrap();
}

#[tokio::test]
async fn test_add_transport_refused_is_rejected() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("/api/visors/{}/transports", key(1).to_hex()).as_str()))
        .respond_with(ResponseTemplate::new(500).set_body_string("dmsg dial failed"))
        .mount(&server)
        .await;

    let err = participant
        .add_transport(&key(2), "dmsg", Duration::from_secs(10))
        .await
        .unwrap_err();
    assert!(matches!(err, ParticipantError::Rejected(_)));
}

#[tokio::test]
async fn test_app_control_requests() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    let app = app_path("vpn-client");

    Mock::given(method("PUT"))
        .and(path(app.as_str()))
        .and(body_json(json!({"pk": key(3).to_hex()})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(app.as_str()))
        .and(body_json(json!({"status": 1})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(app.as_str()))
        .and(body_json(json!({"status": 0})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    participant.set_app_target("vpn-client", &key(3)).await.unwrap();
    participant.start_app("vpn-client").await.unwrap();
    participant.stop_app("vpn-client").await.unwrap();
}

#[tokio::test]
async fn test_app_error_is_mapped_to_fault() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    Mock::given(method("GET"))
        .and(path(app_path("vpn-client").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vpn-client",
            "status": 3,
            "detailed_status": "errored",
            "error": "session closed: not permitted"
        })))
        .mount(&server)
        .await;

    let fault = participant.get_app_error("vpn-client").await.unwrap();
    assert_eq!(fault, Some(AppFault::NotPermitted));
}

#[tokio::test]
async fn test_healthy_app_has_no_fault() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    Mock::given(method("GET"))
        .and(path(app_path("vpn-client").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "vpn-client",
            "status": 1,
            "detailed_status": "running"
        })))
        .mount(&server)
        .await;

    assert_eq!(participant.get_app_error("vpn-client").await.unwrap(), None);
}

#[tokio::test]
async fn test_connection_summary() {
    let server = MockServer::start().await;
    let participant = connected(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("{}/connections", app_path("vpn-client")).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"is_alive": true, "latency_ms": 85, "bandwidth_sent": 1024}
        ])))
        .mount(&server)
        .await;

    let summary = participant
        .get_app_connection_summary("vpn-client")
        .await
        .unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].latency(), Some(Duration::from_millis(85)));
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use github_telex::domain::models::outbound_message::OutboundMessage;
use github_telex::domain::services::relay_service::RelayService;
use github_telex::infrastructure::services::telex_relay_service_impl::TelexRelayServiceImpl;
use github_telex::utils::errors::RelayError;
use github_telex::workers::relay_worker::{DeliveryOutcome, RelayJob, RelayWorker};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_message() -> OutboundMessage {
    OutboundMessage::new(
        "push",
        "GitHub Push Event by testuser:\n- Initial commit".to_string(),
        "testuser".to_string(),
    )
}

async fn telex_responding(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(status).set_body_string("telex says hi"))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_relay_posts_json_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "event_name": "push",
            "message": "GitHub Push Event by testuser:\n- Initial commit",
            "status": "success",
            "username": "testuser"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let relay = TelexRelayServiceImpl::new(Duration::from_secs(5)).unwrap();
    let status = relay
        .deliver(&sample_message(), &format!("{}/hook", server.uri()))
        .await
        .unwrap();

    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_relay_accepts_202() {
    let server = telex_responding(202).await;
    let relay = TelexRelayServiceImpl::new(Duration::from_secs(5)).unwrap();

    let status = relay
        .deliver(&sample_message(), &format!("{}/hook", server.uri()))
        .await
        .unwrap();

    assert_eq!(status, 202);
}

#[tokio::test]
async fn test_relay_rejects_other_statuses() {
    for code in [201u16, 400, 500] {
        let server = telex_responding(code).await;
        let relay = TelexRelayServiceImpl::new(Duration::from_secs(5)).unwrap();

        let err = relay
            .deliver(&sample_message(), &format!("{}/hook", server.uri()))
            .await
            .unwrap_err();

        match err {
            RelayError::Rejected { status, body } => {
                assert_eq!(status, code);
                assert_eq!(body, "telex says hi");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_relay_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let relay = TelexRelayServiceImpl::new(Duration::from_millis(100)).unwrap();
    let err = relay
        .deliver(&sample_message(), &format!("{}/hook", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Transport(_)));
    assert_eq!(err.reason(), "timeout");
}

#[tokio::test]
async fn test_worker_records_delivery_outcomes() {
    let ok_server = telex_responding(200).await;
    let failing_server = telex_responding(503).await;
    let relay = Arc::new(TelexRelayServiceImpl::new(Duration::from_secs(5)).unwrap());
    let worker = RelayWorker::new(relay, 2);

    let delivered = worker
        .deliver(RelayJob::new(
            sample_message(),
            format!("{}/hook", ok_server.uri()),
        ))
        .await;
    assert_eq!(delivered, DeliveryOutcome::Delivered { status: 200 });

    let failed = worker
        .deliver(RelayJob::new(
            sample_message(),
            format!("{}/hook", failing_server.uri()),
        ))
        .await;
    assert!(!failed.is_delivered());
    assert!(matches!(
        failed,
        DeliveryOutcome::Failed {
            status: Some(503),
            ..
        }
    ));
}

#[tokio::test]
async fn test_worker_records_network_failure() {
    // Nothing listens on the port once the listener is dropped
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let relay = Arc::new(TelexRelayServiceImpl::new(Duration::from_secs(2)).unwrap());
    let worker = RelayWorker::new(relay, 1);

    let outcome = worker
        .deliver(RelayJob::new(sample_message(), format!("{}/hook", uri)))
        .await;

    assert!(matches!(outcome, DeliveryOutcome::Failed { status: None, .. }));
}

#![cfg(test)]
use std::net::SocketAddr;
use std::time::Duration;

use k8scan_common::finding::ProbeOutcome;
use k8scan_core::network::http::InsecureClient;
use k8scan_core::signature::SignatureProber;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prober(http_timeout: Duration) -> SignatureProber {
    SignatureProber::new(Box::new(InsecureClient::new(http_timeout).unwrap()))
}

#[tokio::test]
async fn root_paths_document_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"paths":{"/api":{}}}"#))
        .mount(&server)
        .await;

    let addr: SocketAddr = *server.address();
    let outcome = prober(Duration::from_secs(2)).classify(addr).await;

    assert_eq!(
        outcome,
        ProbeOutcome::Match { uri: format!("http://{addr}") }
    );
}

/// Any HTTP status is a completed transaction, so a 404 page ends probing.
#[tokio::test]
async fn error_status_counts_as_response() {
    let server = MockServer::start().await;
    let addr: SocketAddr = *server.address();

    let outcome = prober(Duration::from_secs(2)).classify(addr).await;

    assert_eq!(outcome, ProbeOutcome::NoSignature);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

/// Root times out, HTTPS fails the handshake, `/api/` answers without a signature:
/// probing stops there even though a later candidate could have matched.
#[tokio::test]
async fn stops_at_first_completed_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>Kubernetes Dashboard</title>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"kind":"Status"}"#))
        .mount(&server)
        .await;

    let outcome = prober(Duration::from_millis(500)).classify(*server.address()).await;

    assert_eq!(outcome, ProbeOutcome::NoSignature);
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/", "/api/"]);
}

#[tokio::test]
async fn closed_port_is_no_response() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = prober(Duration::from_millis(500)).classify(addr).await;
    assert_eq!(outcome, ProbeOutcome::NoResponse);
}

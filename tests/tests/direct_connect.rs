//! Proxy variables are process-wide, so this check lives in its own test binary.
use std::net::SocketAddr;
use std::time::Duration;

use k8scan_common::finding::ProbeOutcome;
use k8scan_core::network::http::InsecureClient;
use k8scan_core::signature::SignatureProber;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROXY_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

#[tokio::test]
async fn signature_probes_bypass_proxy_environment() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(0)
        .mount(&proxy)
        .await;

    for var in PROXY_VARS {
        std::env::set_var(var, proxy.uri());
    }
    std::env::remove_var("NO_PROXY");
    std::env::remove_var("no_proxy");

    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<title>Kubernetes Dashboard</title>"),
        )
        .expect(1)
        .mount(&target)
        .await;

    let prober = SignatureProber::new(Box::new(
        InsecureClient::new(Duration::from_secs(2)).unwrap(),
    ));
    let addr: SocketAddr = *target.address();
    let outcome = prober.classify(addr).await;

    assert_eq!(
        outcome,
        ProbeOutcome::Match { uri: format!("http://{addr}") }
    );
}

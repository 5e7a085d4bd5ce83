#![cfg(test)]
use std::time::Duration;

use k8scan_common::config::ScanConfig;
use k8scan_common::finding::{Finding, OwnershipInfo};
use k8scan_common::network::ports::PortSet;
use k8scan_common::network::range::NetworkBlock;
use k8scan_core::scanner::{ScanService, ScanSummary};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_VERSIONS: &str = r#"{"versions":["v1"],"serverAddress":"x"}"#;

fn config(lookup_endpoint: String) -> ScanConfig {
    ScanConfig {
        ping_timeout: Duration::from_millis(500),
        http_timeout: Duration::from_secs(2),
        concurrency: Some(16),
        lookup_endpoint,
        mailgun: None,
    }
}

async fn run_scan(cfg: &ScanConfig, cidr: &str, ports: Vec<u16>) -> (ScanSummary, Vec<Finding>) {
    let service = ScanService::from_config(cfg).unwrap();
    let block: NetworkBlock = cidr.parse().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let summary = service.scan(&block, &PortSet::new(ports), tx).await;

    let mut findings = Vec::new();
    while let Some(finding) = rx.recv().await {
        findings.push(finding);
    }
    (summary, findings)
}

async fn api_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

/// A single exposed API server on a /32 produces exactly one finding, enriched from the registry.
#[tokio::test]
async fn scan_single_host_finds_api_server() {
    let target = api_server(API_VERSIONS).await;
    let port = target.address().port();

    let registry = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/ip/127.0.0.1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "net": {
                "orgRef": {
                    "@handle": "LOOP",
                    "@name": "Loopback Networks",
                    "$": "https://whois.example/rest/org/LOOP"
                }
            }
        })))
        .expect(1)
        .mount(&registry)
        .await;

    let cfg = config(format!("{}/rest/ip/{{ip}}", registry.uri()));
    let (summary, findings) = run_scan(&cfg, "127.0.0.1/32", vec![port]).await;

    assert_eq!(summary.completed, 1);
    assert_eq!(findings.len(), 1, "Found incorrect amount of findings: {findings:?}");

    let finding = &findings[0];
    assert_eq!(finding.uri, format!("http://127.0.0.1:{port}"));
    assert_eq!(
        finding.to_string(),
        format!("127.0.0.1:{port}\tLOOP\tLoopback Networks\thttps://whois.example/rest/org/LOOP")
    );
}

#[tokio::test]
async fn scan_reports_finding_when_registry_fails() {
    let target = api_server("<title>Kubernetes Dashboard</title>").await;
    let port = target.address().port();

    let registry = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&registry)
        .await;

    let cfg = config(format!("{}/rest/ip/{{ip}}", registry.uri()));
    let (_, findings) = run_scan(&cfg, "127.0.0.1/32", vec![port]).await;

    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].owner, OwnershipInfo::default());
    assert_eq!(findings[0].to_string(), format!("127.0.0.1:{port}\t\t\t"));
}

#[tokio::test]
async fn scan_skips_unrecognized_services() {
    let target = api_server("<html>Welcome to nginx!</html>").await;
    let port = target.address().port();

    let registry = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&registry)
        .await;

    let cfg = config(format!("{}/rest/ip/{{ip}}", registry.uri()));
    let (summary, findings) = run_scan(&cfg, "127.0.0.1/32", vec![port]).await;

    assert_eq!(summary.completed, 1);
    assert!(findings.is_empty());
}

/// Every (address, port) pair of the block gets its own pipeline.
#[tokio::test]
async fn scan_covers_whole_block() {
    let target = api_server(API_VERSIONS).await;
    let port = target.address().port();

    // Only 127.0.0.1 listens; the other three addresses of the /30 are refused.
    let cfg = config("http://127.0.0.1:9/rest/ip/{ip}".to_string());
    let (summary, findings) = run_scan(&cfg, "127.0.0.0/30", vec![port, port]).await;

    assert_eq!(summary.completed, 8);
    assert!(findings.iter().all(|f| f.port == port));
    assert!(findings.iter().any(|f| f.addr.to_string() == "127.0.0.1"));
}

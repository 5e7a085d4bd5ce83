#![cfg(test)]
use std::net::IpAddr;
use std::time::Duration;

use k8scan_core::registry::{ArinRegistry, OwnershipRegistry};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(server: &MockServer) -> ArinRegistry {
    ArinRegistry::new(format!("{}/rest/ip/{{ip}}", server.uri()), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn lookup_decodes_org_ref() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/ip/203.0.113.9"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "net": {
                "orgRef": {
                    "@handle": "EXMPL",
                    "@name": "Example Corp",
                    "$": "https://whois.arin.net/rest/org/EXMPL"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ip: IpAddr = "203.0.113.9".parse().unwrap();
    let info = registry(&server).lookup(ip).await.unwrap();

    assert_eq!(info.handle, "EXMPL");
    assert_eq!(info.name, "Example Corp");
    assert_eq!(info.reference, "https://whois.arin.net/rest/org/EXMPL");
}

#[tokio::test]
async fn lookup_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ip: IpAddr = "203.0.113.9".parse().unwrap();
    assert!(registry(&server).lookup(ip).await.is_err());
}

#[tokio::test]
async fn lookup_fails_on_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let ip: IpAddr = "203.0.113.9".parse().unwrap();
    assert!(registry(&server).lookup(ip).await.is_err());
}

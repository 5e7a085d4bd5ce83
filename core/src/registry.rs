//! # Ownership Registry
//!
//! Best-effort enrichment of a finding with the organization that holds the
//! address, looked up in the ARIN Whois-RWS database.

use std::net::IpAddr;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use k8scan_common::finding::OwnershipInfo;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

/// Resolves ownership metadata for an address.
#[async_trait]
pub trait OwnershipRegistry: Send + Sync {
    async fn lookup(&self, addr: IpAddr) -> anyhow::Result<OwnershipInfo>;
}

#[derive(Debug, Default, Deserialize)]
struct ArinResponse {
    net: Option<ArinNet>,
}

#[derive(Debug, Default, Deserialize)]
struct ArinNet {
    #[serde(rename = "orgRef")]
    org_ref: Option<ArinOrgRef>,
}

#[derive(Debug, Default, Deserialize)]
struct ArinOrgRef {
    #[serde(rename = "@handle", default)]
    handle: String,
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "$", default)]
    reference: String,
}

impl From<ArinResponse> for OwnershipInfo {
    fn from(response: ArinResponse) -> Self {
        let org = response.net.and_then(|net| net.org_ref).unwrap_or_default();
        OwnershipInfo {
            handle: org.handle,
            name: org.name,
            reference: org.reference,
        }
    }
}

/// ARIN REST client. `endpoint` holds an `{ip}` placeholder.
pub struct ArinRegistry {
    client: Client,
    endpoint: String,
}

impl ArinRegistry {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create registry client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn url_for(&self, addr: IpAddr) -> String {
        self.endpoint.replace("{ip}", &addr.to_string())
    }
}

#[async_trait]
impl OwnershipRegistry for ArinRegistry {
    async fn lookup(&self, addr: IpAddr) -> anyhow::Result<OwnershipInfo> {
        let url = self.url_for(addr);
        let response: ArinResponse = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("decoding registry response for {addr}"))?;

        Ok(response.into())
    }
}

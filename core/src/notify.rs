//! # Finding Notifications
//!
//! Sends an email for each finding through the Mailgun messages API.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use k8scan_common::config::MailgunConfig;
use k8scan_common::finding::Finding;
use reqwest::Client;

pub const EMAIL_SENDER: &str = "k8scan@jessfraz.com";
const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";
const UNIX_DATE: &str = "%a %b %e %H:%M:%S %Z %Y";

/// Delivers a finding to an operator.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, finding: &Finding) -> anyhow::Result<()>;
}

pub struct MailgunNotifier {
    client: Client,
    config: MailgunConfig,
    api_base: String,
}

impl MailgunNotifier {
    pub fn new(config: MailgunConfig, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create Mailgun client")?;

        Ok(Self {
            client,
            config,
            api_base: MAILGUN_API_BASE.to_string(),
        })
    }

    /// Points the notifier at another API root, e.g. the EU region.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

pub fn subject(finding: &Finding) -> String {
    format!("[k8scan]: found dashboard {}", finding.uri)
}

/// Plain-text message body. `sent_at` is rendered in the sender's local zone by the notifier.
pub fn body<Tz>(finding: &Finding, sent_at: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "Time: {}\n\nIP: {}\nURL: {}\n\nARIN: {}\n\t  {}\n\t  {}\n",
        sent_at.format(UNIX_DATE),
        finding.socket_addr(),
        finding.uri,
        finding.owner.handle,
        finding.owner.name,
        finding.owner.reference,
    )
}

#[async_trait]
impl Notifier for MailgunNotifier {
    async fn notify(&self, finding: &Finding) -> anyhow::Result<()> {
        let url = format!("{}/{}/messages", self.api_base, self.config.domain);
        let from = format!("{EMAIL_SENDER} <{EMAIL_SENDER}>");
        let subject = subject(finding);
        let text = body(finding, Local::now());

        let form = [
            ("from", from.as_str()),
            ("to", self.config.recipient.as_str()),
            ("subject", subject.as_str()),
            ("text", text.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth("api", Some(&self.config.api_key))
            .form(&form)
            .send()
            .await
            .context("sending Mailgun message failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("sending Mailgun message failed: response: {status} {detail}");
        }

        Ok(())
    }
}

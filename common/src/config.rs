//! Run configuration, built once from the command line and shared read-only.

use std::time::Duration;

pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONCURRENCY: usize = 1024;
pub const DEFAULT_CIDR: &str = "0.0.0.0/0";
pub const ARIN_ENDPOINT: &str = "http://whois.arin.net/rest/ip/{ip}";

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Bound on the TCP connect used as the reachability gate.
    pub ping_timeout: Duration,
    /// Bound on each HTTP request, signature probes and registry lookups alike.
    pub http_timeout: Duration,
    /// Maximum number of in-flight target pipelines. `None` is unbounded.
    pub concurrency: Option<usize>,
    /// Registry lookup URL, `{ip}` is replaced by the address.
    pub lookup_endpoint: String,
    pub mailgun: Option<MailgunConfig>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ping_timeout: DEFAULT_PING_TIMEOUT,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            concurrency: Some(DEFAULT_CONCURRENCY),
            lookup_endpoint: ARIN_ENDPOINT.to_string(),
            mailgun: None,
        }
    }
}

/// Credentials for email notifications through Mailgun.
#[derive(Clone)]
pub struct MailgunConfig {
    pub domain: String,
    pub api_key: String,
    pub recipient: String,
}

impl MailgunConfig {
    /// Notifications are only enabled when every field is set.
    pub fn from_parts(domain: String, api_key: String, recipient: String) -> Option<Self> {
        if domain.is_empty() || api_key.is_empty() || recipient.is_empty() {
            return None;
        }
        Some(Self {
            domain,
            api_key,
            recipient,
        })
    }
}

impl std::fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("domain", &self.domain)
            .field("api_key", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

pub mod scan;

use std::time::Duration;

use clap::Parser;
use k8scan_common::config::{
    ARIN_ENDPOINT, DEFAULT_CIDR, DEFAULT_CONCURRENCY, MailgunConfig, ScanConfig,
};
use k8scan_common::network::ports::PortSet;
use k8scan_common::network::range::NetworkBlock;

#[derive(Parser, Debug)]
#[command(name = "k8scan")]
#[command(version)]
#[command(about = "Scan a network block for exposed Kubernetes dashboards and API servers.")]
pub struct CommandLine {
    /// Timeout for checking that the port is open
    #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
    pub timeout_ping: Duration,

    /// Timeout for getting the contents of the URL
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub timeout_get: Duration,

    /// IP CIDR to scan
    #[arg(long, default_value = DEFAULT_CIDR)]
    pub cidr: String,

    /// Ports to scan (ex. 80-443 or 80,443,8080 or 1-20,22,80-443) [default: 80,443,8001,9001]
    #[arg(long)]
    pub ports: Option<String>,

    /// Maximum number of targets probed at once, 0 for no limit
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Registry lookup URL, {ip} is replaced by the address
    #[arg(long, default_value = ARIN_ENDPOINT)]
    pub arin_endpoint: String,

    /// Mailgun API Key to use for sending email (optional)
    #[arg(long, default_value = "")]
    pub mailgun_api_key: String,

    /// Mailgun Domain to use for sending email (optional)
    #[arg(long, default_value = "")]
    pub mailgun_domain: String,

    /// Recipient for email notifications (optional)
    #[arg(long, default_value = "")]
    pub email_recipient: String,

    /// Run in debug mode
    #[arg(short, long)]
    pub debug: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolves the raw flags into the scan inputs. Any error here is fatal.
    pub fn resolve(&self) -> anyhow::Result<(NetworkBlock, PortSet, ScanConfig)> {
        let block: NetworkBlock = self.cidr.parse()?;
        let ports: PortSet = self.ports.as_deref().unwrap_or_default().parse()?;

        let config = ScanConfig {
            ping_timeout: self.timeout_ping,
            http_timeout: self.timeout_get,
            concurrency: (self.concurrency > 0).then_some(self.concurrency),
            lookup_endpoint: self.arin_endpoint.clone(),
            mailgun: MailgunConfig::from_parts(
                self.mailgun_domain.clone(),
                self.mailgun_api_key.clone(),
                self.email_recipient.clone(),
            ),
        };

        Ok((block, ports, config))
    }
}

use k8scan_common::config::ScanConfig;
use k8scan_common::network::ports::PortSet;
use k8scan_common::network::range::NetworkBlock;
use k8scan_common::network::target;
use k8scan_core::scanner::ScanService;
use tokio::sync::mpsc;
use tracing::info;

use crate::terminal::{print, spinner};

pub async fn scan(block: NetworkBlock, ports: PortSet, cfg: &ScanConfig) -> anyhow::Result<()> {
    info!("Scanning for Kubernetes Dashboards and API Servers on {block} over ports {ports}");
    if let Some(mailgun) = &cfg.mailgun {
        info!(
            "Using Mailgun Domain {} to send emails to {}",
            mailgun.domain, mailgun.recipient
        );
    }
    info!("This may take a bit...");

    let total = target::target_count(&block, &ports);
    let service = ScanService::from_config(cfg)?.on_progress(Box::new(move |done| {
        spinner::report_scan_progress(done, total);
    }));

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print::findings(rx));

    let summary = service.scan(&block, &ports, tx).await;
    let found = printer.await?;

    spinner::get_spinner().finish_and_clear();
    info!("Scan took: {:.2?}", summary.elapsed);
    info!(
        "{found} {} across {} targets",
        if found == 1 { "finding" } else { "findings" },
        summary.completed
    );

    Ok(())
}

//! # Scan Dispatcher
//!
//! Crosses a [`NetworkBlock`] with a [`PortSet`] and runs one independent
//! pipeline per target:
//!
//! 1. **Reachability**: a bare TCP connect gates everything else.
//! 2. **Signature**: HTTP probing classifies the endpoint.
//! 3. **Enrichment**: registry lookup, best effort.
//! 4. **Emission**: the finding is sent to the caller, then to the notifier.
//!
//! Pipelines share nothing but the completion counter. In-flight pipelines
//! are capped by a semaphore whose permit is taken *before* spawning, so the
//! enumeration never runs ahead of the bound.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use k8scan_common::config::ScanConfig;
use k8scan_common::finding::{Finding, OwnershipInfo};
use k8scan_common::network::ports::PortSet;
use k8scan_common::network::range::NetworkBlock;
use k8scan_common::network::target::{self, Target};
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, warn};

use crate::network::http::InsecureClient;
use crate::network::tcp;
use crate::notify::{MailgunNotifier, Notifier};
use crate::registry::{ArinRegistry, OwnershipRegistry};
use crate::signature::SignatureProber;

pub type ProgressCallback = Box<dyn Fn(u64) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Pipelines that ran to completion.
    pub completed: u64,
    pub elapsed: Duration,
}

/// Everything one target's pipeline needs. Shared read-only across tasks.
struct Pipeline {
    ping_timeout: Duration,
    prober: SignatureProber,
    registry: Box<dyn OwnershipRegistry>,
    notifier: Option<Box<dyn Notifier>>,
}

impl Pipeline {
    async fn run(&self, target: Target, findings: &mpsc::UnboundedSender<Finding>) {
        let addr = target.socket_addr();

        if !tcp::port_open(addr, self.ping_timeout).await {
            return;
        }

        let Some(uri) = self.prober.classify(addr).await.into_uri() else {
            return;
        };

        let owner = match self.registry.lookup(target.addr).await {
            Ok(owner) => owner,
            Err(e) => {
                warn!("ip info err for {}: {e:#}", target.addr);
                OwnershipInfo::default()
            }
        };

        let finding = Finding::new(target.addr, target.port, uri, owner);
        if findings.send(finding.clone()).is_err() {
            debug!("finding receiver closed, dropping {target}");
        }

        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.notify(&finding).await {
                warn!("{e:#}");
            }
        }
    }
}

/// Application service running a full scan.
pub struct ScanService {
    pipeline: Arc<Pipeline>,
    concurrency: Option<usize>,
    on_progress: Option<Arc<dyn Fn(u64) + Send + Sync>>,
}

impl ScanService {
    pub fn new(
        config: &ScanConfig,
        prober: SignatureProber,
        registry: Box<dyn OwnershipRegistry>,
        notifier: Option<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            pipeline: Arc::new(Pipeline {
                ping_timeout: config.ping_timeout,
                prober,
                registry,
                notifier,
            }),
            concurrency: config.concurrency,
            on_progress: None,
        }
    }

    /// Wires the HTTP prober, ARIN registry and (if configured) Mailgun notifier.
    pub fn from_config(config: &ScanConfig) -> anyhow::Result<Self> {
        let prober = SignatureProber::new(Box::new(InsecureClient::new(config.http_timeout)?));
        let registry = ArinRegistry::new(config.lookup_endpoint.clone(), config.http_timeout)?;
        let notifier: Option<Box<dyn Notifier>> = match &config.mailgun {
            Some(mailgun) => Some(Box::new(MailgunNotifier::new(
                mailgun.clone(),
                config.http_timeout,
            )?)),
            None => None,
        };

        Ok(Self::new(config, prober, Box::new(registry), notifier))
    }

    /// Called with the completion count each time a pipeline finishes.
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(Arc::from(callback));
        self
    }

    /// Scans every target and returns once all pipelines have finished.
    ///
    /// Findings are sent on `findings` as soon as they are confirmed, in no
    /// particular order.
    pub async fn scan(
        &self,
        block: &NetworkBlock,
        ports: &PortSet,
        findings: mpsc::UnboundedSender<Finding>,
    ) -> ScanSummary {
        let started = Instant::now();
        let completed = Arc::new(AtomicU64::new(0));
        let gate = self.concurrency.map(|limit| Arc::new(Semaphore::new(limit.max(1))));
        let mut pipelines: JoinSet<()> = JoinSet::new();

        for target in target::targets(block, ports) {
            let permit = match &gate {
                Some(gate) => match Arc::clone(gate).acquire_owned().await {
                    Ok(permit) => Some(permit),
                    Err(_closed) => break,
                },
                None => None,
            };

            let pipeline = Arc::clone(&self.pipeline);
            let completed = Arc::clone(&completed);
            let on_progress = self.on_progress.clone();
            let findings = findings.clone();

            pipelines.spawn(async move {
                pipeline.run(target, &findings).await;
                drop(permit);

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(callback) = on_progress {
                    callback(done);
                }
            });

            while let Some(result) = pipelines.try_join_next() {
                report_join(result);
            }
        }

        while let Some(result) = pipelines.join_next().await {
            report_join(result);
        }

        ScanSummary {
            completed: completed.load(Ordering::Relaxed),
            elapsed: started.elapsed(),
        }
    }
}

fn report_join(result: Result<(), JoinError>) {
    if let Err(e) = result {
        error!("scan pipeline aborted: {e}");
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

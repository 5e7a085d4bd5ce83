use std::io::{self, Write};

use colored::*;
use k8scan_common::finding::Finding;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use crate::terminal::spinner;

pub const TOTAL_WIDTH: usize = 64;

/// Logs the startup banner, e.g. `───⟦ K8SCAN v0.1.0 ⟧───`. Only the tool name is upper-cased.
pub fn header(name: &str, version: &str) {
    let title = format!("⟦ {} v{} ⟧", name.to_uppercase(), version);
    let (left, right) = padding(&title);

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        title.bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    info!("{}", line);
}

/// Dashes on each side of `title` so the banner spans `TOTAL_WIDTH` columns.
fn padding(title: &str) -> (usize, usize) {
    let dash_count = TOTAL_WIDTH.saturating_sub(title.chars().count());
    let left = dash_count / 2;
    (left, dash_count - left)
}

/// Drains the finding channel to stdout and returns how many findings were printed.
///
/// This task is the only stdout writer, so lines from concurrent pipelines never interleave.
pub async fn findings(rx: UnboundedReceiver<Finding>) -> usize {
    let mut out = io::stdout();
    write_findings(rx, &mut out).await
}

pub async fn write_findings<W: Write>(mut rx: UnboundedReceiver<Finding>, out: &mut W) -> usize {
    let mut count: usize = 0;
    while let Some(finding) = rx.recv().await {
        let written = spinner::get_spinner().suspend(|| write_finding(out, &finding));
        if let Err(e) = written {
            warn!("writing finding {} failed: {e}", finding.socket_addr());
        }
        count += 1;
    }
    count
}

/// Writes one finding as a single `write_all` so the line reaches `out` whole.
pub fn write_finding<W: Write>(out: &mut W, finding: &Finding) -> io::Result<()> {
    let line = format!("{finding}\n");
    out.write_all(line.as_bytes())?;
    out.flush()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

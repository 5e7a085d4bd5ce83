use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Completions between two spinner message refreshes.
const PROGRESS_STRIDE: u64 = 64;

pub(crate) static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

pub fn get_spinner() -> &'static ProgressBar {
    SPINNER.get_or_init(init_spinner)
}

fn init_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn report_scan_progress(done: u64, total: u128) {
    if done % PROGRESS_STRIDE != 0 && u128::from(done) != total {
        return;
    }

    get_spinner().set_message(format!(
        "Probed {} of {} targets...",
        done.to_string().green().bold(),
        total
    ));
}

/// Log sink that prints above the spinner instead of tearing through it.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let spinner = get_spinner();
        if spinner.is_hidden() {
            // A hidden bar swallows println, so write straight to stderr.
            return std::io::stderr().lock().write(buf);
        }

        let msg = String::from_utf8_lossy(buf);
        spinner.println(msg.trim_end());
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

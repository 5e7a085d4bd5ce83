use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::spinner::SpinnerWriter;

/// Prefixes each event with a colored status symbol; debug events also carry their module.
pub struct K8scanFormatter;

impl<S, N> FormatEvent<S, N> for K8scanFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        // Per-target failures come from several core modules; name the source in debug output.
        if *meta.level() >= Level::DEBUG {
            write!(writer, "{} ", short_target(meta.target()).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// `k8scan_core::network::tcp` becomes `network::tcp`.
fn short_target(target: &str) -> &str {
    target
        .split_once("::")
        .filter(|(krate, _)| krate.starts_with("k8scan"))
        .map_or(target, |(_, module)| module)
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `debug`.
///
/// Dependencies stay at `warn` so `-d` only raises the scanner's own output.
pub fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,k8scan={level},k8scan_core={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(K8scanFormatter)
        .with_writer(|| SpinnerWriter)
        .init();
}

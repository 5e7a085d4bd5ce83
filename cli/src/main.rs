mod commands;
mod signals;
mod terminal;

use commands::{CommandLine, scan};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.debug);
    signals::exit_on_signal();

    let (block, ports, cfg) = match commands.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    };

    print::header("k8scan", env!("CARGO_PKG_VERSION"));
    scan::scan(block, ports, &cfg).await
}

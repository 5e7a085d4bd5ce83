//! Operator interrupts end the process at once. In-flight pipelines are not
//! drained and the exit status stays 0.

use tracing::{info, warn};

use crate::terminal::spinner;

pub fn exit_on_signal() {
    tokio::spawn(async {
        let name = wait_for_signal().await;
        spinner::get_spinner().finish_and_clear();
        info!("Received {name}, exiting.");
        std::process::exit(0);
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("cannot listen for SIGTERM: {e}");
            return interrupt().await;
        }
    };

    tokio::select! {
        name = interrupt() => name,
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    interrupt().await
}

async fn interrupt() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for interrupts: {e}");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

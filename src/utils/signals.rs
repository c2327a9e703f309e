//! Signal handling for graceful shutdown

use anyhow::{anyhow, Result};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tracing::info;

/// Resolve with the number of the first SIGTERM or SIGINT received
pub async fn shutdown_signal() -> Result<i32> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;
    let handle = signals.handle();

    let signal = signals
        .next()
        .await
        .ok_or_else(|| anyhow!("signal stream closed before a signal arrived"))?;
    info!("Received signal: {}", signal);

    handle.close();
    Ok(signal)
}

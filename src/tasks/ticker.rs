//! Periodic tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that advances every timer on a fixed cadence.
///
/// Each tick passes the time actually measured since the previous one, so a
/// stalled runtime catches up instead of losing the missed seconds.
pub async fn ticker_task(state: Arc<AppState>, period: Duration) {
    info!("Starting ticker task with period {:?}", period);

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately
    interval.tick().await;
    let mut last_tick = Instant::now();

    loop {
        interval.tick().await;

        let now = Instant::now();
        let elapsed = now.duration_since(last_tick);
        last_tick = now;

        match state.tick(elapsed) {
            Ok(finished) => {
                debug!("Advanced timers by {:?}", elapsed);
                for timer in finished {
                    info!("Timer {} \"{}\" finished", timer.id, timer.name);
                }
            }
            Err(e) => {
                error!("Failed to advance timers: {}", e);
            }
        }
    }
}

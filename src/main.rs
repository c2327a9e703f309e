//! Named Timers - several named 40 minute countdowns behind a local HTTP API
//!
//! This is the main entry point for the named-timers application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use named_timers::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::ticker_task,
    timer::TIMER_DURATION,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("named_timers={},tower_http=info", config.log_level()))
        .init();

    info!("Starting named-timers v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={:?}, timer={}min",
          config.host, config.port, config.tick_period(), TIMER_DURATION.as_secs() / 60);

    // The one timer list for this process
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the ticker background task
    let ticker_state = Arc::clone(&state);
    let period = config.tick_period();
    tokio::spawn(async move {
        ticker_task(ticker_state, period).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timers            - List timers (?order=insertion|active_first|name)");
    info!("  POST   /timers            - Create a timer {{\"name\": ...}}");
    info!("  GET    /timers/:id        - Show one timer");
    info!("  POST   /timers/:id/pause  - Pause a timer");
    info!("  POST   /timers/:id/resume - Resume a timer");
    info!("  POST   /timers/:id/toggle - Pause or resume a timer");
    info!("  DELETE /timers/:id        - Delete a timer (?confirm=true if unfinished)");
    info!("  POST   /clear-finished    - Remove finished timers");
    info!("  GET    /status            - Active and finished counts");
    info!("  GET    /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

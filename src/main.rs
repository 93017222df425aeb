//! Study Clock - A state-managed HTTP server hosting a time-display widget
//!
//! This is the main entry point for the study-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use study_clock::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::TokioScheduler,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, timer={}min, alert_command={:?}",
          config.host, config.port, config.timer, config.alert_command);

    let notifier = config.alert_notifier()?;

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_seconds(),
        TokioScheduler::shared(),
        notifier,
    ));

    // The clock ticks for the lifetime of the server
    state.start_clock();

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /clock                 - Current time of day");
    info!("  GET    /stopwatch             - Stopwatch state");
    info!("  POST   /stopwatch/<action>    - start, stop, reset");
    info!("  GET    /timer                 - Countdown state");
    info!("  POST   /timer/<action>        - edit, set, cancel, start, pause, stop, reset");
    info!("  POST   /section/<name>        - Show clock, stopwatch or timer");
    info!("  GET    /stream/<name>         - Display updates as server-sent events");
    info!("  DELETE /warnings              - Dismiss warnings");
    info!("  GET    /status                - Full widget status");
    info!("  GET    /health                - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

//! Work Timer - a countdown work timer served over HTTP
//!
//! This is the main entry point for the work-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use work_timer::{
    api::create_router,
    config::Config,
    settings::JsonFileStore,
    state::AppState,
    tasks::{timer_driver_task, TimerDriver},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("work_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting work-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, settings={}",
          config.host, config.port, config.settings.display());

    // Load settings and the timer, autostarting if configured
    let store = JsonFileStore::open(&config.settings)?;
    let (driver, commands, snapshots) = TimerDriver::new(Box::new(store))?;

    let driver_task = tokio::spawn(timer_driver_task(driver));

    let state = Arc::new(AppState::new(config.port, config.host.clone(), commands, snapshots));
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start    - Start the countdown");
    info!("  POST /pause    - Pause or resume");
    info!("  POST /reset    - Reset to the configured duration");
    info!("  GET  /status   - Current time, phase and display");
    info!("  GET  /settings - Read settings");
    info!("  POST /settings - Commit or cancel settings");
    info!("  GET  /health   - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            if let Err(e) = result {
                tracing::error!("Signal handler error: {}", e);
            }
            info!("Shutdown signal received");
        }
    }

    // Unload the timer so no activity outlives the display
    state.shutdown().await;
    driver_task.await?;

    info!("Server shutdown complete");
    Ok(())
}

//! Subathon Timer - countdown server for stream subathons
//!
//! This is the main entry point for the subathon-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};
use tracing::info;

use subathon_timer::{
    config::Config,
    state::{AppState, SubathonTimer},
    api::create_router,
    tasks::overlay_updater_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("subathon_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting subathon-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, initial={}min, overlay={}",
          config.host, config.port, config.initial_minutes, config.overlay_path.display());

    let timer = Arc::new(SubathonTimer::new(config.initial_minutes, config.overlay_file()));
    let state = Arc::new(AppState::new(
        Arc::clone(&timer),
        config.minutes_policy(),
        config.port,
        config.host.clone(),
    ));

    // Start the overlay updater background task
    let (stop_tx, stop_rx) = watch::channel(false);
    let updater = tokio::spawn(overlay_updater_task(
        Arc::clone(&timer),
        config.tick_period(),
        stop_rx,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/time  - Remaining time as JSON");
    info!("  GET  /overlay   - Remaining time as plain text");
    info!("  POST /add_time  - Add minutes");
    info!("  POST /set_time  - Set remaining minutes");
    info!("  POST /pause     - Pause the countdown");
    info!("  POST /resume    - Resume the countdown");
    info!("  POST /webhook   - Streamlabs donations");
    info!("  POST /twitch    - Twitch EventSub");
    info!("  GET  /status    - Timer and server status");
    info!("  GET  /health    - Health check");

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

    // Stop the updater and leave the final value on disk
    let _ = stop_tx.send(true);
    if let Err(e) = updater.await {
        tracing::error!("Overlay updater task failed: {}", e);
    }
    timer.save_to_file();

    info!("Server shutdown complete");
    Ok(())
}

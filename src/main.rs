//! ==============================================================================
//! main.rs - sensor sink entry point
//! ==============================================================================
//!
//! purpose:
//!     a field device (esp32 or similar) posts a JSON reading every few
//!     seconds. this binary keeps the latest one plus a short history in
//!     memory and serves them back to a browser.
//!
//! responsibilities:
//!     - load configuration (config/sink.toml, or defaults)
//!     - initialise tracing
//!     - create the store and the router
//!     - serve on 0.0.0.0:5003 until ctrl-c
//!
//! architecture:
//!
//!     ┌──────────┐  POST /api/data   ┌────────────────────────────────┐
//!     │  device  │ ────────────────> │  rust sink (this binary)       │
//!     └──────────┘                   │  ┌──────────┐   ┌───────────┐  │
//!                                    │  │ handlers │──>│   store   │  │
//!     ┌──────────┐  GET /, /api/data │  └──────────┘   │ (mutex)   │  │
//!     │ browser  │ <──────────────── │                 └───────────┘  │
//!     └──────────┘   (2s polling)    └────────────────────────────────┘
//!
//! nothing is persisted. a restart starts from an empty store.
//!
//! ==============================================================================

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sensor_sink::{build_router, serve, SensorStore, SinkConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // startup banner
    println!("===========================================================");
    println!("  Sensor Sink");
    println!("  latest reading + recent history, in memory");
    println!("===========================================================");

    // step 1: load configuration
    let config = SinkConfig::load_or_default();
    config.print_summary();

    // step 2: logging (RUST_LOG wins over the config file)
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // step 3: shared state
    let store = Arc::new(SensorStore::with_capacity(config.history.capacity));
    let app = build_router(store, config.server.request_timeout());

    // step 4: bind and serve
    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    println!("[STARTUP] ✓ Dashboard live at http://{}", addr);
    tracing::info!(%addr, "sensor sink listening");

    serve(listener, app, shutdown_signal()).await?;

    tracing::info!("sensor sink stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

//! Index Dashboard - HTTP host for the interactive stock index page
//!
//! Entry point for the server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use index_dashboard_core::models::settings::Settings;
use index_dashboard_core::IndexDashboard;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod page;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env().context("invalid DASHBOARD_* configuration")?;

    // Initialize tracing; RUST_LOG wins over the debug toggle
    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let dashboard = Arc::new(
        IndexDashboard::with_yahoo(settings.clone()).context("failed to set up data provider")?,
    );

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_address))?;
    info!(
        address = %settings.bind_address,
        debug = settings.debug,
        "dashboard listening on http://{}",
        settings.bind_address
    );

    axum::serve(listener, routes::router(dashboard))
        .await
        .context("server failed")?;
    Ok(())
}

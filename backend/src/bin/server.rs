//! Gym Dashboard HTTP Server Binary
//!
//! Loads the configuration and the member exercise CSV, then serves the
//! dashboard REST API.
//!
//! # Usage
//!
//! ```bash
//! # Use ./dashboard.toml (or defaults)
//! cargo run --bin gym-server
//!
//! # Explicit configuration file
//! cargo run --bin gym-server -- path/to/dashboard.toml
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `GYM_DATA_PATH`: Member exercise CSV (default: data/gym_members_exercise_tracking_cleaned.csv)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gym_dashboard::config::DashboardConfig;
use gym_dashboard::db::{self, SessionRepository};
use gym_dashboard::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Gym Dashboard HTTP Server");

    let config = match env::args().nth(1) {
        Some(path) => DashboardConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => DashboardConfig::from_default_location()?,
    }
    .apply_env_overrides()?;

    // The data file is loaded exactly once; a bad file stops the server here.
    let repository = db::open_repository(&config.data).context("Failed to load session data")?;
    let dataset = repository.dataset_info().await?;
    info!(
        rows = dataset.row_count,
        workout_types = ?dataset.workout_types,
        checksum = %dataset.checksum,
        "Session data loaded from {}",
        dataset.source
    );

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;

    let state = AppState::new(repository, config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

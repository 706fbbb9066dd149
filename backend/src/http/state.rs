//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::db::SessionRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only session store
    pub repository: Arc<dyn SessionRepository>,
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(repository: Arc<dyn SessionRepository>, config: DashboardConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }
}

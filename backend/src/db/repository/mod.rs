//! Repository trait for read-only access to the loaded session data.

pub mod error;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::SessionTable;

/// Provenance of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Where the rows came from (file path, or "memory")
    pub source: String,
    pub row_count: usize,
    /// SHA-256 of the raw file bytes
    pub checksum: String,
    pub workout_types: Vec<String>,
}

/// Read-only access to member sessions.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across request handlers.
/// No method mutates the underlying table.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Shared handle to the full, immutable session table.
    async fn sessions(&self) -> RepositoryResult<Arc<SessionTable>>;

    /// Distinct workout types observed in the data, first-seen order.
    async fn workout_types(&self) -> RepositoryResult<Vec<String>>;

    async fn dataset_info(&self) -> RepositoryResult<DatasetInfo>;

    /// Check that the store is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

//! In-memory session repository.
//!
//! Holds the table parsed at startup behind an `Arc`; every request reads the
//! same immutable data and no method takes a lock.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::db::checksum::calculate_checksum;
use crate::db::loader::{load_sessions_from_path, LoadedSessions};
use crate::db::repository::{DatasetInfo, RepositoryResult, SessionRepository};
use crate::models::{MemberSession, SessionTable};

/// Session store backed by an immutable in-memory table.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    table: Arc<SessionTable>,
    source: String,
    checksum: String,
}

impl LocalRepository {
    /// Load the data file at `path`. Any load error is fatal for the caller.
    pub fn from_path(path: &Path) -> RepositoryResult<Self> {
        let LoadedSessions {
            table,
            source,
            checksum,
        } = load_sessions_from_path(path)?;
        Ok(Self {
            table: Arc::new(table),
            source,
            checksum,
        })
    }

    /// Wrap rows already in memory, e.g. test fixtures.
    pub fn from_sessions(sessions: Vec<MemberSession>) -> Self {
        let fingerprint = serde_json::to_vec(&sessions).unwrap_or_default();
        Self {
            table: Arc::new(SessionTable::new(sessions)),
            source: "memory".to_string(),
            checksum: calculate_checksum(&fingerprint),
        }
    }

    pub fn table(&self) -> &Arc<SessionTable> {
        &self.table
    }
}

#[async_trait]
impl SessionRepository for LocalRepository {
    async fn sessions(&self) -> RepositoryResult<Arc<SessionTable>> {
        Ok(Arc::clone(&self.table))
    }

    async fn workout_types(&self) -> RepositoryResult<Vec<String>> {
        Ok(self.table.workout_types().to_vec())
    }

    async fn dataset_info(&self) -> RepositoryResult<DatasetInfo> {
        Ok(DatasetInfo {
            source: self.source.clone(),
            row_count: self.table.len(),
            checksum: self.checksum.clone(),
            workout_types: self.table.workout_types().to_vec(),
        })
    }

    /// A header-only data file loads fine but leaves every panel empty.
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.table.is_empty())
    }
}

//! Session data storage.
//!
//! The data file is parsed once at startup into an immutable table that all
//! request handlers share through the [`SessionRepository`] trait.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  HTTP handlers / services                    │
//! └───────────────────┬──────────────────────────┘
//!                     │ Arc<dyn SessionRepository>
//! ┌───────────────────▼──────────────────────────┐
//! │  LocalRepository (Arc<SessionTable>)         │
//! └───────────────────┬──────────────────────────┘
//!                     │ load once
//! ┌───────────────────▼──────────────────────────┐
//! │  loader (CSV → MemberSession rows)           │
//! └──────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod loader;
pub mod repositories;
pub mod repository;

use std::sync::Arc;

pub use checksum::calculate_checksum;
pub use repositories::LocalRepository;
pub use repository::{
    DatasetInfo, ErrorContext, RepositoryError, RepositoryResult, SessionRepository,
};

use crate::config::DataSettings;

/// Load the configured data file into a shareable repository.
pub fn open_repository(settings: &DataSettings) -> RepositoryResult<Arc<dyn SessionRepository>> {
    if settings.path.as_os_str().is_empty() {
        return Err(RepositoryError::configuration("data.path is empty"));
    }
    let repo = LocalRepository::from_path(&settings.path)
        .map_err(|e| e.with_operation("open_repository"))?;
    Ok(Arc::new(repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_repository_rejects_empty_path() {
        let settings = DataSettings {
            path: PathBuf::new(),
        };
        let err = open_repository(&settings).err().unwrap();
        assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
    }

    #[test]
    fn test_open_repository_missing_file() {
        let settings = DataSettings {
            path: PathBuf::from("/nonexistent/gym.csv"),
        };
        let err = open_repository(&settings).err().unwrap();
        assert_eq!(err.context().operation.as_deref(), Some("open_repository"));
    }
}

//! Core record store for student entries.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::{CsvStudentService, StoreConfig, StoreConfigBuilder, DEFAULT_DATA_FILE};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::student::{
    validate_field, Field, Student, StudentPatch, StudentValidationError,
};
pub use repo::student_repo::{
    RepoError, RepoResult, StorageStudentRepository, StudentRepository, UpdateReport,
};
pub use service::student_service::StudentService;
pub use storage::{CsvFileStorage, MemoryStorage, RecordStorage, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

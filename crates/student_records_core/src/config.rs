//! Store configuration.
//!
//! # Responsibility
//! - Hold the data file location and logging settings in one place.
//! - Build the storage-backed service callers actually use.

use crate::logging::default_log_level;
use crate::repo::student_repo::StorageStudentRepository;
use crate::service::student_service::StudentService;
use crate::storage::CsvFileStorage;
use std::path::PathBuf;

/// Default CSV file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "students.csv";

/// Service type backed by the CSV file storage.
pub type CsvStudentService = StudentService<StorageStudentRepository<CsvFileStorage>>;

/// Settings for one store instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// CSV file holding the record set.
    pub data_file: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Opens the CSV-backed service described by this config.
    ///
    /// Nothing touches the filesystem until the first operation runs.
    pub fn open_service(&self) -> CsvStudentService {
        StudentService::new(StorageStudentRepository::new(CsvFileStorage::new(
            self.data_file.clone(),
        )))
    }
}

/// Builder for `StoreConfig`.
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the CSV data file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Enable file logging under `dir`
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DATA_FILE};
    use crate::model::student::Student;
    use std::path::PathBuf;

    #[test]
    fn default_points_at_students_csv_without_file_logging() {
        let config = StoreConfig::default();
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = StoreConfig::builder()
            .data_file("/tmp/records.csv")
            .log_level("warn")
            .log_dir("/tmp/logs")
            .build();
        assert_eq!(config.data_file, PathBuf::from("/tmp/records.csv"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn open_service_uses_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.csv");
        let service = StoreConfig::builder().data_file(&path).build().open_service();

        service
            .register(&Student::new("1", "Ann Lee", "20", "ann@example.com", "1234567890"))
            .unwrap();
        assert!(path.exists());
    }
}

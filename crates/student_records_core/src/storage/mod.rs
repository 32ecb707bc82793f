//! Record set storage contracts and backends.
//!
//! # Responsibility
//! - Define the whole-set storage contract (`list_all`/`append`/`rewrite`).
//! - Keep file format details out of repository logic.
//!
//! # Invariants
//! - Missing storage is an empty record set, never an error, on read paths.
//! - `rewrite` replaces the entire persisted set; there is no partial update.
//! - Record order is preserved exactly as given to `append`/`rewrite`.

use crate::model::student::Student;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod csv_file;
mod memory;

pub use csv_file::CsvFileStorage;
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored record data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for StorageError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Whole-set persistence for student records.
pub trait RecordStorage {
    /// Reads every persisted record in stored order.
    fn list_all(&self) -> StorageResult<Vec<Student>>;
    /// Appends one record, creating storage (with header) when absent.
    fn append(&self, student: &Student) -> StorageResult<()>;
    /// Replaces the full persisted set with `students`.
    fn rewrite(&self, students: &[Student]) -> StorageResult<()>;
}

impl<S: RecordStorage + ?Sized> RecordStorage for &S {
    fn list_all(&self) -> StorageResult<Vec<Student>> {
        (**self).list_all()
    }

    fn append(&self, student: &Student) -> StorageResult<()> {
        (**self).append(student)
    }

    fn rewrite(&self, students: &[Student]) -> StorageResult<()> {
        (**self).rewrite(students)
    }
}

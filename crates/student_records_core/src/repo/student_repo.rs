//! Student repository contracts and the storage-backed record store.
//!
//! # Responsibility
//! - Provide CRUD over the student record set keyed by `RollNo`.
//! - Enforce field validation and key uniqueness before any write.
//!
//! # Invariants
//! - Write paths validate before touching storage.
//! - `RollNo` stays unique across the record set after every write.
//! - Not-found update/delete paths never rewrite storage.
//! - Rewrites keep the relative order of surviving records.

use crate::model::student::{Field, Student, StudentPatch, StudentValidationError};
use crate::storage::{RecordStorage, StorageError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student record operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    DuplicateRollNo(String),
    NotFound(String),
    Storage(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateRollNo(roll) => write!(f, "roll number already exists: {roll}"),
            Self::NotFound(roll) => write!(f, "student not found: {roll}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::DuplicateRollNo(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of a field-by-field update.
///
/// Rejected fields kept their previous value; the update itself still
/// succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub applied: Vec<Field>,
    pub rejected: Vec<Field>,
}

/// Repository interface for student record CRUD.
pub trait StudentRepository {
    fn register(&self, student: &Student) -> RepoResult<()>;
    fn check_field_input(&self, field: Field, value: &str) -> RepoResult<()>;
    fn list_all(&self) -> RepoResult<Vec<Student>>;
    fn find_by_roll(&self, roll: &str) -> RepoResult<Option<Student>>;
    fn update_by_roll(&self, roll: &str, patch: &StudentPatch) -> RepoResult<UpdateReport>;
    fn delete_by_roll(&self, roll: &str) -> RepoResult<()>;
}

/// Record store over any whole-set storage backend.
pub struct StorageStudentRepository<S: RecordStorage> {
    storage: S,
}

impl<S: RecordStorage> StorageStudentRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn ensure_unique_roll(existing: &[Student], roll: &str) -> RepoResult<()> {
        if existing.iter().any(|student| student.has_roll(roll)) {
            return Err(RepoError::DuplicateRollNo(roll.trim().to_string()));
        }
        Ok(())
    }
}

impl<S: RecordStorage> StudentRepository for StorageStudentRepository<S> {
    fn register(&self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        let existing = self.storage.list_all()?;
        if let Err(err) = Self::ensure_unique_roll(&existing, &student.roll_no) {
            warn!("event=student_register module=repo status=rejected reason=duplicate_roll");
            return Err(err);
        }

        self.storage.append(student)?;
        info!(
            "event=student_register module=repo status=ok total={}",
            existing.len() + 1
        );
        Ok(())
    }

    fn check_field_input(&self, field: Field, value: &str) -> RepoResult<()> {
        field.validate(value)?;
        if field == Field::RollNo {
            Self::ensure_unique_roll(&self.storage.list_all()?, value)?;
        }
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<Student>> {
        Ok(self.storage.list_all()?)
    }

    fn find_by_roll(&self, roll: &str) -> RepoResult<Option<Student>> {
        Ok(self
            .storage
            .list_all()?
            .into_iter()
            .find(|student| student.has_roll(roll)))
    }

    fn update_by_roll(&self, roll: &str, patch: &StudentPatch) -> RepoResult<UpdateReport> {
        let mut students = self.storage.list_all()?;
        let Some(index) = students.iter().position(|student| student.has_roll(roll)) else {
            info!("event=student_update module=repo status=not_found");
            return Err(RepoError::NotFound(roll.trim().to_string()));
        };

        if patch.is_empty() {
            debug!("event=student_update module=repo status=noop reason=empty_patch");
        }

        let mut report = UpdateReport::default();
        for field in Field::ALL {
            let Some(value) = patch.get(field).map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };

            // A new key must not collide with any other record.
            let collides = field == Field::RollNo
                && students
                    .iter()
                    .enumerate()
                    .any(|(other, student)| other != index && student.has_roll(value));

            if field.validate(value).is_ok() && !collides {
                students[index].set(field, value);
                report.applied.push(field);
            } else {
                report.rejected.push(field);
            }
        }

        self.storage.rewrite(&students)?;
        info!(
            "event=student_update module=repo status=ok applied={} rejected={}",
            report.applied.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    fn delete_by_roll(&self, roll: &str) -> RepoResult<()> {
        let students = self.storage.list_all()?;
        let before = students.len();
        let survivors: Vec<Student> = students
            .into_iter()
            .filter(|student| !student.has_roll(roll))
            .collect();

        if survivors.len() == before {
            info!("event=student_delete module=repo status=not_found");
            return Err(RepoError::NotFound(roll.trim().to_string()));
        }

        self.storage.rewrite(&survivors)?;
        info!(
            "event=student_delete module=repo status=ok removed={} remaining={}",
            before - survivors.len(),
            survivors.len()
        );
        Ok(())
    }
}

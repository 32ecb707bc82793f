//! Student use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Accept raw `(column name, value)` input and map it onto typed records.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::student::{Field, Student, StudentPatch};
use crate::repo::student_repo::{RepoResult, StudentRepository, UpdateReport};

/// Use-case service wrapper for student record operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a fully populated record.
    ///
    /// Returns validation or duplicate-key errors unchanged.
    pub fn register(&self, student: &Student) -> RepoResult<()> {
        self.repo.register(student)
    }

    /// Registers a record from raw `(column name, value)` pairs.
    ///
    /// # Contract
    /// - Values are trimmed before validation.
    /// - Unknown column names are ignored; missing columns fail validation
    ///   for every field that has a rule.
    pub fn register_fields<'a, I>(&self, fields: I) -> RepoResult<Student>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let student =
            Student::from_fields(fields.into_iter().map(|(name, value)| (name, value.trim())));
        self.repo.register(&student)?;
        Ok(student)
    }

    /// Checks one interactive input before the caller moves to the next field.
    pub fn check_field_input(&self, field: Field, value: &str) -> RepoResult<()> {
        self.repo.check_field_input(field, value)
    }

    /// Lists every record in stored order.
    pub fn list_all(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_all()
    }

    /// Finds the first record whose `RollNo` matches, ignoring whitespace.
    pub fn find_by_roll(&self, roll: &str) -> RepoResult<Option<Student>> {
        self.repo.find_by_roll(roll)
    }

    /// Applies a per-field patch to the record keyed by `roll`.
    pub fn update_by_roll(&self, roll: &str, patch: &StudentPatch) -> RepoResult<UpdateReport> {
        self.repo.update_by_roll(roll, patch)
    }

    /// Applies raw `(column name, optional value)` updates.
    ///
    /// Unknown column names are ignored.
    pub fn update_fields<'a, I>(&self, roll: &str, updates: I) -> RepoResult<UpdateReport>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let patch = updates
            .into_iter()
            .filter_map(|(name, value)| Some((Field::parse(name)?, value?)))
            .fold(StudentPatch::default(), |patch, (field, value)| {
                patch.with(field, value)
            });
        self.repo.update_by_roll(roll, &patch)
    }

    /// Removes the record keyed by `roll`.
    pub fn delete_by_roll(&self, roll: &str) -> RepoResult<()> {
        self.repo.delete_by_roll(roll)
    }
}

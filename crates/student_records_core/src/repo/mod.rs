//! Repository layer over record storage.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for student records.
//! - Isolate storage backend details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Student::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateRollNo`)
//!   in addition to storage transport errors.

pub mod student_repo;

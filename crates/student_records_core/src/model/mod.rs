//! Domain model for student records.
//!
//! # Responsibility
//! - Define the record shape persisted by storage backends.
//! - Keep field validation next to the data it constrains.
//!
//! # Invariants
//! - Every record is identified by a `RollNo` unique across the record set.

pub mod student;

//! In-memory record storage for tests and embedding.

use super::{RecordStorage, StorageResult};
use crate::model::student::Student;
use std::cell::{Cell, RefCell};

/// Record storage held in process memory.
///
/// Tracks how many rewrites happened so callers can assert that read-only or
/// not-found paths never replace the persisted set.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RefCell<Vec<Student>>,
    rewrites: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds storage with an existing record set.
    pub fn with_records(records: Vec<Student>) -> Self {
        Self {
            records: RefCell::new(records),
            rewrites: Cell::new(0),
        }
    }

    /// Number of `rewrite` calls observed so far.
    pub fn rewrite_count(&self) -> usize {
        self.rewrites.get()
    }

    /// Copy of the currently stored records.
    pub fn snapshot(&self) -> Vec<Student> {
        self.records.borrow().clone()
    }
}

impl RecordStorage for MemoryStorage {
    fn list_all(&self) -> StorageResult<Vec<Student>> {
        Ok(self.snapshot())
    }

    fn append(&self, student: &Student) -> StorageResult<()> {
        self.records.borrow_mut().push(student.clone());
        Ok(())
    }

    fn rewrite(&self, students: &[Student]) -> StorageResult<()> {
        *self.records.borrow_mut() = students.to_vec();
        self.rewrites.set(self.rewrites.get() + 1);
        Ok(())
    }
}

//! CSV file backend for the student record set.
//!
//! # Responsibility
//! - Read and write the UTF-8 CSV file that is the single source of truth.
//! - Write the header lazily on first append.
//!
//! # Invariants
//! - The header row, after trimming each name, is exactly
//!   `RollNo,FullName,Age,Email,Phone`.
//! - Rewrites go through a temp file in the same directory and an atomic
//!   rename, so a failed rewrite leaves the previous file intact.
//! - File handles are scoped to a single call and flushed before success.

use super::{RecordStorage, StorageError, StorageResult};
use crate::model::student::{Field, Student};
use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, error, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Record storage persisted as a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileStorage {
    path: PathBuf,
}

impl CsvFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn write_rows<W: Write>(out: W, header: bool, students: &[Student]) -> StorageResult<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);
        if header {
            writer.write_record(Field::ALL.iter().map(|field| field.as_str()))?;
        }
        for student in students {
            writer.serialize(student)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn rewrite_atomically(&self, students: &[Student]) -> StorageResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        Self::write_rows(temp.as_file_mut(), true, students)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl RecordStorage for CsvFileStorage {
    fn list_all(&self) -> StorageResult<Vec<Student>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=storage_read module=storage status=ok mode=csv rows=0 missing=true"
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        check_header(&headers)?;

        let mut students = Vec::new();
        for row in reader.deserialize::<Student>() {
            students.push(row.map_err(describe_row_error)?);
        }

        debug!(
            "event=storage_read module=storage status=ok mode=csv rows={}",
            students.len()
        );
        Ok(students)
    }

    fn append(&self, student: &Student) -> StorageResult<()> {
        fs::create_dir_all(self.parent_dir())?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        Self::write_rows(file, write_header, std::slice::from_ref(student))?;

        debug!(
            "event=storage_append module=storage status=ok mode=csv header_written={}",
            write_header
        );
        Ok(())
    }

    fn rewrite(&self, students: &[Student]) -> StorageResult<()> {
        let started_at = Instant::now();

        match self.rewrite_atomically(students) {
            Ok(()) => {
                info!(
                    "event=storage_rewrite module=storage status=ok mode=csv rows={} duration_ms={}",
                    students.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=storage_rewrite module=storage status=error mode=csv duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn check_header(headers: &StringRecord) -> StorageResult<()> {
    let expected = Field::ALL.iter().map(|field| field.as_str());
    if headers.iter().eq(expected) {
        return Ok(());
    }

    Err(StorageError::InvalidData(format!(
        "unexpected header `{}`; expected `{}`",
        headers.iter().collect::<Vec<_>>().join(","),
        Field::ALL.map(Field::as_str).join(",")
    )))
}

fn describe_row_error(err: csv::Error) -> StorageError {
    match err.kind() {
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => StorageError::InvalidData(format!(
            "line {}: expected {expected_len} fields, found {len}",
            pos.as_ref()
                .map_or_else(|| "?".to_string(), |pos| pos.line().to_string())
        )),
        _ => StorageError::Csv(err),
    }
}

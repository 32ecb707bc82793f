//! Student domain model and field validation.
//!
//! # Responsibility
//! - Define the canonical five-field student record persisted by the store.
//! - Own field-level validation rules shared by register and update paths.
//!
//! # Invariants
//! - Every field is kept as its original string; nothing is coerced to numbers.
//! - `Field::ALL` is the fixed column order used for headers and prompts.
//! - `RollNo` is the identifying key and is compared after trimming.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AGE_MIN: u32 = 5;
const AGE_MAX: u32 = 100;
const PHONE_LENGTHS: [usize; 3] = [10, 11, 12];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^@]+@[^@]+\..+").expect("valid email regex"));

/// One column of the student record, in fixed persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    RollNo,
    FullName,
    Age,
    Email,
    Phone,
}

impl Field {
    /// Fixed field order used for the header row, prompts and updates.
    pub const ALL: [Field; 5] = [
        Field::RollNo,
        Field::FullName,
        Field::Age,
        Field::Email,
        Field::Phone,
    ];

    /// Canonical column name as written to the header row.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RollNo => "RollNo",
            Self::FullName => "FullName",
            Self::Age => "Age",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }

    /// Parses an exact column name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Checks one raw value against this field's format/range rule.
    pub fn validate(self, value: &str) -> Result<(), StudentValidationError> {
        let valid = match self {
            Self::RollNo => is_all_digits(value),
            Self::FullName => true,
            Self::Age => {
                is_all_digits(value)
                    && value
                        .parse::<u32>()
                        .map(|age| (AGE_MIN..=AGE_MAX).contains(&age))
                        .unwrap_or(false)
            }
            Self::Email => EMAIL_RE.is_match(value),
            Self::Phone => is_all_digits(value) && PHONE_LENGTHS.contains(&value.len()),
        };

        if valid {
            Ok(())
        } else {
            Err(StudentValidationError {
                field: self,
                value: value.to_string(),
            })
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates a raw value by column name.
///
/// Unknown column names are accepted so callers can pass through extra
/// columns without failing.
pub fn validate_field(field_name: &str, raw_value: &str) -> bool {
    match Field::parse(field_name) {
        Some(field) => field.validate(raw_value).is_ok(),
        None => true,
    }
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

/// Field value rejected by its format/range rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentValidationError {
    pub field: Field,
    pub value: String,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: `{}`", self.field, self.value)
    }
}

impl Error for StudentValidationError {}

/// Canonical student record.
///
/// Serde names match the persisted header so CSV rows map by column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "RollNo")]
    pub roll_no: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
}

impl Student {
    /// Builds a record from raw field values without validating them.
    pub fn new(
        roll_no: impl Into<String>,
        full_name: impl Into<String>,
        age: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            roll_no: roll_no.into(),
            full_name: full_name.into(),
            age: age.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Builds a record from `(column name, value)` pairs.
    ///
    /// Unknown column names are ignored and missing columns stay empty, so
    /// the result still has to pass `validate()`.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut student = Self::new("", "", "", "", "");
        for (name, value) in fields {
            if let Some(field) = Field::parse(name) {
                student.set(field, value);
            }
        }
        student
    }

    /// Returns the value stored for `field`.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::RollNo => &self.roll_no,
            Field::FullName => &self.full_name,
            Field::Age => &self.age,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    /// Overwrites the value stored for `field`.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::RollNo => self.roll_no = value,
            Field::FullName => self.full_name = value,
            Field::Age => self.age = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
    }

    /// Validates every field in `Field::ALL` order.
    ///
    /// # Errors
    /// - Returns the first field that fails its rule.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        Field::ALL
            .into_iter()
            .try_for_each(|field| field.validate(self.get(field)))
    }

    /// Whether this record's key matches `roll`, ignoring surrounding whitespace.
    pub fn has_roll(&self, roll: &str) -> bool {
        self.roll_no.trim() == roll.trim()
    }
}

/// Per-field replacement values for an update.
///
/// `None` and blank values both mean "keep the existing value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub roll_no: Option<String>,
    pub full_name: Option<String>,
    pub age: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl StudentPatch {
    /// Returns the replacement supplied for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::RollNo => self.roll_no.as_deref(),
            Field::FullName => self.full_name.as_deref(),
            Field::Age => self.age.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
        }
    }

    /// Sets the replacement for `field`, returning the patch for chaining.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            Field::RollNo => self.roll_no = value,
            Field::FullName => self.full_name = value,
            Field::Age => self.age = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
        self
    }

    /// Whether no field carries a non-blank replacement.
    pub fn is_empty(&self) -> bool {
        Field::ALL
            .into_iter()
            .all(|field| self.get(field).map_or(true, |value| value.trim().is_empty()))
    }
}

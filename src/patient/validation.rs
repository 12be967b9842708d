//! Field checks shared by full records and partial updates.

use std::error::Error;
use std::fmt;

/// Exclusive lower bound on age.
pub const MIN_AGE: i64 = 0;

/// Exclusive upper bound on age.
pub const MAX_AGE: i64 = 120;

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field problem found in one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// A payload that could not be decoded at all (wrong types, bad enum value).
    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: "body",
                message: message.into(),
            }],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether `field` is among the rejected fields.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::decode(err.to_string())
    }
}

/// Accumulates field errors so a payload reports all of its problems at once.
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub(crate) fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fail(field, "field required");
        }
        value
    }

    pub(crate) fn name(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            if name.is_empty() {
                self.fail("name", "must not be empty");
            }
        }
    }

    pub(crate) fn age(&mut self, age: Option<i64>) {
        if let Some(age) = age {
            if age <= MIN_AGE || age >= MAX_AGE {
                self.fail(
                    "age",
                    format!("must be greater than {MIN_AGE} and less than {MAX_AGE}, got {age}"),
                );
            }
        }
    }

    pub(crate) fn positive(&mut self, field: &'static str, value: Option<f64>) {
        if let Some(value) = value {
            if value.is_nan() || value <= 0.0 {
                self.fail(field, format!("must be greater than 0, got {value}"));
            }
        }
    }

    pub(crate) fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError {
            errors: self.errors,
        }
    }
}

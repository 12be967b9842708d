//! Sort parameters.

use std::fmt;
use std::str::FromStr;

use super::error::ServiceError;
use crate::patient::PatientRecord;

/// Field to order patients by. Parsed from the exact strings `height`,
/// `weight` and `BMI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Height,
    Weight,
    Bmi,
}

impl SortKey {
    pub const CHOICES: [&'static str; 3] = ["height", "weight", "BMI"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Height => "height",
            SortKey::Weight => "weight",
            SortKey::Bmi => "BMI",
        }
    }

    /// The record's value for this key; a record without one sorts as 0.
    pub fn value_of(&self, record: &PatientRecord) -> f64 {
        match self {
            SortKey::Height => record.height,
            SortKey::Weight => record.weight,
            SortKey::Bmi => record.bmi,
        }
        .unwrap_or(0.0)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortKey::Height),
            "weight" => Ok(SortKey::Weight),
            "BMI" => Ok(SortKey::Bmi),
            other => Err(ServiceError::InvalidArgument(format!(
                "invalid sort field {:?}, choose from {:?}",
                other,
                SortKey::CHOICES
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub const CHOICES: [&'static str; 2] = ["asc", "desc"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ServiceError::InvalidArgument(format!(
                "invalid order {:?}, choose from {:?}",
                other,
                SortOrder::CHOICES
            ))),
        }
    }
}

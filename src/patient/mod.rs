//! Patient record model.
//!
//! A [`Patient`] is a record that passed every field check. Its derived
//! fields (BMI and verdict) are never accepted from callers: they are
//! computed from height and weight each time a record is written.
//!
//! ```ignore
//! use patient_records::patient::{NewPatient, PatientRecord};
//!
//! let patient = serde_json::from_value::<NewPatient>(body)?.validate()?;
//! let stored = PatientRecord::from(&patient); // carries bmi + verdict
//! ```

mod bmi;
mod record;
mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use bmi::{compute_bmi, compute_verdict, Verdict, OBESE_FROM, UNDERWEIGHT_BELOW};
pub use record::{NewPatient, PatientRecord, PatientUpdate, PatientView};
pub use validation::{FieldError, ValidationError, MAX_AGE, MIN_AGE};

use validation::FieldChecks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Older stores spell this `others`.
    #[serde(alias = "others")]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Metres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
}

impl Patient {
    /// Run every full-record check over `record` and build a patient keyed by `id`.
    ///
    /// Any `bmi`/`verdict` already on the record is ignored.
    pub fn validate(id: &str, record: &PatientRecord) -> Result<Patient, ValidationError> {
        Self::validate_with(FieldChecks::default(), id, record)
    }

    /// Like [`Patient::validate`], reporting `checks` already collected by the caller.
    pub(crate) fn validate_with(
        mut checks: FieldChecks,
        id: &str,
        record: &PatientRecord,
    ) -> Result<Patient, ValidationError> {
        let name = checks.required("name", record.name.as_deref());
        let city = checks.required("city", record.city.as_deref());
        let age = checks.required("age", record.age);
        let gender = checks.required("gender", record.gender);
        let height = checks.required("height", record.height);
        let weight = checks.required("weight", record.weight);

        checks.name(name);
        checks.age(age);
        checks.positive("height", height);
        checks.positive("weight", weight);

        match (name, city, age, gender, height, weight) {
            (Some(name), Some(city), Some(age), Some(gender), Some(height), Some(weight))
                if checks.is_clean() =>
            {
                Ok(Patient {
                    id: id.to_string(),
                    name: name.to_string(),
                    city: city.to_string(),
                    // range-checked above
                    age: age as u32,
                    gender,
                    height,
                    weight,
                })
            }
            _ => Err(checks.into_error()),
        }
    }

    pub fn bmi(&self) -> f64 {
        compute_bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Verdict {
        compute_verdict(self.bmi())
    }

    /// Split into the store key and the stored record (derived fields filled in).
    pub fn into_entry(self) -> (String, PatientRecord) {
        let record = PatientRecord::from(&self);
        (self.id, record)
    }
}

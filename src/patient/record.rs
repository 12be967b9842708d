//! Stored, create and partial-update shapes of a patient.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::bmi::Verdict;
use super::validation::{FieldChecks, ValidationError};
use super::{Gender, Patient};

/// A patient as kept in the store: every non-id field, derived ones included.
///
/// Fields are optional so a hand-edited store with a gap still loads.
/// Records written by this crate always carry all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

impl PatientRecord {
    /// Overwrite every field the update carries; leave the rest alone.
    ///
    /// Derived fields are not touched here. Run the merged record back through
    /// [`Patient::validate`] to recompute them.
    pub fn apply(&mut self, update: PatientUpdate) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(city) = update.city {
            self.city = Some(city);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(height) = update.height {
            self.height = Some(height);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
    }
}

impl From<&Patient> for PatientRecord {
    fn from(patient: &Patient) -> Self {
        let bmi = patient.bmi();
        Self {
            name: Some(patient.name.clone()),
            city: Some(patient.city.clone()),
            age: Some(i64::from(patient.age)),
            gender: Some(patient.gender),
            height: Some(patient.height),
            weight: Some(patient.weight),
            bmi: Some(bmi),
            verdict: Some(super::compute_verdict(bmi)),
        }
    }
}

/// Partial update body. Absent fields mean "leave unchanged".
///
/// There is no `bmi` or `verdict` here: a body carrying them has those keys
/// ignored, and the stored values are recomputed after the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// Check the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::default();
        checks.name(self.name.as_deref());
        checks.age(self.age);
        checks.positive("height", self.height);
        checks.positive("weight", self.weight);
        checks.finish()
    }
}

/// Create body: a full record including its id.
///
/// Every field is optional at the decode step so a missing field is reported
/// alongside the other field problems rather than as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl NewPatient {
    pub fn validate(self) -> Result<Patient, ValidationError> {
        let mut checks = FieldChecks::default();
        let id = checks.required("id", self.id).unwrap_or_default();
        let record = PatientRecord {
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            bmi: None,
            verdict: None,
        };
        Patient::validate_with(checks, &id, &record)
    }
}

/// Decode an optional age, accepting floats with no fractional part (`34.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber(i64);

    impl<'de> Deserialize<'de> for WholeNumber {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(WholeNumberVisitor).map(WholeNumber)
        }
    }

    struct WholeNumberVisitor;

    impl<'de> Visitor<'de> for WholeNumberVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.fract() == 0.0 && v.abs() < 9.0e15 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    Option::<WholeNumber>::deserialize(deserializer).map(|age| age.map(|WholeNumber(n)| n))
}

/// A stored record together with its key, as returned by get and sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientView {
    pub id: String,
    #[serde(flatten)]
    pub record: PatientRecord,
}

impl PatientView {
    pub fn new(id: impl Into<String>, record: PatientRecord) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }
}

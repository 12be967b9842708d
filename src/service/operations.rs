//! Patient operations as pure functions over a loaded snapshot.
//!
//! Nothing here touches storage. [`PatientService`](super::PatientService)
//! loads the snapshot, calls one of these, and saves the snapshot back for
//! the mutating ones.

use super::error::ServiceError;
use super::sort::{SortKey, SortOrder};
use crate::patient::{NewPatient, Patient, PatientUpdate, PatientView};
use crate::store::Patients;

/// Look up one patient; the view carries its id.
pub fn get(patients: &Patients, id: &str) -> Result<PatientView, ServiceError> {
    patients
        .get(id)
        .map(|record| PatientView::new(id, record.clone()))
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))
}

/// Every patient ordered by `key`. Ties come out in no particular order.
pub fn sort(patients: &Patients, key: SortKey, order: SortOrder) -> Vec<PatientView> {
    let mut views: Vec<PatientView> = patients
        .iter()
        .map(|(id, record)| PatientView::new(id.as_str(), record.clone()))
        .collect();

    views.sort_by(|a, b| {
        let ordering = key.value_of(&a.record).total_cmp(&key.value_of(&b.record));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    views
}

/// Validate `draft` and insert it. Returns the stored patient's id.
pub fn create(patients: &mut Patients, draft: NewPatient) -> Result<String, ServiceError> {
    let patient = draft.validate()?;
    if patients.contains_key(&patient.id) {
        return Err(ServiceError::Conflict(patient.id));
    }

    let (id, record) = patient.into_entry();
    patients.insert(id.clone(), record);
    Ok(id)
}

/// Merge `update` into the stored patient and recompute derived fields.
///
/// The snapshot is untouched when any check fails.
pub fn update(
    patients: &mut Patients,
    id: &str,
    update: PatientUpdate,
) -> Result<Patient, ServiceError> {
    update.validate()?;

    let existing = patients
        .get(id)
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;

    let mut merged = existing.clone();
    merged.apply(update);
    let patient = Patient::validate(id, &merged)?;

    let (key, record) = patient.clone().into_entry();
    patients.insert(key, record);
    Ok(patient)
}

pub fn delete(patients: &mut Patients, id: &str) -> Result<(), ServiceError> {
    patients
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))
}

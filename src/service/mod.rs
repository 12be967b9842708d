//! Patient service - load, operate, save.
//!
//! `PatientService<S>` owns a [`PatientStore`] and runs each operation as
//! one full load, an in-memory step from [`operations`], and (for
//! mutations) one full save. There is no cache between calls and no lock
//! around the sequence.
//!
//! ## Quick Start
//!
//! ```ignore
//! use patient_records::service::{PatientService, SortKey, SortOrder};
//! use patient_records::store::JsonFileStore;
//!
//! let service = PatientService::new(JsonFileStore::new("patients.json"));
//! service.create(serde_json::from_value(body)?)?;
//! let tallest_first = service.sort(SortKey::Height, SortOrder::Desc)?;
//! ```

mod error;
pub mod operations;
mod sort;

pub use error::ServiceError;
pub use sort::{SortKey, SortOrder};

use crate::patient::{NewPatient, Patient, PatientUpdate, PatientView};
use crate::store::{PatientStore, Patients};

/// Patient operations backed by a store.
pub struct PatientService<S> {
    store: S,
}

impl<S: PatientStore> PatientService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The full record set, as stored.
    pub fn list(&self) -> Result<Patients, ServiceError> {
        let patients = self.store.load()?;
        tracing::debug!(records = patients.len(), "listed patients");
        Ok(patients)
    }

    pub fn get(&self, id: &str) -> Result<PatientView, ServiceError> {
        let patients = self.store.load()?;
        operations::get(&patients, id)
    }

    pub fn sort(&self, key: SortKey, order: SortOrder) -> Result<Vec<PatientView>, ServiceError> {
        let patients = self.store.load()?;
        tracing::debug!(%key, %order, records = patients.len(), "sorting patients");
        Ok(operations::sort(&patients, key, order))
    }

    /// Parse the raw sort parameters, then sort. `order` defaults to ascending.
    pub fn sort_by_name(
        &self,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Vec<PatientView>, ServiceError> {
        let key: SortKey = match sort_by {
            Some(name) => name.parse()?,
            None => {
                return Err(ServiceError::InvalidArgument(format!(
                    "missing sort field, choose from {:?}",
                    SortKey::CHOICES
                )))
            }
        };
        let order = order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
        self.sort(key, order)
    }

    /// Insert a new patient. The response carries only the id; callers
    /// fetch the record to see its derived fields.
    pub fn create(&self, draft: NewPatient) -> Result<String, ServiceError> {
        let mut patients = self.store.load()?;
        let id = operations::create(&mut patients, draft).inspect_err(log_rejection("create"))?;
        self.store.save(&patients)?;
        tracing::info!(%id, records = patients.len(), "patient created");
        Ok(id)
    }

    pub fn update(&self, id: &str, update: PatientUpdate) -> Result<Patient, ServiceError> {
        let mut patients = self.store.load()?;
        let patient =
            operations::update(&mut patients, id, update).inspect_err(log_rejection("update"))?;
        self.store.save(&patients)?;
        tracing::info!(
            %id,
            bmi = patient.bmi(),
            verdict = %patient.verdict(),
            "patient updated"
        );
        Ok(patient)
    }

    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut patients = self.store.load()?;
        operations::delete(&mut patients, id).inspect_err(log_rejection("delete"))?;
        self.store.save(&patients)?;
        tracing::info!(%id, records = patients.len(), "patient deleted");
        Ok(())
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn log_rejection(operation: &'static str) -> impl Fn(&ServiceError) {
    move |err: &ServiceError| tracing::warn!(operation, error = %err, "patient operation rejected")
}

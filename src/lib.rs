pub mod patient;
pub mod service;
pub mod store;

// Server surface (requires "http" feature)
#[cfg(feature = "http")]
pub mod config;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod logging;

pub use patient::{
    compute_bmi, compute_verdict, Gender, NewPatient, Patient, PatientRecord, PatientUpdate,
    PatientView, ValidationError, Verdict,
};
pub use service::{PatientService, ServiceError, SortKey, SortOrder};
pub use store::{InMemoryStore, JsonFileStore, PatientStore, Patients, StoreError};

//! Store - whole-snapshot persistence for patient records.
//!
//! A store hands out the complete record set on `load` and replaces it
//! wholesale on `save`. Nothing is cached between calls and nothing guards
//! a load/modify/save sequence: two writers racing on the same store each
//! save their own snapshot and the last one wins.
//!
//! ## Example
//!
//! ```ignore
//! use patient_records::store::{JsonFileStore, PatientStore};
//!
//! let store = JsonFileStore::new("patients.json");
//! let mut patients = store.load()?;
//! patients.remove("P003");
//! store.save(&patients)?;
//! ```

mod in_memory;
mod json_file;

use std::collections::BTreeMap;
use std::fmt;

use crate::patient::PatientRecord;

/// The full record set: patient id to stored fields.
///
/// The id lives only in the key, never inside the record.
pub type Patients = BTreeMap<String, PatientRecord>;

/// Abstract whole-snapshot storage for patient records.
pub trait PatientStore: Send + Sync {
    /// Read the entire record set.
    fn load(&self) -> Result<Patients, StoreError>;

    /// Replace the entire record set.
    fn save(&self, patients: &Patients) -> Result<(), StoreError>;
}

/// Error type for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The snapshot could not be encoded or decoded.
    Serde(String),
    /// Storage-level lock poisoned.
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => write!(f, "store io error on {}: {}", path, source),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

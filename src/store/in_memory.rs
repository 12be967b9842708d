//! InMemoryStore - RwLock-backed patient store for testing and embedding.

use std::sync::{Arc, RwLock};

use super::{PatientStore, Patients, StoreError};

/// In-memory patient store. Clone-friendly via Arc; clones share one snapshot.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<RwLock<Patients>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `patients`.
    pub fn with_patients(patients: Patients) -> Self {
        Self {
            storage: Arc::new(RwLock::new(patients)),
        }
    }
}

impl PatientStore for InMemoryStore {
    fn load(&self) -> Result<Patients, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("load"))?;
        Ok(storage.clone())
    }

    fn save(&self, patients: &Patients) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;
        *storage = patients.clone();
        Ok(())
    }
}

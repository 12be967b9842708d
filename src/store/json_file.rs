//! JsonFileStore - the record set as one JSON object in one file.
//!
//! Layout: `{ "<id>": { name, city, age, gender, height, weight, bmi, verdict } }`.
//! Every load reads the whole file; every save rewrites it. There is no
//! append log and no schema version.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{PatientStore, Patients, StoreError};

/// File-backed patient store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty record set if the file does not exist yet.
    ///
    /// Returns `true` when a file was created. An existing file is left as is,
    /// even if its contents would not load.
    pub fn create_if_missing(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        self.save(&Patients::new())?;
        tracing::info!(path = %self.path.display(), "created empty patient store");
        Ok(true)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl PatientStore for JsonFileStore {
    fn load(&self) -> Result<Patients, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let patients: Patients = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %self.path.display(), records = patients.len(), "loaded patient store");
        Ok(patients)
    }

    fn save(&self, patients: &Patients) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(patients)?;
        fs::write(&self.path, bytes).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), records = patients.len(), "saved patient store");
        Ok(())
    }
}

//! Error types for patient operations.

use std::error::Error;
use std::fmt;

use crate::patient::ValidationError;
use crate::store::StoreError;

/// Error type for patient operations.
#[derive(Debug)]
pub enum ServiceError {
    /// A field constraint was violated, or the body could not be decoded.
    Validation(ValidationError),
    /// No patient with this id.
    NotFound(String),
    /// A patient with this id already exists.
    Conflict(String),
    /// A query parameter is outside its allowed values.
    InvalidArgument(String),
    /// Loading or saving the store failed.
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(e) => write!(f, "validation failed: {}", e),
            ServiceError::NotFound(id) => write!(f, "patient not found: {}", id),
            ServiceError::Conflict(id) => write!(f, "patient already exists: {}", id),
            ServiceError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ServiceError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Validation(e) => Some(e),
            ServiceError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Store(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Validation(err.into())
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 422,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::InvalidArgument(_) => 400,
            ServiceError::Store(_) => 500,
        }
    }
}

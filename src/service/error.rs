//! Error types for employee service operations.

use std::error::Error;
use std::fmt;

use crate::employee::EmployeeId;
use crate::store::StoreError;

/// Error type for employee service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Another record already uses this name (trimmed, case-insensitive).
    DuplicateName { name: String },
    /// No record with this id.
    NotFound { id: EmployeeId },
    /// The store failed; not interpreted further.
    Store(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::DuplicateName { name } => {
                write!(f, "employee with name '{}' already exists", name)
            }
            ServiceError::NotFound { id } => write!(f, "employee not found with id: {}", id),
            ServiceError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServiceError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { name } => ServiceError::DuplicateName { name },
            other => ServiceError::Store(other),
        }
    }
}

//! Store - the persistence contract the employee service depends on.
//!
//! Each method is a single, atomic round trip. The service never wraps
//! several calls in a transaction, so implementations only have to keep
//! individual operations consistent.
//!
//! Two implementations ship with the crate:
//!
//! - [`InMemoryEmployeeStore`]: lock-protected table for tests and development.
//! - [`JsonFileStore`]: the same table, persisted as a JSON document.
//!
//! Both enforce a case-insensitive unique index on the trimmed name as a
//! backstop for the service's own uniqueness check.

mod file;
mod in_memory;
mod table;

use std::fmt;

use crate::employee::{Employee, EmployeeId, NewEmployee};

/// Listing order for [`EmployeeStore::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By name, ascending, byte-wise (case-sensitive) collation.
    #[default]
    NameAsc,
    /// By salary, descending.
    SalaryDesc,
}

/// Persistence contract for employee records.
///
/// Every listing breaks ties by id ascending.
pub trait EmployeeStore: Send + Sync {
    /// Insert a new row and assign it a fresh id.
    fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// Overwrite the row with `employee.id`. Fails with `NotFound` if absent.
    fn replace(&self, employee: &Employee) -> Result<Employee, StoreError>;

    /// Delete a row by id. Returns true if it existed.
    fn delete(&self, id: EmployeeId) -> Result<bool, StoreError>;

    /// Get a row by id. Returns None if not found.
    fn get(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    /// Whether a row with this id exists.
    fn exists(&self, id: EmployeeId) -> Result<bool, StoreError>;

    /// Every row in the given order.
    fn list(&self, order: SortOrder) -> Result<Vec<Employee>, StoreError>;

    /// Rows whose name contains `fragment`, ignoring case, ordered by name.
    fn find_name_containing(&self, fragment: &str) -> Result<Vec<Employee>, StoreError>;

    /// The row whose name equals `name`, ignoring case.
    fn find_by_name(&self, name: &str) -> Result<Option<Employee>, StoreError>;

    /// Whether a row other than `excluding` has this name, ignoring case.
    fn exists_by_name(
        &self,
        name: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, StoreError>;

    /// Rows with `min <= age <= max`, ordered by name.
    fn find_age_between(&self, min: u8, max: u8) -> Result<Vec<Employee>, StoreError>;

    /// Rows with `min <= salary <= max`, ordered by name.
    fn find_salary_between(&self, min: f64, max: f64) -> Result<Vec<Employee>, StoreError>;

    /// Total number of rows.
    fn count(&self) -> Result<u64, StoreError>;
}

/// Error type for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Internal lock poisoned by a panicking writer.
    LockPoisoned(&'static str),
    /// The unique name index rejected a write.
    UniqueViolation { name: String },
    /// Target row of a replace does not exist.
    NotFound(EmployeeId),
    /// Loaded data holds two rows with the same id.
    DuplicateId(EmployeeId),
    /// Reading or writing the backing file failed.
    Io(std::io::Error),
    /// The backing file could not be encoded or decoded.
    Serde(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
            StoreError::UniqueViolation { name } => {
                write!(f, "unique name index violated by '{}'", name)
            }
            StoreError::NotFound(id) => write!(f, "no row with id {}", id),
            StoreError::DuplicateId(id) => write!(f, "id {} appears more than once", id),
            StoreError::Io(e) => write!(f, "store io error: {}", e),
            StoreError::Serde(msg) => write!(f, "store serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

pub use file::JsonFileStore;
pub use in_memory::InMemoryEmployeeStore;

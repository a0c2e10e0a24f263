//! Employee Service - the business rules between presentation and storage.
//!
//! `EmployeeService<S>` wraps any [`EmployeeStore`](crate::store::EmployeeStore)
//! and owns the decisions the store cannot make alone: name trimming,
//! case-insensitive uniqueness (including "every record except this one" on
//! update), existence checks before mutation, listing order, and timestamps.
//!
//! ## Quick Start
//!
//! ```ignore
//! use employee_registry::{EmployeeDraft, EmployeeService, InMemoryEmployeeStore};
//!
//! let service = EmployeeService::new(InMemoryEmployeeStore::new());
//! let alice = service.save(EmployeeDraft::new("Alice Tan", 30, 5000.0))?;
//!
//! // Rejected: same name once trimmed and case-folded.
//! assert!(service.save(EmployeeDraft::new(" alice tan ", 25, 4000.0)).is_err());
//!
//! service.update(alice.id, EmployeeDraft::new("Alice Tan", 31, 5500.0))?;
//! service.delete_by_id(alice.id)?;
//! ```

mod clock;
mod employee_service;
mod error;

pub use clock::{Clock, ManualClock, SystemClock};
pub use employee_service::EmployeeService;
pub use error::ServiceError;

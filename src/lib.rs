pub mod config;
mod employee;
#[cfg(feature = "http")]
pub mod http;
mod service;
mod store;
pub mod validation;

pub use config::{Config, ConfigError};
pub use employee::{fold_name, normalize_name, Employee, EmployeeDraft, EmployeeId, NewEmployee};
pub use service::{Clock, EmployeeService, ManualClock, ServiceError, SystemClock};
pub use store::{EmployeeStore, InMemoryEmployeeStore, JsonFileStore, SortOrder, StoreError};
pub use validation::{EmployeeForm, Field, ValidationError, Violation};

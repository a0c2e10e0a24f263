use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::error::ServiceError;
use crate::employee::{normalize_name, Employee, EmployeeDraft, EmployeeId, NewEmployee};
use crate::store::{EmployeeStore, SortOrder, StoreError};

/// Business rules for employee records on top of an [`EmployeeStore`].
///
/// Candidates are assumed to have passed [`crate::validation`] already; the
/// service only trims names, enforces case-insensitive name uniqueness, checks
/// existence before mutating, and stamps timestamps.
///
/// Uniqueness is check-then-act: two concurrent saves of the same name can
/// both pass the check. The store's unique index catches the second write,
/// which still surfaces as [`ServiceError::DuplicateName`].
pub struct EmployeeService<S> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: EmployeeStore> EmployeeService<S> {
    /// Create a service over `store`, stamping with the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    /// Create a service with a custom timestamp source.
    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    /// Every record, ordered by name ascending.
    pub fn find_all(&self) -> Result<Vec<Employee>, ServiceError> {
        debug!("finding all employees");
        Ok(self.store.list(SortOrder::NameAsc)?)
    }

    /// Same as [`find_all`](Self::find_all).
    pub fn find_all_order_by_name(&self) -> Result<Vec<Employee>, ServiceError> {
        self.find_all()
    }

    /// Every record, ordered by salary descending.
    pub fn find_all_order_by_salary(&self) -> Result<Vec<Employee>, ServiceError> {
        debug!("finding all employees by salary");
        Ok(self.store.list(SortOrder::SalaryDesc)?)
    }

    /// The record with this id, if any. A missing id is not an error.
    pub fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, ServiceError> {
        debug!(%id, "finding employee by id");
        Ok(self.store.get(id)?)
    }

    /// The record whose trimmed name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Employee>, ServiceError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Ok(None);
        }
        Ok(self.store.find_by_name(name)?)
    }

    /// Create a record.
    ///
    /// The name is trimmed first; fails with `DuplicateName` if any record
    /// already has it (case-insensitive).
    pub fn save(&self, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        debug!(name = %draft.name, "saving employee");
        let draft = draft.normalize();

        if self.exists_by_name(&draft.name)? {
            warn!(name = %draft.name, "rejected duplicate employee name");
            return Err(ServiceError::DuplicateName { name: draft.name });
        }

        let saved = self
            .store
            .insert(NewEmployee::stamped(draft, self.clock.now()))?;
        info!(id = %saved.id, "employee saved");
        Ok(saved)
    }

    /// Overwrite every mutable field of the record at `id`.
    ///
    /// `id` and `created_at` are preserved and `updated_at` moves strictly
    /// forward. Fails with `NotFound` if the id is unknown, or
    /// `DuplicateName` if a different record already has the trimmed name.
    pub fn update(&self, id: EmployeeId, draft: EmployeeDraft) -> Result<Employee, ServiceError> {
        debug!(%id, name = %draft.name, "updating employee");

        let Some(mut employee) = self.store.get(id)? else {
            warn!(%id, "update target not found");
            return Err(ServiceError::NotFound { id });
        };

        let draft = draft.normalize();
        if self.exists_by_name_and_not_id(&draft.name, Some(id))? {
            warn!(%id, name = %draft.name, "rejected duplicate employee name");
            return Err(ServiceError::DuplicateName { name: draft.name });
        }

        let stamp = self.next_stamp(employee.updated_at);
        employee.apply(draft, stamp);

        let updated = self.store.replace(&employee).map_err(|e| match e {
            StoreError::NotFound(id) => ServiceError::NotFound { id },
            other => ServiceError::from(other),
        })?;
        info!(%id, "employee updated");
        Ok(updated)
    }

    /// Hard-delete the record at `id`. Fails with `NotFound` if absent.
    pub fn delete_by_id(&self, id: EmployeeId) -> Result<(), ServiceError> {
        debug!(%id, "deleting employee");

        if !self.store.exists(id)? {
            warn!(%id, "delete target not found");
            return Err(ServiceError::NotFound { id });
        }

        if !self.store.delete(id)? {
            // Removed by someone else between the check and the delete.
            return Err(ServiceError::NotFound { id });
        }
        info!(%id, "employee deleted");
        Ok(())
    }

    /// Records whose name contains `query`, ignoring case, ordered by name.
    ///
    /// An absent or blank query returns every record.
    pub fn search_by_name(&self, query: Option<&str>) -> Result<Vec<Employee>, ServiceError> {
        debug!(query = ?query, "searching employees by name");

        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => Ok(self.store.find_name_containing(query)?),
            None => self.find_all(),
        }
    }

    /// Whether any record has this name (trimmed, case-insensitive).
    ///
    /// A blank name is never taken and does not hit the store.
    pub fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        let name = normalize_name(name);
        if name.is_empty() {
            return Ok(false);
        }
        Ok(self.store.exists_by_name(name, None)?)
    }

    /// Whether a record other than `id` has this name.
    ///
    /// Returns false without hitting the store if the name is blank or the
    /// id is absent.
    pub fn exists_by_name_and_not_id(
        &self,
        name: &str,
        id: Option<EmployeeId>,
    ) -> Result<bool, ServiceError> {
        let Some(id) = id else {
            return Ok(false);
        };
        let name = normalize_name(name);
        if name.is_empty() {
            return Ok(false);
        }
        Ok(self.store.exists_by_name(name, Some(id))?)
    }

    /// Records with `min <= age <= max`, ordered by name.
    pub fn find_by_age_between(&self, min: u8, max: u8) -> Result<Vec<Employee>, ServiceError> {
        debug!(min, max, "finding employees by age range");
        if min > max {
            return Ok(Vec::new());
        }
        Ok(self.store.find_age_between(min, max)?)
    }

    /// Records with `min <= salary <= max`, ordered by name.
    pub fn find_by_salary_between(
        &self,
        min: f64,
        max: f64,
    ) -> Result<Vec<Employee>, ServiceError> {
        debug!(min, max, "finding employees by salary range");
        if min.is_nan() || max.is_nan() || min > max {
            return Ok(Vec::new());
        }
        Ok(self.store.find_salary_between(min, max)?)
    }

    /// Total number of records.
    pub fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.store.count()?)
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current time, forced past `previous`.
    fn next_stamp(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > previous {
            now
        } else {
            previous + chrono::Duration::microseconds(1)
        }
    }
}

//! InMemoryEmployeeStore - lock-protected table for testing and development.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::table::Table;
use super::{EmployeeStore, SortOrder, StoreError};
use crate::employee::{Employee, EmployeeId, NewEmployee};

/// In-memory employee store. Clone-friendly via Arc: clones share rows.
#[derive(Clone, Default)]
pub struct InMemoryEmployeeStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryEmployeeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        self.table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StoreError> {
        self.table
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }
}

impl EmployeeStore for InMemoryEmployeeStore {
    fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        self.write()?.insert(employee)
    }

    fn replace(&self, employee: &Employee) -> Result<Employee, StoreError> {
        self.write()?.replace(employee)
    }

    fn delete(&self, id: EmployeeId) -> Result<bool, StoreError> {
        Ok(self.write()?.delete(id))
    }

    fn get(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.read()?.get(id))
    }

    fn exists(&self, id: EmployeeId) -> Result<bool, StoreError> {
        Ok(self.read()?.exists(id))
    }

    fn list(&self, order: SortOrder) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.list(order))
    }

    fn find_name_containing(&self, fragment: &str) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.find_name_containing(fragment))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.read()?.find_by_name(name))
    }

    fn exists_by_name(
        &self,
        name: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, StoreError> {
        Ok(self.read()?.exists_by_name(name, excluding))
    }

    fn find_age_between(&self, min: u8, max: u8) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.find_age_between(min, max))
    }

    fn find_salary_between(&self, min: f64, max: f64) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.find_salary_between(min, max))
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.count())
    }
}

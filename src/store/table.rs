//! Table - the row storage shared by the in-memory and file-backed stores.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{SortOrder, StoreError};
use crate::employee::{fold_name, Employee, EmployeeId, NewEmployee};

/// Rows keyed by id, plus a unique index on the folded name.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    rows: BTreeMap<EmployeeId, Employee>,
    names: HashMap<String, EmployeeId>,
    next_id: i64,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk form of a table.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TableSnapshot {
    pub next_id: i64,
    pub employees: Vec<Employee>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            rows: BTreeMap::new(),
            names: HashMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild a table (and its name index) from a snapshot. Repeated ids or
    /// folded names are rejected.
    pub fn from_snapshot(snapshot: TableSnapshot) -> Result<Self, StoreError> {
        let mut table = Table::new();
        for employee in snapshot.employees {
            if table.rows.contains_key(&employee.id) {
                return Err(StoreError::DuplicateId(employee.id));
            }
            let key = employee.folded_name();
            if table.names.contains_key(&key) {
                return Err(StoreError::UniqueViolation {
                    name: employee.name,
                });
            }
            table.names.insert(key, employee.id);
            table.rows.insert(employee.id, employee);
        }
        let highest = table.rows.keys().next_back().map(|id| id.0 + 1).unwrap_or(1);
        table.next_id = snapshot.next_id.max(highest);
        Ok(table)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            next_id: self.next_id,
            employees: self.rows.values().cloned().collect(),
        }
    }

    pub fn insert(&mut self, new: NewEmployee) -> Result<Employee, StoreError> {
        let key = fold_name(&new.name);
        if self.names.contains_key(&key) {
            return Err(StoreError::UniqueViolation { name: new.name });
        }

        let id = EmployeeId(self.next_id);
        self.next_id += 1;

        let employee = Employee::from_new(id, new);
        self.names.insert(key, id);
        self.rows.insert(id, employee.clone());
        Ok(employee)
    }

    pub fn replace(&mut self, employee: &Employee) -> Result<Employee, StoreError> {
        let previous_key = self
            .rows
            .get(&employee.id)
            .map(Employee::folded_name)
            .ok_or(StoreError::NotFound(employee.id))?;

        let key = employee.folded_name();
        if let Some(owner) = self.names.get(&key) {
            if *owner != employee.id {
                return Err(StoreError::UniqueViolation {
                    name: employee.name.clone(),
                });
            }
        }

        self.names.remove(&previous_key);
        self.names.insert(key, employee.id);
        self.rows.insert(employee.id, employee.clone());
        Ok(employee.clone())
    }

    pub fn delete(&mut self, id: EmployeeId) -> bool {
        match self.rows.remove(&id) {
            Some(removed) => {
                self.names.remove(&removed.folded_name());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EmployeeId) -> Option<Employee> {
        self.rows.get(&id).cloned()
    }

    pub fn exists(&self, id: EmployeeId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn list(&self, order: SortOrder) -> Vec<Employee> {
        self.select(|_| true, order)
    }

    pub fn find_name_containing(&self, fragment: &str) -> Vec<Employee> {
        let needle = fragment.to_lowercase();
        self.select(
            |e| e.name.to_lowercase().contains(&needle),
            SortOrder::NameAsc,
        )
    }

    pub fn find_by_name(&self, name: &str) -> Option<Employee> {
        self.names
            .get(&fold_name(name))
            .and_then(|id| self.rows.get(id))
            .cloned()
    }

    pub fn exists_by_name(&self, name: &str, excluding: Option<EmployeeId>) -> bool {
        match self.names.get(&fold_name(name)) {
            Some(owner) => Some(*owner) != excluding,
            None => false,
        }
    }

    pub fn find_age_between(&self, min: u8, max: u8) -> Vec<Employee> {
        self.select(|e| (min..=max).contains(&e.age), SortOrder::NameAsc)
    }

    pub fn find_salary_between(&self, min: f64, max: f64) -> Vec<Employee> {
        self.select(|e| e.salary >= min && e.salary <= max, SortOrder::NameAsc)
    }

    pub fn count(&self) -> u64 {
        self.rows.len() as u64
    }

    fn select(&self, predicate: impl Fn(&Employee) -> bool, order: SortOrder) -> Vec<Employee> {
        // Rows iterate in id order, so a stable sort keeps id as the tie-breaker.
        let mut selected: Vec<Employee> =
            self.rows.values().filter(|e| predicate(*e)).cloned().collect();
        selected.sort_by(|a, b| compare(a, b, order));
        selected
    }
}

fn compare(a: &Employee, b: &Employee, order: SortOrder) -> Ordering {
    match order {
        SortOrder::NameAsc => a.name.cmp(&b.name),
        SortOrder::SalaryDesc => b.salary.total_cmp(&a.salary),
    }
}

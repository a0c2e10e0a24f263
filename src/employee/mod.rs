//! Employee - the single record type managed by the registry.
//!
//! A record moves through three shapes:
//!
//! - [`EmployeeDraft`]: a candidate that already passed validation
//!   (name, age, salary only).
//! - [`NewEmployee`]: a draft with its timestamps stamped, ready for the store.
//! - [`Employee`]: a persisted row carrying its store-assigned [`EmployeeId`].
//!
//! Names are compared after [`normalize_name`] (trim) and [`fold_name`]
//! (trim + lowercase).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by the store. Never reused, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EmployeeId {
    fn from(id: i64) -> Self {
        EmployeeId(id)
    }
}

/// A persisted employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub age: u8,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Build a persisted record from an insert payload and the id the store chose.
    pub fn from_new(id: EmployeeId, new: NewEmployee) -> Self {
        Employee {
            id,
            name: new.name,
            age: new.age,
            salary: new.salary,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }

    /// Replace every mutable field with the draft's values.
    ///
    /// `id` and `created_at` are kept; `updated_at` is set to `stamp`.
    pub fn apply(&mut self, draft: EmployeeDraft, stamp: DateTime<Utc>) {
        self.name = draft.name;
        self.age = draft.age;
        self.salary = draft.salary;
        self.updated_at = stamp;
    }

    /// The name key used for case-insensitive comparisons.
    pub fn folded_name(&self) -> String {
        fold_name(&self.name)
    }
}

/// A validated candidate record, as accepted by `save` and `update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub age: u8,
    pub salary: f64,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, age: u8, salary: f64) -> Self {
        EmployeeDraft {
            name: name.into(),
            age,
            salary,
        }
    }

    /// Trim the name in place.
    pub fn normalize(mut self) -> Self {
        let trimmed = normalize_name(&self.name);
        if trimmed.len() != self.name.len() {
            self.name = trimmed.to_string();
        }
        self
    }
}

/// Insert payload: a draft stamped with its creation timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub age: u8,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewEmployee {
    pub fn stamped(draft: EmployeeDraft, now: DateTime<Utc>) -> Self {
        NewEmployee {
            name: draft.name,
            age: draft.age,
            salary: draft.salary,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Strip leading and trailing whitespace from a name.
pub fn normalize_name(name: &str) -> &str {
    name.trim()
}

/// Case-folded, trimmed form of a name.
pub fn fold_name(name: &str) -> String {
    normalize_name(name).to_lowercase()
}

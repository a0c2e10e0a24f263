//! Validation - field constraints checked before a candidate reaches the service.
//!
//! Raw input arrives as an [`EmployeeForm`] whose fields may be missing. The
//! form is run through an ordered list of pure rules; every failing rule adds
//! one [`Violation`]. If nothing failed, the form is converted into a typed
//! [`EmployeeDraft`].
//!
//! ```ignore
//! let form = EmployeeForm::new("Alice Tan", 30, 5000.0);
//! let draft = validation::validate(&form)?;
//! service.save(draft)?;
//! ```

mod binding;
mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::employee::EmployeeDraft;

pub use binding::{bind, validate_json};
pub use rules::{
    AGE_MAX, AGE_MIN, NAME_MAX_CHARS, NAME_MIN_CHARS, SALARY_MAX, SALARY_MIN,
};

/// Unvalidated employee input, as bound from a form or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl EmployeeForm {
    pub fn new(name: impl Into<String>, age: i64, salary: f64) -> Self {
        EmployeeForm {
            name: Some(name.into()),
            age: Some(age),
            salary: Some(salary),
        }
    }
}

/// The field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Age,
    Salary,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Age => write!(f, "age"),
            Field::Salary => write!(f, "salary"),
        }
    }
}

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: Field,
    pub message: String,
}

impl Violation {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Violation {
            field,
            message: message.into(),
        }
    }
}

/// Every violation found in a form, in rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Violations for one field.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Run every rule against the form, collecting all violations.
pub fn check(form: &EmployeeForm) -> Vec<Violation> {
    rules::RULES
        .iter()
        .filter_map(|rule| rule(form))
        .collect()
}

/// Validate a form and convert it into a draft.
pub fn validate(form: &EmployeeForm) -> Result<EmployeeDraft, ValidationError> {
    let violations = check(form);
    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    match (&form.name, form.age, form.salary) {
        (Some(name), Some(age), Some(salary)) => match u8::try_from(age) {
            Ok(age) => Ok(EmployeeDraft::new(name.trim(), age, salary)),
            Err(_) => Err(ValidationError {
                violations: vec![Violation::new(Field::Age, rules::AGE_MAX_MESSAGE)],
            }),
        },
        // Every missing field produced a violation above.
        _ => Err(ValidationError {
            violations: vec![Violation::new(Field::Name, rules::NAME_REQUIRED_MESSAGE)],
        }),
    }
}

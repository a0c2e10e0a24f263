//! Binding a loosely typed JSON body onto an [`EmployeeForm`].
//!
//! A field holding the wrong JSON type is reported as a violation on that
//! field instead of failing the whole request. `null` counts as missing.

use serde_json::{Map, Value};

use super::{check, EmployeeForm, Field, ValidationError, Violation};
use crate::employee::EmployeeDraft;

/// Bind `body` to a form, returning the form and any type mismatches.
///
/// Mismatched fields are left as `None` in the form. A body that is not a
/// JSON object binds as an empty form.
pub fn bind(body: &Value) -> (EmployeeForm, Vec<Violation>) {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);
    let mut mismatches = Vec::new();

    let name = match fields.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            mismatches.push(Violation::new(Field::Name, "Name must be text"));
            None
        }
    };

    let age = match fields.get("age") {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_i64() {
            Some(age) => Some(age),
            None => {
                mismatches.push(Violation::new(Field::Age, "Age must be a whole number"));
                None
            }
        },
    };

    let salary = match fields.get("salary") {
        None | Some(Value::Null) => None,
        Some(value) => match value.as_f64() {
            Some(salary) => Some(salary),
            None => {
                mismatches.push(Violation::new(Field::Salary, "Salary must be a number"));
                None
            }
        },
    };

    (EmployeeForm { name, age, salary }, mismatches)
}

/// Bind and validate a JSON body in one step.
///
/// Type mismatches replace the rule violations of their field; the result
/// stays in field order (name, age, salary).
pub fn validate_json(body: &Value) -> Result<EmployeeDraft, ValidationError> {
    let (form, mismatches) = bind(body);
    if mismatches.is_empty() {
        return super::validate(&form);
    }

    let mut violations: Vec<Violation> = check(&form)
        .into_iter()
        .filter(|v| !mismatches.iter().any(|m| m.field == v.field))
        .collect();
    violations.extend(mismatches);
    violations.sort_by_key(|v| v.field);
    Err(ValidationError { violations })
}

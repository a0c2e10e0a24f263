//! The ordered rule table used by [`super::check`].

use super::{EmployeeForm, Field, Violation};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const AGE_MIN: i64 = 18;
pub const AGE_MAX: i64 = 65;
pub const SALARY_MIN: f64 = 1000.0;
pub const SALARY_MAX: f64 = 1_000_000.0;

pub(super) const NAME_REQUIRED_MESSAGE: &str = "Name is required";
pub(super) const AGE_MAX_MESSAGE: &str = "Age must not exceed 65";

/// A rule inspects the form and reports at most one violation.
pub(super) type Rule = fn(&EmployeeForm) -> Option<Violation>;

pub(super) const RULES: &[Rule] = &[
    name_present,
    name_length,
    age_present,
    age_at_least_min,
    age_at_most_max,
    salary_present,
    salary_at_least_min,
    salary_at_most_max,
];

fn trimmed_name(form: &EmployeeForm) -> Option<&str> {
    form.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
}

fn name_present(form: &EmployeeForm) -> Option<Violation> {
    match trimmed_name(form) {
        Some(_) => None,
        None => Some(Violation::new(Field::Name, NAME_REQUIRED_MESSAGE)),
    }
}

fn name_length(form: &EmployeeForm) -> Option<Violation> {
    let chars = trimmed_name(form)?.chars().count();
    if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        None
    } else {
        Some(Violation::new(
            Field::Name,
            format!(
                "Name must be between {} and {} characters",
                NAME_MIN_CHARS, NAME_MAX_CHARS
            ),
        ))
    }
}

fn age_present(form: &EmployeeForm) -> Option<Violation> {
    match form.age {
        Some(_) => None,
        None => Some(Violation::new(Field::Age, "Age is required")),
    }
}

fn age_at_least_min(form: &EmployeeForm) -> Option<Violation> {
    let age = form.age?;
    (age < AGE_MIN).then(|| Violation::new(Field::Age, format!("Age must be at least {}", AGE_MIN)))
}

fn age_at_most_max(form: &EmployeeForm) -> Option<Violation> {
    let age = form.age?;
    (age > AGE_MAX).then(|| Violation::new(Field::Age, AGE_MAX_MESSAGE))
}

fn finite_salary(form: &EmployeeForm) -> Option<f64> {
    form.salary.filter(|s| s.is_finite())
}

fn salary_present(form: &EmployeeForm) -> Option<Violation> {
    match finite_salary(form) {
        Some(_) => None,
        None => Some(Violation::new(Field::Salary, "Salary is required")),
    }
}

fn salary_at_least_min(form: &EmployeeForm) -> Option<Violation> {
    let salary = finite_salary(form)?;
    (salary < SALARY_MIN).then(|| Violation::new(Field::Salary, "Salary must be at least 1000"))
}

fn salary_at_most_max(form: &EmployeeForm) -> Option<Violation> {
    let salary = finite_salary(form)?;
    (salary > SALARY_MAX)
        .then(|| Violation::new(Field::Salary, "Salary cannot exceed 1,000,000"))
}

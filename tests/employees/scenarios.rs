//! End-to-end walkthroughs of the service contract.

use employee_registry::{validation, EmployeeForm, Field, ServiceError};

use crate::support::{draft, names, seed, service};

#[test]
fn alice_tan_walkthrough() {
    let service = service();

    let alice = service.save(draft("Alice Tan", 30, 5000.0)).unwrap();
    assert_eq!(alice.created_at, alice.updated_at);
    assert_eq!(service.find_by_id(alice.id).unwrap(), Some(alice.clone()));

    let err = service.save(draft(" alice tan ", 25, 4000.0)).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName { .. }));
    assert!(err.to_string().contains("alice tan"));

    let bob = service.save(draft("Bob", 40, 9000.0)).unwrap();
    service.save(draft("Carol", 35, 3000.0)).unwrap();

    let salaries: Vec<f64> = service
        .find_all_order_by_salary()
        .unwrap()
        .iter()
        .map(|e| e.salary)
        .collect();
    assert_eq!(salaries, vec![9000.0, 5000.0, 3000.0]);

    assert!(!service.exists_by_name_and_not_id("Alice Tan", Some(alice.id)).unwrap());
    assert!(service.exists_by_name_and_not_id("Alice Tan", Some(bob.id)).unwrap());
}

#[test]
fn form_to_record_round_trip() {
    let service = service();

    let invalid = EmployeeForm::new("A", 70, 500.0);
    let err = validation::validate(&invalid).unwrap_err();
    assert_eq!(err.for_field(Field::Name).count(), 1);
    assert_eq!(err.for_field(Field::Age).count(), 1);
    assert_eq!(err.for_field(Field::Salary).count(), 1);
    assert_eq!(service.count().unwrap(), 0);

    let draft = validation::validate(&EmployeeForm::new("  Dana Lee ", 28, 4200.0)).unwrap();
    let saved = service.save(draft).unwrap();
    assert_eq!(saved.name, "Dana Lee");
    assert_eq!(saved.age, 28);
}

#[test]
fn edit_then_delete() {
    let service = service();
    let rows = seed(&service, &[("Alice", 5000.0), ("Bob", 6000.0)]);
    let bob = &rows[1];

    let renamed = service.update(bob.id, draft("Robert", 41, 6500.0)).unwrap();
    assert_eq!(renamed.id, bob.id);
    assert_eq!(names(&service.find_all().unwrap()), vec!["Alice", "Robert"]);

    service.delete_by_id(bob.id).unwrap();
    assert_eq!(service.count().unwrap(), 1);

    // The freed name can be reused, but never the id.
    let again = service.save(draft("Robert", 41, 6500.0)).unwrap();
    assert!(again.id > bob.id);
}

#[test]
fn search_matches_substrings_in_name_order() {
    let service = service();
    seed(
        &service,
        &[("Martin", 2000.0), ("Tina", 2000.0), ("Alice Tan", 2000.0), ("Bob", 2000.0)],
    );

    let hits = service.search_by_name(Some("tin")).unwrap();
    assert_eq!(names(&hits), vec!["Martin", "Tina"]);

    let hits = service.search_by_name(Some("TAN")).unwrap();
    assert_eq!(names(&hits), vec!["Alice Tan"]);

    assert!(service.search_by_name(Some("zzz")).unwrap().is_empty());
}

#[test]
fn range_filters() {
    let service = service();
    service.save(draft("Young", 20, 1500.0)).unwrap();
    service.save(draft("Middle", 40, 5000.0)).unwrap();
    service.save(draft("Senior", 60, 9000.0)).unwrap();

    assert_eq!(
        names(&service.find_by_age_between(20, 40).unwrap()),
        vec!["Middle", "Young"]
    );
    assert_eq!(
        names(&service.find_by_salary_between(5000.0, 9000.0).unwrap()),
        vec!["Middle", "Senior"]
    );
}

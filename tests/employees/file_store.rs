//! The service running over the JSON file store.

use employee_registry::{EmployeeService, EmployeeStore, JsonFileStore, ServiceError};

use crate::support::draft;

#[test]
fn records_and_uniqueness_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");

    let alice = {
        let service = EmployeeService::new(JsonFileStore::open(&path).unwrap());
        let alice = service.save(draft("Alice Tan", 30, 5000.0)).unwrap();
        service.save(draft("Bob", 40, 9000.0)).unwrap();
        alice
    };

    let service = EmployeeService::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(service.count().unwrap(), 2);
    assert_eq!(service.find_by_id(alice.id).unwrap(), Some(alice));

    let err = service.save(draft("ALICE TAN", 30, 5000.0)).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName { .. }));
}

#[test]
fn clones_share_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");

    let store = JsonFileStore::open(&path).unwrap();
    let service = EmployeeService::new(store.clone());

    service.save(draft("Alice", 30, 5000.0)).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    assert!(service.exists_by_name(" alice ").unwrap());
}

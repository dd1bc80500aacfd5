use roster_core::db::open_db_in_memory;
use roster_core::{
    Employee, EmployeeRepository, EmployeeService, EmployeeServiceError, SqliteEmployeeRepository,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> EmployeeService<SqliteEmployeeRepository<'_>> {
    EmployeeService::new(SqliteEmployeeRepository::try_new(conn).unwrap())
}

fn travis() -> Employee {
    Employee::new("travis", "scott", "travis@gmail.com").unwrap()
}

#[test]
fn create_then_duplicate_email_conflicts_and_leaves_storage_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let saved = service.save_employee(&travis()).unwrap();
    assert!(saved.id.unwrap() > 0);
    assert_eq!(saved.first_name, "travis");
    assert_eq!(saved.last_name, "scott");
    assert_eq!(saved.email, "travis@gmail.com");

    let duplicate = Employee::new("other", "person", "travis@gmail.com").unwrap();
    let err = service.save_employee(&duplicate).unwrap_err();
    assert!(matches!(err, EmployeeServiceError::Conflict { ref email } if email == "travis@gmail.com"));
    assert_eq!(err.to_string(), "employee with email travis@gmail.com already exists");

    let all = service.get_all_employees().unwrap();
    assert_eq!(all, vec![saved]);
}

#[test]
fn get_all_counts_distinct_saves() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    assert!(service.get_all_employees().unwrap().is_empty());

    for n in 0..5 {
        let employee = Employee::new("first", "last", format!("person{n}@example.com")).unwrap();
        service.save_employee(&employee).unwrap();
    }

    assert_eq!(service.get_all_employees().unwrap().len(), 5);
}

#[test]
fn get_by_id_roundtrip_and_absence() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let saved = service.save_employee(&travis()).unwrap();
    let fetched = service.get_employee_by_id(saved.id.unwrap()).unwrap();
    assert_eq!(fetched, Some(saved));

    assert_eq!(service.get_employee_by_id(987).unwrap(), None);
}

#[test]
fn update_replaces_fields_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let saved = service.save_employee(&travis()).unwrap();
    let changed = Employee {
        first_name: "jacques".to_string(),
        last_name: "webster".to_string(),
        email: "jacques@gmail.com".to_string(),
        ..saved.clone()
    };

    let once = service.update_employee(&changed).unwrap();
    let after_once = service.get_all_employees().unwrap();
    let twice = service.update_employee(&changed).unwrap();
    let after_twice = service.get_all_employees().unwrap();

    assert_eq!(once, changed);
    assert_eq!(twice, changed);
    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice, vec![changed]);
}

#[test]
fn update_onto_another_employees_email_conflicts() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.save_employee(&travis()).unwrap();
    let other = service
        .save_employee(&Employee::new("kid", "cudi", "cudi@gmail.com").unwrap())
        .unwrap();

    let colliding = Employee {
        email: "travis@gmail.com".to_string(),
        ..other.clone()
    };
    let err = service.update_employee(&colliding).unwrap_err();
    assert!(matches!(err, EmployeeServiceError::Conflict { .. }));

    let stored = service.get_employee_by_id(other.id.unwrap()).unwrap();
    assert_eq!(stored, Some(other));
}

#[test]
fn delete_then_get_returns_absent() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let saved = service.save_employee(&travis()).unwrap();
    let id = saved.id.unwrap();

    service.delete_employee(id).unwrap();
    assert_eq!(service.get_employee_by_id(id).unwrap(), None);

    service.delete_employee(id).unwrap();
}

#[test]
fn email_is_free_again_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let saved = service.save_employee(&travis()).unwrap();
    service.delete_employee(saved.id.unwrap()).unwrap();

    let again = service.save_employee(&travis()).unwrap();
    assert_ne!(again.id, saved.id);
}

#[test]
fn service_and_repository_share_one_connection() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let saved = service.save_employee(&travis()).unwrap();
    assert_eq!(
        repo.find_by_names("travis", "scott").unwrap(),
        Some(saved)
    );
}

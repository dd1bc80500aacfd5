use roster_core::{Employee, EmployeeValidationError};

#[test]
fn new_employee_is_unsaved() {
    let employee = Employee::new("travis", "scott", "travis@gmail.com").unwrap();

    assert_eq!(employee.id, None);
    assert!(!employee.is_persisted());
    assert_eq!(employee.first_name, "travis");
    assert_eq!(employee.last_name, "scott");
    assert_eq!(employee.email, "travis@gmail.com");
}

#[test]
fn new_rejects_blank_fields() {
    assert_eq!(
        Employee::new("  ", "scott", "travis@gmail.com").unwrap_err(),
        EmployeeValidationError::EmptyField("first_name")
    );
    assert_eq!(
        Employee::new("travis", "", "travis@gmail.com").unwrap_err(),
        EmployeeValidationError::EmptyField("last_name")
    );
    assert_eq!(
        Employee::new("travis", "scott", " ").unwrap_err(),
        EmployeeValidationError::EmptyField("email")
    );
}

#[test]
fn new_rejects_malformed_email() {
    let err = Employee::new("travis", "scott", "travis.gmail.com").unwrap_err();
    assert_eq!(
        err,
        EmployeeValidationError::InvalidEmail("travis.gmail.com".to_string())
    );
}

#[test]
fn with_id_rejects_non_positive_ids() {
    let employee = Employee::new("travis", "scott", "travis@gmail.com").unwrap();
    assert_eq!(
        employee.clone().with_id(0).unwrap_err(),
        EmployeeValidationError::NonPositiveId(0)
    );
    assert!(employee.with_id(1).unwrap().is_persisted());
}

#[test]
fn serialization_uses_camel_case_and_omits_missing_id() {
    let employee = Employee::new("travis", "scott", "travis@gmail.com").unwrap();

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "firstName": "travis",
            "lastName": "scott",
            "email": "travis@gmail.com"
        })
    );

    let saved = employee.with_id(4).unwrap();
    let json = serde_json::to_value(&saved).unwrap();
    assert_eq!(json["id"], 4);

    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, saved);
}

#[test]
fn deserialize_rejects_invalid_email() {
    let value = serde_json::json!({
        "firstName": "travis",
        "lastName": "scott",
        "email": "nope"
    });

    let err = serde_json::from_value::<Employee>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid email address `nope`"),
        "unexpected error: {err}"
    );
}

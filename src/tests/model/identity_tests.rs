use super::*;

#[test]
fn role_parse_is_case_insensitive_and_accepts_aliases() {
    assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
    assert_eq!("learner".parse::<Role>().unwrap(), Role::Student);
    assert_eq!(" INSTRUCTOR ".parse::<Role>().unwrap(), Role::Instructor);
    assert_eq!("Administrator".parse::<Role>().unwrap(), Role::Admin);
    assert!("teacher".parse::<Role>().is_err());
}

#[test]
fn identity_deserializes_numeric_id_and_mixed_case_role() {
    let v = serde_json::json!({
        "id": 42,
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "role": "Instructor"
    });
    let who: Identity = serde_json::from_value(v).unwrap();
    assert_eq!(who.id.as_str(), "42");
    assert!(who.is(Role::Instructor));
    assert_eq!(who.display_name(), "Ada Lovelace");
}

#[test]
fn identity_with_unknown_role_is_rejected() {
    let v = serde_json::json!({ "id": "u1", "role": "guest" });
    assert!(serde_json::from_value::<Identity>(v).is_err());
}

#[test]
fn display_name_falls_back_to_email() {
    let who = Identity {
        id: UserId::new("u1"),
        first_name: String::new(),
        last_name: " ".to_string(),
        email: "someone@example.com".to_string(),
        role: Role::Student,
    };
    assert_eq!(who.display_name(), "someone@example.com");
}

#[test]
fn role_serializes_to_lowercase_wire_value() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
    assert_eq!(Role::Student.to_string(), "student");
}

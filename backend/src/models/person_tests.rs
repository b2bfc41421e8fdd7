use chrono::Utc;
use serde_json::json;

use super::person::*;

fn sample_person() -> Person {
    NewPerson {
        name: "Ada".to_string(),
        age: 36.0,
    }
    .into_person(PersonId::new("abc"), Utc::now())
}

#[test]
fn test_draft_requires_name() {
    let draft = PersonDraft {
        name: None,
        age: Some(30.0),
    };
    assert_eq!(
        draft.validate().unwrap_err(),
        PersonValidationError::MissingField("name")
    );
}

#[test]
fn test_draft_requires_age() {
    let draft = PersonDraft {
        name: Some("Ada".to_string()),
        age: None,
    };
    assert_eq!(
        draft.validate().unwrap_err(),
        PersonValidationError::MissingField("age")
    );
}

#[test]
fn test_draft_rejects_blank_name() {
    let err = PersonDraft::new("   ", 30.0).validate().unwrap_err();
    assert_eq!(err, PersonValidationError::EmptyName);
}

#[test]
fn test_draft_rejects_non_finite_age() {
    let err = PersonDraft::new("Ada", f64::NAN).validate().unwrap_err();
    assert!(matches!(err, PersonValidationError::InvalidAge(_)));
}

#[test]
fn test_draft_validates() {
    let new_person = PersonDraft::new("Ada", 36.0).validate().unwrap();
    assert_eq!(new_person.name, "Ada");
    assert_eq!(new_person.age, 36.0);
}

#[test]
fn test_patch_age_only_keeps_name() {
    let person = sample_person();
    let updated = PersonPatch::age(40.0).apply(&person).unwrap();
    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.age, 40.0);
    assert_eq!(updated.id, person.id);
    assert_eq!(updated.created_at, person.created_at);
}

#[test]
fn test_patch_name_only_keeps_age() {
    let person = sample_person();
    let updated = PersonPatch::name("Grace").apply(&person).unwrap();
    assert_eq!(updated.name, "Grace");
    assert_eq!(updated.age, 36.0);
}

#[test]
fn test_empty_patch_is_noop() {
    let person = sample_person();
    let patch = PersonPatch::default();
    assert!(patch.is_empty());
    assert_eq!(patch.apply(&person).unwrap(), person);
}

#[test]
fn test_patch_rejects_blank_name() {
    let person = sample_person();
    assert_eq!(
        PersonPatch::name("").apply(&person).unwrap_err(),
        PersonValidationError::EmptyName
    );
}

#[test]
fn test_patch_null_fields_are_absent() {
    let patch: PersonPatch = serde_json::from_value(json!({"name": null, "age": 41})).unwrap();
    assert_eq!(patch, PersonPatch::age(41.0));
}

#[test]
fn test_age_accepts_numeric_text() {
    let draft: PersonDraft = serde_json::from_value(json!({"name": "Ada", "age": "30"})).unwrap();
    assert_eq!(draft, PersonDraft::new("Ada", 30.0));

    let patch: PersonPatch = serde_json::from_value(json!({"age": " 41.5 "})).unwrap();
    assert_eq!(patch, PersonPatch::age(41.5));
}

#[test]
fn test_age_rejects_non_numeric_text() {
    let result = serde_json::from_value::<PersonDraft>(json!({"name": "Ada", "age": "old"}));
    assert!(result.is_err());
}

#[test]
fn test_person_json_field_names() {
    let person = sample_person();
    let value = serde_json::to_value(&person).unwrap();
    assert_eq!(value["_id"], "abc");
    assert_eq!(value["name"], "Ada");
    assert_eq!(value["age"], 36.0);
    assert!(value["createdAt"].is_string());
}

#[test]
fn test_generated_ids_are_unique() {
    let a = PersonId::generate();
    let b = PersonId::generate();
    assert!(!a.as_str().is_empty());
    assert_ne!(a, b);
}

//! Tests for db::repository::error.

use people_api::db::repository::{ErrorContext, RepositoryError};
use people_api::models::PersonValidationError;

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("update_person")
        .with_entity("person")
        .with_entity_id("abc-123")
        .with_details("row locked");

    assert_eq!(ctx.operation.as_deref(), Some("update_person"));
    assert_eq!(ctx.entity.as_deref(), Some("person"));
    assert_eq!(ctx.entity_id.as_deref(), Some("abc-123"));
    assert_eq!(ctx.details.as_deref(), Some("row locked"));
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("get_person").with_entity_id("42");
    assert_eq!(ctx.to_string(), "[operation=get_person, id=42]");
    assert_eq!(ErrorContext::default().to_string(), "[]");
}

#[test]
fn test_error_display_includes_context() {
    let err = RepositoryError::not_found_with_context(
        "Person 42 not found",
        ErrorContext::new("get_person"),
    );
    let display = err.to_string();
    assert!(display.starts_with("Not found: Person 42 not found"));
    assert!(display.contains("operation=get_person"));
    assert_eq!(err.message(), "Person 42 not found");
}

#[test]
fn test_error_kinds() {
    let not_found = RepositoryError::not_found("x");
    assert!(not_found.is_not_found());
    assert!(!not_found.is_store_unavailable());

    let validation = RepositoryError::validation("x");
    assert!(validation.is_validation());
    assert!(!validation.is_store_unavailable());

    for err in [
        RepositoryError::connection("x"),
        RepositoryError::query("x"),
        RepositoryError::configuration("x"),
        RepositoryError::internal("x"),
    ] {
        assert!(err.is_store_unavailable(), "{err}");
    }
}

#[test]
fn test_with_operation_overrides_context() {
    let err = RepositoryError::connection("down").with_operation("list_people");
    assert_eq!(err.context().operation.as_deref(), Some("list_people"));
}

#[test]
fn test_from_validation_error() {
    let err = RepositoryError::from(PersonValidationError::MissingField("name"));
    assert!(err.is_validation());
    assert_eq!(err.message(), "Person validation failed: name is required");
    assert_eq!(err.context().entity.as_deref(), Some("person"));
}

//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer in [`crate::db::services`].

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::dto::{HealthResponse, MessageResponse};
use super::error::AppError;
use super::extract::{PersonById, Payload};
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{Person, PersonDraft, PersonPatch};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// People CRUD
// =============================================================================

/// GET /users
pub async fn list_people(State(state): State<AppState>) -> HandlerResult<Vec<Person>> {
    let people = db_services::list_people(state.repository.as_ref()).await?;
    Ok(Json(people))
}

/// GET /users/{id}
pub async fn get_person(PersonById(person): PersonById) -> HandlerResult<Person> {
    Ok(Json(person))
}

/// POST /users
pub async fn create_person(
    State(state): State<AppState>,
    Payload(draft): Payload<PersonDraft>,
) -> Result<(StatusCode, Json<Person>), AppError> {
    let person = db_services::create_person(state.repository.as_ref(), draft)
        .await
        .map_err(AppError::write_failure)?;

    info!(id = %person.id, "person created");
    Ok((StatusCode::CREATED, Json(person)))
}

/// PATCH /users/{id}
///
/// Only the fields present in the body are changed.
pub async fn update_person(
    State(state): State<AppState>,
    PersonById(person): PersonById,
    Payload(patch): Payload<PersonPatch>,
) -> HandlerResult<Person> {
    let updated = db_services::update_person(state.repository.as_ref(), &person.id, patch)
        .await
        .map_err(AppError::write_failure)?;

    info!(id = %updated.id, "person updated");
    Ok(Json(updated))
}

/// DELETE /users/{id}
pub async fn delete_person(
    State(state): State<AppState>,
    PersonById(person): PersonById,
) -> HandlerResult<MessageResponse> {
    db_services::delete_person(state.repository.as_ref(), &person.id).await?;

    info!(id = %person.id, "person deleted");
    Ok(Json(MessageResponse::new("deleted")))
}

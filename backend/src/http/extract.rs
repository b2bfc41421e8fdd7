//! Request extractors shared by the people routes.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::error::{AppError, PERSON_NOT_FOUND};
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{Person, PersonId};

/// The person named by the `{id}` path segment.
///
/// Resolved before the handler body runs: an unknown identifier short-circuits
/// with 404 `Cannot find user`, a store failure with 500.
#[derive(Debug, Clone)]
pub struct PersonById(pub Person);

impl FromRequestParts<AppState> for PersonById {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let id = PersonId::new(id);
        match db_services::get_person(state.repository.as_ref(), &id).await {
            Ok(person) => Ok(Self(person)),
            Err(e) if e.is_not_found() => Err(AppError::NotFound(PERSON_NOT_FOUND.to_string())),
            Err(e) => Err(AppError::Repository(e)),
        }
    }
}

/// Request body accepted either as JSON or as a URL-encoded form.
///
/// Any body that cannot be decoded into `T` is a 400.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self(value))
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

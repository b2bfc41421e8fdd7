//! Data Transfer Objects for the HTTP API.
//!
//! The person payloads themselves live in [`crate::models`]; this module only
//! holds the response envelopes that have no domain meaning.

use serde::{Deserialize, Serialize};

pub use crate::models::{Person, PersonDraft, PersonPatch};

/// Plain `{ "message": ... }` body, as returned by DELETE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Database connection status
    pub database: String,
}

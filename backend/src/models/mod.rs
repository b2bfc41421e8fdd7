//! Domain models for the People API.
//!
//! [`Person`] is the only stored record. [`PersonDraft`] and [`PersonPatch`]
//! are the explicit request payloads that get validated before the store
//! touches anything.

pub mod person;

pub use person::{NewPerson, Person, PersonDraft, PersonId, PersonPatch, PersonValidationError};

#[cfg(test)]
#[path = "person_tests.rs"]
mod person_tests;

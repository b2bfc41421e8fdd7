//! Person record and its create/update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier assigned by the store when a person is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    /// Wrap an existing identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PersonId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored person.
///
/// Serialized with the field names clients of the original service expect:
/// `_id`, `name`, `age`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: PersonId,
    pub name: String,
    pub age: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Reasons a person payload is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PersonValidationError {
    #[error("Person validation failed: {0} is required")]
    MissingField(&'static str),

    #[error("Person validation failed: name must not be empty")]
    EmptyName,

    #[error("Person validation failed: age must be a finite number, got {0}")]
    InvalidAge(f64),
}

/// Creation payload, as received from a client.
///
/// Both fields are optional at the wire level so that a missing field is a
/// validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<f64>,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, age: f64) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
        }
    }

    /// Check presence and shape of every field.
    pub fn validate(self) -> Result<NewPerson, PersonValidationError> {
        let name = self.name.ok_or(PersonValidationError::MissingField("name"))?;
        let age = self.age.ok_or(PersonValidationError::MissingField("age"))?;
        validate_name(&name)?;
        validate_age(age)?;
        Ok(NewPerson { name, age })
    }
}

/// A validated person that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
    pub name: String,
    pub age: f64,
}

impl NewPerson {
    /// Attach the store-generated identity.
    pub fn into_person(self, id: PersonId, created_at: DateTime<Utc>) -> Person {
        Person {
            id,
            name: self.name,
            age: self.age,
            created_at,
        }
    }
}

/// Partial update. Absent (or `null`) fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: Option<f64>,
}

impl PersonPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            age: None,
        }
    }

    pub fn age(age: f64) -> Self {
        Self {
            name: None,
            age: Some(age),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }

    /// Produce the updated record. Identity and creation time are never touched.
    pub fn apply(&self, person: &Person) -> Result<Person, PersonValidationError> {
        let mut updated = person.clone();
        if let Some(name) = &self.name {
            validate_name(name)?;
            updated.name = name.clone();
        }
        if let Some(age) = self.age {
            validate_age(age)?;
            updated.age = age;
        }
        Ok(updated)
    }
}

/// Accepts the age as a number or as numeric text (`"30"`).
fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("age must be a number, got {:?}", s))),
    }
}

fn validate_name(name: &str) -> Result<(), PersonValidationError> {
    if name.trim().is_empty() {
        return Err(PersonValidationError::EmptyName);
    }
    Ok(())
}

fn validate_age(age: f64) -> Result<(), PersonValidationError> {
    if !age.is_finite() {
        return Err(PersonValidationError::InvalidAge(age));
    }
    Ok(())
}

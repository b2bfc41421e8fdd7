use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::people;
use crate::models::{Person, PersonId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PersonRow {
    pub id: String,
    pub name: String,
    pub age: f64,
    pub created_at: DateTime<Utc>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: PersonId(row.id),
            name: row.name,
            age: row.age,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = people)]
pub struct NewPersonRow {
    pub id: String,
    pub name: String,
    pub age: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&Person> for NewPersonRow {
    fn from(person: &Person) -> Self {
        NewPersonRow {
            id: person.id.0.clone(),
            name: person.name.clone(),
            age: person.age,
            created_at: person.created_at,
        }
    }
}

/// Mutable columns only; identity and creation time are never rewritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = people)]
pub struct PersonChangeset {
    pub name: String,
    pub age: f64,
}

impl From<&Person> for PersonChangeset {
    fn from(person: &Person) -> Self {
        PersonChangeset {
            name: person.name.clone(),
            age: person.age,
        }
    }
}

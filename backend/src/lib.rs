//! # People API
//!
//! A small REST service exposing CRUD operations over a single "people"
//! collection.
//!
//! ## Architecture
//!
//! - [`models`]: The [`Person`](models::Person) record and its create/update payloads
//! - [`db`]: Repository pattern, service layer and storage backends
//!   (in-memory by default, Postgres via Diesel behind `postgres-repo`)
//! - [`http`]: Axum router, handlers and error mapping
//!
//! ## Endpoints
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/users` | 200, array of people |
//! | GET | `/users/{id}` | 200, one person |
//! | POST | `/users` | 201, created person |
//! | PATCH | `/users/{id}` | 200, updated person |
//! | DELETE | `/users/{id}` | 200, `{"message":"deleted"}` |
//! | GET | `/health` | 200, service and database status |

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;

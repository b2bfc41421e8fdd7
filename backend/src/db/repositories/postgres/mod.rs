//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic migration execution
//! - Single-record transactions for updates
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::{debug, info};
use std::time::Duration;
use tokio::task;

use crate::db::repository::{ErrorContext, PersonRepository, RepositoryError, RepositoryResult};
use crate::models::{NewPerson, Person, PersonId, PersonPatch};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("URL"))
            .map_err(|_| "DATABASE_URL or URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        info!(
            "Postgres repository ready (pool max={}, min={})",
            config.max_pool_size, config.min_pool_size
        );
        Ok(Self { pool })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;
            f(&mut conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn not_found(id: &str) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Person {} not found", id),
        ErrorContext::default()
            .with_entity("person")
            .with_entity_id(id),
    )
}

#[async_trait]
impl PersonRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn insert_person(&self, person: NewPerson) -> RepositoryResult<Person> {
        let person = person.into_person(PersonId::generate(), Utc::now());
        self.with_conn("insert_person", move |conn| {
            let row: PersonRow = diesel::insert_into(people::table)
                .values(NewPersonRow::from(&person))
                .returning(PersonRow::as_returning())
                .get_result(conn)?;
            debug!("Inserted person {}", row.id);
            Ok(row.into())
        })
        .await
    }

    async fn list_people(&self) -> RepositoryResult<Vec<Person>> {
        self.with_conn("list_people", |conn| {
            let rows: Vec<PersonRow> = people::table
                .order(people::seq.asc())
                .select(PersonRow::as_select())
                .load(conn)?;
            Ok(rows.into_iter().map(Person::from).collect())
        })
        .await
    }

    async fn get_person(&self, id: &PersonId) -> RepositoryResult<Person> {
        let id = id.0.clone();
        self.with_conn("get_person", move |conn| {
            people::table
                .find(&id)
                .select(PersonRow::as_select())
                .first::<PersonRow>(conn)
                .optional()?
                .map(Person::from)
                .ok_or_else(|| not_found(&id))
        })
        .await
    }

    async fn update_person(&self, id: &PersonId, patch: &PersonPatch) -> RepositoryResult<Person> {
        let id = id.0.clone();
        let patch = patch.clone();
        self.with_conn("update_person", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let current: Person = people::table
                    .find(&id)
                    .select(PersonRow::as_select())
                    .for_update()
                    .first::<PersonRow>(tx)
                    .optional()?
                    .map(Person::from)
                    .ok_or_else(|| not_found(&id))?;

                let updated = patch.apply(&current)?;
                diesel::update(people::table.find(&id))
                    .set(PersonChangeset::from(&updated))
                    .execute(tx)?;
                Ok(updated)
            })
        })
        .await
    }

    async fn delete_person(&self, id: &PersonId) -> RepositoryResult<()> {
        let id = id.0.clone();
        self.with_conn("delete_person", move |conn| {
            let deleted = diesel::delete(people::table.find(&id)).execute(conn)?;
            if deleted == 0 {
                return Err(not_found(&id));
            }
            Ok(())
        })
        .await
    }
}

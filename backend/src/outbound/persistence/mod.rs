//! PostgreSQL persistence adapter built on Diesel and `diesel-async`.

pub mod diesel_entry_repository;
pub mod pool;
pub mod rows;
pub mod schema;

pub use diesel_entry_repository::DieselEntryRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Error raised while applying schema migrations at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to run database migrations: {message}")]
pub struct MigrationError {
    message: String,
}

impl MigrationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Apply any pending migrations against the configured database.
///
/// Migrations run on a dedicated blocking thread; the synchronous Diesel
/// harness must not execute on the async runtime's workers.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url)
            .map_err(|err| MigrationError::new(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| MigrationError::new(err.to_string()))
    })
    .await
    .map_err(|err| MigrationError::new(err.to_string()))?
}

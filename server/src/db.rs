use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to create database pool: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("Failed to run database migrations: {0}")]
    Migration(String),
}

/// Per-connection SQLite settings, applied whenever the pool opens a connection.
#[derive(Debug)]
struct SqlitePragmas {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        // Writers wait on a locked database instead of failing with SQLITE_BUSY.
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn create_pool(config: &DatabaseConfig) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.path);
    let customizer = Box::new(SqlitePragmas {
        busy_timeout_ms: config.busy_timeout_ms,
    });

    let pool = if config.is_in_memory() {
        // Every in-memory connection is its own database, so keep exactly one alive.
        tracing::warn!("Using an in-memory database; data is lost on shutdown");
        r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(customizer)
            .build(manager)?
    } else {
        r2d2::Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(customizer)
            .build(manager)?
    };

    // Run pending migrations on startup
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::Migration(e.to_string()))?;
    for migration in applied {
        tracing::info!("Applied migration {}", migration);
    }

    tracing::info!(
        path = %config.path,
        max_size = pool.max_size(),
        "Database pool ready"
    );

    Ok(pool)
}

//! Database migration command.
//!
//! Runs the schema migrations from `crates/web/migrations/` and then lets
//! the session store create its own table.
//!
//! # Usage
//!
//! ```bash
//! clover-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CLOVER_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use tower_sessions_sqlx_store::PostgresStore;

use clover_web::db;

use super::{CliError, database_url};

/// Run all database migrations.
///
/// # Errors
///
/// Returns `CliError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

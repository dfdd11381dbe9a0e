//! Admin account management commands.
//!
//! Registration over HTTP only ever creates regular accounts; the admin role
//! is granted here, from the operator's shell.
//!
//! # Usage
//!
//! ```bash
//! clover-cli admin create -u store_admin -p 'a long password'
//! ```
//!
//! # Environment Variables
//!
//! - `CLOVER_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use clover_web::db;
use clover_web::services::AuthService;

use super::{CliError, database_url};

/// Create a new admin account.
///
/// # Errors
///
/// Returns `CliError` if the username is invalid or taken, the password is
/// too weak, or the database is unreachable.
pub async fn create(username: &str, password: &str) -> Result<(), CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let auth = AuthService::new(&pool);
    let user = auth.create_admin(username, password).await?;

    tracing::info!(id = %user.id, username = %user.username, "admin account created");
    Ok(())
}

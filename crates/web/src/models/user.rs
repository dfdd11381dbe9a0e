//! User domain types.

use chrono::{DateTime, Utc};

use clover_core::{Role, UserId, Username};

/// A registered account (domain type).
///
/// The password hash is deliberately not part of this type; it only surfaces
/// through [`crate::db::users::UserRepository::get_password_hash`] during
/// login.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique and matched case-sensitively.
    pub username: Username,
    /// Permission level.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

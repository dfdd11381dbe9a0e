//! HTTP middleware and request extractors.
//!
//! - [`session`] - tower-sessions layer backed by `PostgreSQL`
//! - [`auth`] - extractors supplying request-scoped identity to handlers

pub mod auth;
pub mod session;

pub use auth::{OptionalUser, RequireAdmin, RequireUser, clear_current_user, set_current_user};
pub use session::create_session_layer;

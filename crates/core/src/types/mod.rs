//! Core types for Clover Market.

pub mod id;
pub mod price;
pub mod role;
pub mod username;

pub use id::{ProductId, UserId};
pub use price::{Price, PriceError};
pub use role::{Role, RoleParseError};
pub use username::{Username, UsernameError};

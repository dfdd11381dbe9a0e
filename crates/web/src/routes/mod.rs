//! HTTP route handlers for the catalog site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                      - Product listing (public)
//! GET  /view_product/{id}     - Product detail (public)
//!
//! # Catalog management
//! GET  /add_product           - Add form (logged-in)
//! POST /add_product           - Create product + save image (logged-in)
//! GET  /edit_product/{id}     - Pre-filled form (admin)
//! POST /edit_product/{id}     - Update product + replace image (admin)
//! GET  /delete_product/{id}   - Delete product, redirect home (admin)
//!
//! # Auth
//! GET  /register              - Registration page
//! POST /register              - Create account, redirect to login
//! GET  /login                 - Login page (honors ?next=)
//! POST /login                 - Authenticate, redirect to next or home
//! GET  /logout                - Clear session, redirect home (logged-in)
//!
//! # Pages
//! GET  /about                 - Informational page (logged-in)
//! ```
//!
//! One-time messages are carried across redirects as `?error=` / `?success=`
//! query codes and translated to copy when the form is rendered.

pub mod auth;
pub mod home;
pub mod pages;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the catalog site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/view_product/{id}", get(products::view))
        .route("/add_product", get(products::add_page).post(products::add))
        .route(
            "/edit_product/{id}",
            get(products::edit_page).post(products::edit),
        )
        .route("/delete_product/{id}", get(products::delete))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/about", get(pages::about))
}

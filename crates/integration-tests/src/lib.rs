//! Integration tests for Clover Market.
//!
//! # Running Tests
//!
//! The tests drive a live server over HTTP, so they are `#[ignore]`d by
//! default. To run them:
//!
//! ```bash
//! # 1. Start the database and apply migrations
//! cargo run -p clover-cli -- migrate
//!
//! # 2. Create the admin account the tests log in with
//! cargo run -p clover-cli -- admin create -u store_admin -p 'integration tests'
//!
//! # 3. Start the server
//! cargo run -p clover-web
//!
//! # 4. Run the suite
//! cargo test -p clover-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `CLOVER_BASE_URL` - Server under test (default: http://localhost:3000)
//! - `CLOVER_TEST_ADMIN_USERNAME` - Admin login (default: store_admin)
//! - `CLOVER_TEST_ADMIN_PASSWORD` - Admin password (default: integration tests)

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, redirect};

/// Base URL for the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CLOVER_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Admin credentials the suite logs in with.
///
/// The account must exist; see the crate docs for the `clover-cli` call.
#[must_use]
pub fn admin_credentials() -> (String, String) {
    let username = std::env::var("CLOVER_TEST_ADMIN_USERNAME")
        .unwrap_or_else(|_| "store_admin".to_string());
    let password = std::env::var("CLOVER_TEST_ADMIN_PASSWORD")
        .unwrap_or_else(|_| "integration tests".to_string());
    (username, password)
}

/// A username that no earlier run has registered.
///
/// # Panics
///
/// Panics if the system clock is before the Unix epoch.
#[must_use]
pub fn unique_username(prefix: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before Unix epoch")
        .subsec_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{nanos}-{n}")
}

/// A cookie-holding client that follows redirects, for walking flows.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A cookie-holding client that does NOT follow redirects, for asserting on
/// redirect targets.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Register an account through the site, panicking on transport errors.
pub async fn register(client: &Client, username: &str, password: &str) {
    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("register request failed");
    assert!(resp.status().is_success(), "register flow broke");
}

/// Log in through the site, panicking on transport errors.
pub async fn login(client: &Client, username: &str, password: &str) {
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("login request failed");
    assert!(resp.status().is_success(), "login flow broke");
}

/// Scan the home page for the ID of the product with the given name.
///
/// Walks every `/view_product/{id}` link on the listing and checks the
/// detail page, so product names used in tests should be unique.
pub async fn find_product_id(client: &Client, name: &str) -> Option<i32> {
    let body = client
        .get(format!("{}/", base_url()))
        .send()
        .await
        .expect("home request failed")
        .text()
        .await
        .expect("home body unreadable");

    for chunk in body.split("/view_product/").skip(1) {
        let digits: String = chunk.chars().take_while(char::is_ascii_digit).collect();
        let Ok(id) = digits.parse::<i32>() else {
            continue;
        };

        let detail = client
            .get(format!("{}/view_product/{id}", base_url()))
            .send()
            .await
            .expect("detail request failed")
            .text()
            .await
            .expect("detail body unreadable");
        if detail.contains(name) {
            return Some(id);
        }
    }

    None
}

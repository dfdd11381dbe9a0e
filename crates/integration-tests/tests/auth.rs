//! Integration tests for registration, login, and logout.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p clover-web)
//!
//! Run with: cargo test -p clover-integration-tests -- --ignored

use clover_integration_tests::{base_url, client, login, manual_redirect_client, register, unique_username};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn register_then_login_reaches_protected_page() {
    let client = client();
    let username = unique_username("reg");

    register(&client, &username, "a long password").await;
    login(&client, &username, "a long password").await;

    let resp = client
        .get(format!("{}/about", base_url()))
        .send()
        .await
        .expect("about request failed");

    assert!(resp.status().is_success());
    let body = resp.text().await.expect("about body unreadable");
    assert!(body.contains("About Clover Market"));
    assert!(body.contains(&username));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn register_duplicate_username_is_rejected() {
    let client = client();
    let username = unique_username("dup");

    register(&client, &username, "a long password").await;

    // Second registration with the same name lands back on the form
    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[("username", username.as_str()), ("password", "a long password")])
        .send()
        .await
        .expect("register request failed");

    assert!(resp.url().as_str().contains("error=username_taken"));
    let body = resp.text().await.expect("register body unreadable");
    assert!(body.contains("Username is already taken"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn login_with_wrong_password_leaves_no_session() {
    let client = client();
    let username = unique_username("wrongpw");

    register(&client, &username, "a long password").await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username.as_str()), ("password", "not the password")])
        .send()
        .await
        .expect("login request failed");

    assert!(resp.url().as_str().contains("error=credentials"));
    let body = resp.text().await.expect("login body unreadable");
    assert!(body.contains("Login failed"));

    // No session was established: the protected page bounces to login
    let resp = client
        .get(format!("{}/about", base_url()))
        .send()
        .await
        .expect("about request failed");
    assert!(resp.url().path().starts_with("/login"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn login_honors_next_redirect_target() {
    let client = client();
    let username = unique_username("next");

    register(&client, &username, "a long password").await;

    let manual = manual_redirect_client();
    let resp = manual
        .post(format!("{}/login?next=%2Fabout", base_url()))
        .form(&[("username", username.as_str()), ("password", "a long password")])
        .send()
        .await
        .expect("login request failed");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/about");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn logout_clears_the_session() {
    let client = client();
    let username = unique_username("logout");

    register(&client, &username, "a long password").await;
    login(&client, &username, "a long password").await;

    let resp = client
        .get(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("logout request failed");
    assert!(resp.status().is_success());

    let resp = client
        .get(format!("{}/about", base_url()))
        .send()
        .await
        .expect("about request failed");
    assert!(resp.url().path().starts_with("/login"));
}

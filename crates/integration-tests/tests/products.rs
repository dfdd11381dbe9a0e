//! Integration tests for the product catalog.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p clover-web)
//! - The admin account from `clover-cli admin create` (see crate docs)
//!
//! Run with: cargo test -p clover-integration-tests -- --ignored

use reqwest::multipart;

use clover_integration_tests::{
    admin_credentials, base_url, client, find_product_id, login, manual_redirect_client, register,
    unique_username,
};

/// A one-pixel-ish fake image payload.
const IMAGE_BYTES: &[u8] = b"not really a png, nobody checks";

fn product_form(name: &str, price: &str, filename: &str) -> multipart::Form {
    multipart::Form::new()
        .text("name", name.to_owned())
        .text("price", price.to_owned())
        .part(
            "img",
            multipart::Part::bytes(IMAGE_BYTES.to_vec()).file_name(filename.to_owned()),
        )
}

async fn admin_client() -> reqwest::Client {
    let client = client();
    let (username, password) = admin_credentials();
    login(&client, &username, &password).await;
    client
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn add_product_appears_in_listing_and_detail() {
    let admin = admin_client().await;
    let name = format!("Widget {}", unique_username("w"));

    let resp = admin
        .post(format!("{}/add_product", base_url()))
        .multipart(product_form(&name, "9.99", "w.png"))
        .send()
        .await
        .expect("add request failed");
    assert!(resp.url().as_str().contains("success=created"));

    let home = admin
        .get(format!("{}/", base_url()))
        .send()
        .await
        .expect("home request failed")
        .text()
        .await
        .expect("home body unreadable");
    assert!(home.contains(&name));
    assert!(home.contains("$9.99"));

    let id = find_product_id(&admin, &name)
        .await
        .expect("created product not found in listing");
    let detail = admin
        .get(format!("{}/view_product/{id}", base_url()))
        .send()
        .await
        .expect("detail request failed")
        .text()
        .await
        .expect("detail body unreadable");
    assert!(detail.contains(&name));
    assert!(detail.contains("$9.99"));
    assert!(detail.contains("/static/w.png"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn uploaded_image_is_served_from_static() {
    let admin = admin_client().await;
    let name = format!("Pictured {}", unique_username("p"));

    admin
        .post(format!("{}/add_product", base_url()))
        .multipart(product_form(&name, "3.00", "pictured.png"))
        .send()
        .await
        .expect("add request failed");

    let resp = admin
        .get(format!("{}/static/pictured.png", base_url()))
        .send()
        .await
        .expect("static request failed");
    assert!(resp.status().is_success());
    let bytes = resp.bytes().await.expect("static body unreadable");
    assert_eq!(bytes.as_ref(), IMAGE_BYTES);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn edit_product_overwrites_fields() {
    let admin = admin_client().await;
    let name = format!("Before {}", unique_username("e"));

    admin
        .post(format!("{}/add_product", base_url()))
        .multipart(product_form(&name, "5.00", "before.png"))
        .send()
        .await
        .expect("add request failed");
    let id = find_product_id(&admin, &name)
        .await
        .expect("created product not found in listing");

    let renamed = format!("After {}", unique_username("e"));
    let resp = admin
        .post(format!("{}/edit_product/{id}", base_url()))
        .multipart(product_form(&renamed, "6.50", "after.png"))
        .send()
        .await
        .expect("edit request failed");
    assert!(resp.status().is_success());

    let detail = admin
        .get(format!("{}/view_product/{id}", base_url()))
        .send()
        .await
        .expect("detail request failed")
        .text()
        .await
        .expect("detail body unreadable");
    assert!(detail.contains(&renamed));
    assert!(detail.contains("$6.50"));
    assert!(detail.contains("/static/after.png"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn delete_product_yields_not_found() {
    let admin = admin_client().await;
    let name = format!("Doomed {}", unique_username("d"));

    admin
        .post(format!("{}/add_product", base_url()))
        .multipart(product_form(&name, "1.00", "doomed.png"))
        .send()
        .await
        .expect("add request failed");
    let id = find_product_id(&admin, &name)
        .await
        .expect("created product not found in listing");

    let resp = admin
        .get(format!("{}/delete_product/{id}", base_url()))
        .send()
        .await
        .expect("delete request failed");
    assert!(resp.status().is_success());

    let resp = admin
        .get(format!("{}/view_product/{id}", base_url()))
        .send()
        .await
        .expect("detail request failed");
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn edit_by_non_admin_is_indistinguishable_from_missing() {
    let admin = admin_client().await;
    let name = format!("Guarded {}", unique_username("g"));

    admin
        .post(format!("{}/add_product", base_url()))
        .multipart(product_form(&name, "2.00", "guarded.png"))
        .send()
        .await
        .expect("add request failed");
    let id = find_product_id(&admin, &name)
        .await
        .expect("created product not found in listing");

    // A regular account gets the not-found page, and nothing changes
    let customer = client();
    let username = unique_username("cust");
    register(&customer, &username, "a long password").await;
    login(&customer, &username, "a long password").await;

    let resp = customer
        .post(format!("{}/edit_product/{id}", base_url()))
        .multipart(product_form("Hijacked", "0.01", "evil.png"))
        .send()
        .await
        .expect("edit request failed");
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    let detail = customer
        .get(format!("{}/view_product/{id}", base_url()))
        .send()
        .await
        .expect("detail request failed")
        .text()
        .await
        .expect("detail body unreadable");
    assert!(detail.contains(&name));
    assert!(!detail.contains("Hijacked"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn delete_by_non_admin_is_indistinguishable_from_missing() {
    let admin = admin_client().await;
    let name = format!("Kept {}", unique_username("k"));

    admin
        .post(format!("{}/add_product", base_url()))
        .multipart(product_form(&name, "2.00", "kept.png"))
        .send()
        .await
        .expect("add request failed");
    let id = find_product_id(&admin, &name)
        .await
        .expect("created product not found in listing");

    let customer = client();
    let username = unique_username("cust");
    register(&customer, &username, "a long password").await;
    login(&customer, &username, "a long password").await;

    let resp = customer
        .get(format!("{}/delete_product/{id}", base_url()))
        .send()
        .await
        .expect("delete request failed");
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    // Still there
    let resp = customer
        .get(format!("{}/view_product/{id}", base_url()))
        .send()
        .await
        .expect("detail request failed");
    assert!(resp.status().is_success());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn add_product_requires_login() {
    let guest = manual_redirect_client();

    let resp = guest
        .get(format!("{}/add_product", base_url()))
        .send()
        .await
        .expect("add page request failed");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.starts_with("/login?next="));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn missing_product_renders_not_found_page() {
    let guest = client();

    let resp = guest
        .get(format!("{}/view_product/999999999", base_url()))
        .send()
        .await
        .expect("detail request failed");

    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("body unreadable");
    assert!(body.contains("We couldn't find that page."));
}

//! Product route handlers.
//!
//! Viewing is public; adding requires any logged-in session; editing and
//! deleting require the admin role.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use clover_core::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalUser, RequireAdmin, RequireUser};
use crate::models::{CurrentUser, Product};
use crate::services::CatalogService;
use crate::services::catalog::{CatalogError, ImageUpload, ProductForm};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for one-time message display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub current_user: Option<CurrentUser>,
    pub product: Product,
}

/// Shared add/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "product_form.html")]
pub struct ProductFormTemplate {
    pub current_user: Option<CurrentUser>,
    pub title: &'static str,
    pub action: String,
    pub name: String,
    pub price: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Public Routes
// =============================================================================

/// Display a single product, or the not-found page.
pub async fn view(
    State(state): State<AppState>,
    OptionalUser(current_user): OptionalUser,
    Path(id): Path<i32>,
) -> Result<ProductTemplate> {
    let catalog = CatalogService::new(state.pool(), state.static_dir());
    let product = catalog.get(ProductId::new(id)).await?;

    Ok(ProductTemplate {
        current_user,
        product,
    })
}

// =============================================================================
// Add Product (any logged-in user)
// =============================================================================

/// Display the add-product form.
pub async fn add_page(
    RequireUser(user): RequireUser,
    Query(query): Query<MessageQuery>,
) -> ProductFormTemplate {
    ProductFormTemplate {
        current_user: Some(user),
        title: "Add product",
        action: "/add_product".to_owned(),
        name: String::new(),
        price: String::new(),
        error: translate(query.error.as_deref(), error_message),
        success: translate(query.success.as_deref(), success_message),
    }
}

/// Handle add-product form submission.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn add(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;

    let catalog = CatalogService::new(state.pool(), state.static_dir());
    match catalog.add(form).await {
        Ok(_) => Ok(Redirect::to("/add_product?success=created").into_response()),
        Err(e) => match form_error_code(&e) {
            Some(code) => Ok(Redirect::to(&format!("/add_product?error={code}")).into_response()),
            None => Err(e.into()),
        },
    }
}

// =============================================================================
// Edit Product (admin only)
// =============================================================================

/// Display the edit-product form, pre-filled with current values.
pub async fn edit_page(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<MessageQuery>,
) -> Result<ProductFormTemplate> {
    let catalog = CatalogService::new(state.pool(), state.static_dir());
    let product = catalog.get(ProductId::new(id)).await?;

    Ok(ProductFormTemplate {
        current_user: Some(admin),
        title: "Edit product",
        action: format!("/edit_product/{id}"),
        name: product.name,
        price: product.price.to_string(),
        error: translate(query.error.as_deref(), error_message),
        success: None,
    })
}

/// Handle edit-product form submission.
///
/// The previous image file stays behind on disk; only the row's reference
/// moves to the newly uploaded file.
#[instrument(skip_all, fields(user = %admin.username, id = id))]
pub async fn edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_form(multipart).await?;

    let catalog = CatalogService::new(state.pool(), state.static_dir());
    match catalog.update(ProductId::new(id), form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) => match form_error_code(&e) {
            Some(code) => {
                Ok(Redirect::to(&format!("/edit_product/{id}?error={code}")).into_response())
            }
            None => Err(e.into()),
        },
    }
}

// =============================================================================
// Delete Product (admin only)
// =============================================================================

/// Delete a product and return to the listing.
///
/// The image file is not removed from the static directory.
#[instrument(skip_all, fields(user = %admin.username, id = id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let catalog = CatalogService::new(state.pool(), state.static_dir());
    catalog.delete(ProductId::new(id)).await?;

    Ok(Redirect::to("/"))
}

// =============================================================================
// Form Handling
// =============================================================================

/// Collect the product form fields from a multipart body.
async fn read_form(mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => {
                form.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
            }
            "price" => {
                form.price = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
            }
            "img" => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
                if !filename.is_empty() {
                    form.image = Some(ImageUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Map a validation failure to its redirect code; `None` means the error is
/// not a form problem and should propagate.
fn form_error_code(e: &CatalogError) -> Option<&'static str> {
    match e {
        CatalogError::InvalidName => Some("name"),
        CatalogError::InvalidPrice(_) => Some("price"),
        CatalogError::MissingImage => Some("image"),
        _ => None,
    }
}

fn translate(code: Option<&str>, table: fn(&str) -> &'static str) -> Option<String> {
    code.map(|c| table(c).to_owned())
}

fn error_message(code: &str) -> &'static str {
    match code {
        "name" => "Product name is required.",
        "price" => "Enter a valid, non-negative price.",
        "image" => "An image file is required.",
        _ => "Something went wrong. Please try again.",
    }
}

fn success_message(code: &str) -> &'static str {
    match code {
        "created" => "Product added to the catalog.",
        _ => "Done.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_codes() {
        assert_eq!(form_error_code(&CatalogError::InvalidName), Some("name"));
        assert_eq!(form_error_code(&CatalogError::MissingImage), Some("image"));
        assert_eq!(form_error_code(&CatalogError::NotFound), None);
    }

    #[test]
    fn test_translate() {
        assert_eq!(
            translate(Some("name"), error_message).as_deref(),
            Some("Product name is required.")
        );
        assert_eq!(translate(None, error_message), None);
    }
}

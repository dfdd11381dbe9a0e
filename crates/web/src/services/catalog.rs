//! Catalog service.
//!
//! CRUD over the product catalog, plus persistence of uploaded image files
//! into the static asset directory.

use std::path::{Path, PathBuf};

use sqlx::PgPool;
use thiserror::Error;
use tokio::fs;

use clover_core::{Price, PriceError, ProductId};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::models::Product;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the requested ID.
    #[error("product not found")]
    NotFound,

    /// Product name is empty.
    #[error("product name cannot be empty")]
    InvalidName,

    /// Submitted price is not a valid amount.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// No usable image file was submitted.
    #[error("an image file is required")]
    MissingImage,

    /// Writing the image file failed.
    #[error("failed to store image: {0}")]
    Image(#[from] std::io::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CatalogError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// An uploaded image file, as received from the form.
#[derive(Debug)]
pub struct ImageUpload {
    /// Client-supplied filename.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Submitted product fields, unvalidated.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub image: Option<ImageUpload>,
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
    static_dir: PathBuf,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub fn new(pool: &'a PgPool, static_dir: &Path) -> Self {
        Self {
            products: ProductRepository::new(pool),
            static_dir: static_dir.to_path_buf(),
        }
    }

    /// List all products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the database operation fails.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list().await?)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products.get(id).await?.ok_or(CatalogError::NotFound)
    }

    /// Validate the form, store its image, and create a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidName` / `InvalidPrice` / `MissingImage`
    /// on validation failure, `CatalogError::Image` if the file write fails.
    pub async fn add(&self, form: ProductForm) -> Result<Product, CatalogError> {
        let (name, price, image) = validate(form)?;
        let img = self.store_image(&image).await?;

        let product = self.products.create(&name, price, &img).await?;

        tracing::info!(id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Validate the form, store its image, and overwrite an existing product.
    ///
    /// The previously stored image file is left behind on disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID, plus the
    /// same validation errors as [`Self::add`].
    pub async fn update(&self, id: ProductId, form: ProductForm) -> Result<Product, CatalogError> {
        let (name, price, image) = validate(form)?;
        let img = self.store_image(&image).await?;

        let product = self.products.update(id, &name, price, &img).await?;

        tracing::info!(id = %product.id, name = %product.name, "product updated");
        Ok(product)
    }

    /// Delete a product.
    ///
    /// The image file is not removed from the static directory.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this ID.
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        if !self.products.delete(id).await? {
            return Err(CatalogError::NotFound);
        }

        tracing::info!(%id, "product deleted");
        Ok(())
    }

    /// Write the uploaded image into the static directory under its original
    /// filename, returning the stored name.
    ///
    /// An existing file of the same name is overwritten; concurrent uploads
    /// of the same name race, last write wins.
    async fn store_image(&self, image: &ImageUpload) -> Result<String, CatalogError> {
        let name = image_file_name(&image.filename).ok_or(CatalogError::MissingImage)?;

        fs::create_dir_all(&self.static_dir).await?;
        fs::write(self.static_dir.join(&name), &image.bytes).await?;

        Ok(name)
    }
}

/// Check submitted fields, returning the cleaned name, parsed price, and image.
fn validate(form: ProductForm) -> Result<(String, Price, ImageUpload), CatalogError> {
    let name = form.name.trim().to_owned();
    if name.is_empty() {
        return Err(CatalogError::InvalidName);
    }

    let price = Price::parse(&form.price)?;

    let image = form.image.ok_or(CatalogError::MissingImage)?;
    if image.bytes.is_empty() {
        return Err(CatalogError::MissingImage);
    }

    Ok((name, price, image))
}

/// Reduce a client-supplied filename to its final path component.
///
/// Browsers send a bare basename, but the value is attacker-controlled.
fn image_file_name(raw: &str) -> Option<String> {
    let name = Path::new(raw).file_name()?.to_string_lossy().into_owned();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_name_plain() {
        assert_eq!(image_file_name("w.png").unwrap(), "w.png");
        assert_eq!(image_file_name("widget photo.jpeg").unwrap(), "widget photo.jpeg");
    }

    #[test]
    fn test_image_file_name_strips_directories() {
        assert_eq!(image_file_name("/etc/passwd").unwrap(), "passwd");
        assert_eq!(image_file_name("../../evil.png").unwrap(), "evil.png");
        assert_eq!(image_file_name("a/b/c.png").unwrap(), "c.png");
    }

    #[test]
    fn test_image_file_name_rejects_empty() {
        assert!(image_file_name("").is_none());
        assert!(image_file_name("..").is_none());
        assert!(image_file_name("/").is_none());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let form = ProductForm {
            name: "   ".to_owned(),
            price: "9.99".to_owned(),
            image: Some(ImageUpload {
                filename: "w.png".to_owned(),
                bytes: vec![1],
            }),
        };
        assert!(matches!(validate(form), Err(CatalogError::InvalidName)));
    }

    #[test]
    fn test_validate_rejects_missing_image() {
        let form = ProductForm {
            name: "Widget".to_owned(),
            price: "9.99".to_owned(),
            image: None,
        };
        assert!(matches!(validate(form), Err(CatalogError::MissingImage)));
    }

    #[test]
    fn test_validate_rejects_bad_price() {
        let form = ProductForm {
            name: "Widget".to_owned(),
            price: "cheap".to_owned(),
            image: Some(ImageUpload {
                filename: "w.png".to_owned(),
                bytes: vec![1],
            }),
        };
        assert!(matches!(validate(form), Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn test_validate_trims_name() {
        let form = ProductForm {
            name: "  Widget  ".to_owned(),
            price: "9.99".to_owned(),
            image: Some(ImageUpload {
                filename: "w.png".to_owned(),
                bytes: vec![1],
            }),
        };
        let (name, price, _) = validate(form).unwrap();
        assert_eq!(name, "Widget");
        assert_eq!(price.to_string(), "9.99");
    }
}

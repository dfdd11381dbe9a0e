//! Home page: the product listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{CurrentUser, Product};
use crate::services::CatalogService;
use crate::state::AppState;

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub products: Vec<Product>,
}

/// Display the product listing.
pub async fn home(
    State(state): State<AppState>,
    OptionalUser(current_user): OptionalUser,
) -> Result<HomeTemplate> {
    let catalog = CatalogService::new(state.pool(), state.static_dir());
    let products = catalog.list().await?;

    Ok(HomeTemplate {
        current_user,
        products,
    })
}

//! Static informational pages.

use askama::Template;
use askama_web::WebTemplate;

use crate::middleware::RequireUser;
use crate::models::CurrentUser;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Display the about page.
pub async fn about(RequireUser(user): RequireUser) -> AboutTemplate {
    AboutTemplate {
        current_user: Some(user),
    }
}

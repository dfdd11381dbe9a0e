//! Authentication route handlers.
//!
//! Handles registration, login, and logout. Identity lives in the
//! tower-session; handlers never consult global state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::{OptionalUser, RequireUser, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::AuthError;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Query parameters for the login page and action.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    /// Originally requested page, resumed after a successful login.
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<CurrentUser>,
    pub error: Option<String>,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(
    OptionalUser(current_user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> RegisterTemplate {
    RegisterTemplate {
        current_user,
        error: query.error.as_deref().map(|c| error_message(c).to_owned()),
    }
}

/// Handle registration form submission.
///
/// On success the user is sent to the login page; no session is created yet.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.register(&form.username, &form.password).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "account created");
            Ok(Redirect::to("/login?success=registered").into_response())
        }
        Err(AuthError::UsernameTaken) => {
            Ok(Redirect::to("/register?error=username_taken").into_response())
        }
        Err(AuthError::InvalidUsername(_)) => {
            Ok(Redirect::to("/register?error=invalid_username").into_response())
        }
        Err(AuthError::WeakPassword(_)) => {
            Ok(Redirect::to("/register?error=weak_password").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalUser(current_user): OptionalUser,
    Query(query): Query<LoginQuery>,
) -> LoginTemplate {
    LoginTemplate {
        current_user,
        error: query.error.as_deref().map(|c| error_message(c).to_owned()),
        success: query.success.as_deref().map(|c| success_message(c).to_owned()),
    }
}

/// Handle login form submission.
///
/// On success the session is bound to the user's identity and the request is
/// redirected to the page carried in `?next=`, or home.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser::from(&user);
            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {e}");
                return Ok(Redirect::to("/login?error=session").into_response());
            }

            tracing::info!(username = %user.username, "login");
            Ok(Redirect::to(safe_next(query.next.as_deref())).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "login failed");

            let mut target = String::from("/login?error=credentials");
            if let Some(next) = &query.next {
                target.push_str("&next=");
                target.push_str(&urlencoding::encode(next));
            }
            Ok(Redirect::to(&target).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the identity and destroys the whole session.
pub async fn logout(RequireUser(_user): RequireUser, session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/")
}

// =============================================================================
// Helpers
// =============================================================================

/// Pick the post-login redirect target, refusing anything but a local path.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n) if n.starts_with('/') && !n.starts_with("//") => n,
        _ => "/",
    }
}

fn error_message(code: &str) -> &'static str {
    match code {
        "username_taken" => "Username is already taken. Please choose a different one.",
        "invalid_username" => "Usernames may only contain letters, digits, '.', '-' and '_'.",
        "weak_password" => "Password must be at least 8 characters.",
        "credentials" => "Login failed. Check your username and password.",
        _ => "Something went wrong. Please try again.",
    }
}

fn success_message(code: &str) -> &'static str {
    match code {
        "registered" => "Account created successfully! You can now log in.",
        _ => "Done.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next_accepts_local_paths() {
        assert_eq!(safe_next(Some("/add_product")), "/add_product");
        assert_eq!(safe_next(Some("/view_product/3?x=1")), "/view_product/3?x=1");
    }

    #[test]
    fn test_safe_next_rejects_external_targets() {
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(None), "/");
    }
}

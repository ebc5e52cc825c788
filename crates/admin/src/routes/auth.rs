//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret as _;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session::{clear_authenticated, set_authenticated};
use crate::services::auth::verify_password;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Display the login form.
#[instrument]
pub async fn login_form() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Verify the password and start an authenticated session.
///
/// A wrong password re-renders the form; the reason is not logged at a
/// level that would leak attempts into breadcrumbs.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let hash = state.config().password_hash.expose_secret();
    if verify_password(&form.password, hash).is_err() {
        tracing::info!("failed admin login attempt");
        return Ok(LoginTemplate {
            error: Some("Wrong password.".to_owned()),
        }
        .into_response());
    }

    set_authenticated(&session).await?;
    tracing::info!("admin logged in");
    Ok(Redirect::to("/").into_response())
}

/// End the session and return to the login form.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_authenticated(&session).await?;
    Ok(Redirect::to("/auth/login"))
}

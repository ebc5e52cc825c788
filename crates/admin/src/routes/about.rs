//! About-page editor handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::content::{AboutContent, ContentSection};

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// About-page editor template.
#[derive(Template, WebTemplate)]
#[template(path = "about/edit.html")]
pub struct AboutEditTemplate {
    pub title: String,
    pub intro: String,
    pub sections_json: String,
}

/// Submitted about-page editor form.
#[derive(Debug, Deserialize)]
pub struct AboutForm {
    pub title: String,
    pub intro: String,
    /// Sections as a JSON array, edited raw.
    pub sections_json: String,
}

/// Display the about-page editor.
#[instrument(skip(state))]
pub async fn edit(_: RequireAdminAuth, State(state): State<AppState>) -> Result<AboutEditTemplate> {
    let content = match state.about().get() {
        Ok(content) => content,
        Err(RepositoryError::NotFound(_)) => AboutContent {
            title: String::new(),
            intro: String::new(),
            sections: Vec::new(),
        },
        Err(err) => return Err(err.into()),
    };

    let sections_json = serde_json::to_string_pretty(&content.sections)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AboutEditTemplate {
        title: content.title,
        intro: content.intro,
        sections_json,
    })
}

/// Validate and publish new about-page content.
#[instrument(skip(state, form))]
pub async fn update(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<AboutForm>,
) -> Result<Redirect> {
    let sections: Vec<ContentSection> = serde_json::from_str(&form.sections_json)
        .map_err(|e| AppError::BadRequest(format!("sections are not valid JSON: {e}")))?;

    let content = AboutContent {
        title: form.title.trim().to_owned(),
        intro: form.intro.trim().to_owned(),
        sections,
    };

    state.about().save(&content)?;
    Ok(Redirect::to("/about"))
}

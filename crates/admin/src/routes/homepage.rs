//! Homepage editor handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::content::{ContentSection, HeroSection, HomepageContent};
use atelier_core::types::ProductId;

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Homepage editor template.
#[derive(Template, WebTemplate)]
#[template(path = "homepage/edit.html")]
pub struct HomepageEditTemplate {
    pub hero: HeroSection,
    pub featured: String,
    pub sections_json: String,
}

/// Submitted homepage editor form.
#[derive(Debug, Deserialize)]
pub struct HomepageForm {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image_url: String,
    pub hero_image_hint: String,
    pub hero_cta_label: String,
    pub hero_cta_href: String,
    /// Comma-separated product ids.
    pub featured: String,
    /// Sections as a JSON array, edited raw.
    pub sections_json: String,
}

/// Display the homepage editor. An unpublished homepage starts from a blank
/// slate rather than a 404, so the first publish works like any edit.
#[instrument(skip(state))]
pub async fn edit(
    _: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<HomepageEditTemplate> {
    let content = match state.homepage().get() {
        Ok(content) => content,
        Err(RepositoryError::NotFound(_)) => blank(),
        Err(err) => return Err(err.into()),
    };

    let sections_json = serde_json::to_string_pretty(&content.sections)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HomepageEditTemplate {
        hero: content.hero,
        featured: content
            .featured_product_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        sections_json,
    })
}

/// Validate and publish new homepage content.
#[instrument(skip(state, form))]
pub async fn update(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<HomepageForm>,
) -> Result<Redirect> {
    let sections: Vec<ContentSection> = serde_json::from_str(&form.sections_json)
        .map_err(|e| AppError::BadRequest(format!("sections are not valid JSON: {e}")))?;

    let content = HomepageContent {
        hero: HeroSection {
            title: form.hero_title.trim().to_owned(),
            subtitle: form.hero_subtitle.trim().to_owned(),
            image_url: form.hero_image_url.trim().to_owned(),
            image_hint: form.hero_image_hint.trim().to_owned(),
            cta_label: form.hero_cta_label.trim().to_owned(),
            cta_href: form.hero_cta_href.trim().to_owned(),
        },
        sections,
        featured_product_ids: form
            .featured
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ProductId::from)
            .collect(),
    };

    state.homepage().save(&content)?;
    Ok(Redirect::to("/homepage"))
}

fn blank() -> HomepageContent {
    HomepageContent {
        hero: HeroSection {
            title: String::new(),
            subtitle: String::new(),
            image_url: String::new(),
            image_hint: String::new(),
            cta_label: String::new(),
            cta_href: String::new(),
        },
        sections: Vec::new(),
        featured_product_ids: Vec::new(),
    }
}

//! Static page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use atelier_core::content::ContentSection;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub title: String,
    pub intro: String,
    pub sections: Vec<ContentSection>,
}

/// Display the about page.
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> Result<AboutTemplate> {
    let about = state.content().about().await?;
    Ok(AboutTemplate {
        title: about.title.clone(),
        intro: about.intro.clone(),
        sections: about.sections.clone(),
    })
}

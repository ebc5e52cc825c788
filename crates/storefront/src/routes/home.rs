//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use atelier_core::content::{ContentSection, HeroSection};

use crate::error::Result;
use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub hero: HeroSection,
    pub sections: Vec<ContentSection>,
    pub featured: Vec<ProductCardView>,
}

/// Display the home page: hero, editorial sections, featured products.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let homepage = state.content().homepage().await?;
    let catalog = state.content().catalog().await?;

    let mut featured = Vec::new();
    for id in &homepage.featured_product_ids {
        match catalog.get(id) {
            Some(product) => featured.push(ProductCardView::from(product)),
            None => tracing::warn!("featured product {id} is not in the catalog"),
        }
    }

    Ok(HomeTemplate {
        hero: homepage.hero.clone(),
        sections: homepage.sections.clone(),
        featured,
    })
}

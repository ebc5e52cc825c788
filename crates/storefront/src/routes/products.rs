//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::content::Product;
use atelier_core::types::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product card data for listing templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
    pub image_hint: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format!("${:.2}", product.price),
            image_url: product.image_url.clone(),
            image_hint: product.image_hint.clone(),
        }
    }
}

/// Product detail data for the show template.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub image_hint: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format!("${:.2}", product.price),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            image_hint: product.image_hint.clone(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<String>,
    pub active_category: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub related: Vec<ProductCardView>,
}

/// Display product listing page, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<ProductsIndexTemplate> {
    let catalog = state.content().catalog().await?;

    let products = catalog
        .products
        .iter()
        .filter(|p| {
            query
                .category
                .as_ref()
                .is_none_or(|category| p.category == *category)
        })
        .map(ProductCardView::from)
        .collect();

    Ok(ProductsIndexTemplate {
        products,
        categories: catalog.categories(),
        active_category: query.category,
    })
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.content().catalog().await?;
    let id = ProductId::new(id);

    let product = catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    // Same-category products, excluding the one on display.
    let related = catalog
        .products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(4)
        .map(ProductCardView::from)
        .collect();

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(product),
        related,
    })
}

//! Product catalog editor handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use atelier_core::content::Product;
use atelier_core::types::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Product row for the list template.
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub variant_count: usize,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format!("${:.2}", product.price),
            variant_count: product.sizes.len() * product.colors.len(),
        }
    }
}

/// Form values for the product editor, echoed back on edit.
#[derive(Clone, Default)]
pub struct ProductFormView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub image_hint: String,
    pub sizes: String,
    pub colors: String,
}

impl From<&Product> for ProductFormView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format!("{:.2}", product.price),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            image_hint: product.image_hint.clone(),
            sizes: product.sizes.join(", "),
            colors: product.colors.join(", "),
        }
    }
}

/// Submitted product editor form.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub image_hint: String,
    /// Comma-separated size labels.
    pub sizes: String,
    /// Comma-separated color labels.
    pub colors: String,
}

impl ProductForm {
    fn into_product(self) -> Result<Product> {
        let price = self
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_| AppError::BadRequest(format!("'{}' is not a price", self.price)))?;

        Ok(Product {
            id: ProductId::new(self.id.trim()),
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            price,
            description: self.description.trim().to_owned(),
            image_url: self.image_url.trim().to_owned(),
            image_hint: self.image_hint.trim().to_owned(),
            sizes: parse_list(&self.sizes),
            colors: parse_list(&self.colors),
        })
    }
}

/// Split a comma-separated form field into trimmed, non-empty labels.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductRowView>,
}

/// Product editor template, shared by new and edit.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub form: ProductFormView,
    pub action: String,
    /// False on the new-product form, where the id is still editable.
    pub editing: bool,
}

/// Display the product list.
#[instrument(skip(state))]
pub async fn index(
    _: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<ProductsIndexTemplate> {
    let products = state.products().list()?;
    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
    })
}

/// Display the new-product form.
#[instrument]
pub async fn new(_: RequireAdminAuth) -> ProductFormTemplate {
    ProductFormTemplate {
        form: ProductFormView::default(),
        action: "/products".to_owned(),
        editing: false,
    }
}

/// Create a product.
#[instrument(skip(state, form))]
pub async fn create(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let product = form.into_product()?;
    if product.id.is_empty() {
        return Err(AppError::BadRequest("product id is required".to_owned()));
    }
    state.products().create(product)?;
    Ok(Redirect::to("/products"))
}

/// Display the edit form for a product.
#[instrument(skip(state))]
pub async fn edit(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductFormTemplate> {
    let product = state.products().get(&ProductId::new(id))?;
    Ok(ProductFormTemplate {
        action: format!("/products/{}", product.id),
        form: ProductFormView::from(&product),
        editing: true,
    })
}

/// Update a product.
#[instrument(skip(state, form))]
pub async fn update(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let mut product = form.into_product()?;
    // The path wins over anything submitted in the form body.
    product.id = ProductId::new(id);
    state.products().update(product)?;
    Ok(Redirect::to("/products"))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    state.products().delete(&ProductId::new(id))?;
    Ok(Redirect::to("/products"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_empties() {
        assert_eq!(parse_list("S, M ,L,,"), vec!["S", "M", "L"]);
        assert!(parse_list("  ").is_empty());
    }
}

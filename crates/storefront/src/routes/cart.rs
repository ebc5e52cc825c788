//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The serialized cart payload lives in the session; each handler hydrates a
//! `CartEngine` from it, applies one operation, and writes the payload back,
//! so every mutation is persisted before the response is produced.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use atelier_core::cart::{CartChange, CartEngine, CartStore, ItemKey, LineItem};
use atelier_core::types::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::{hydrate_cart, persist_cart};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: String,
    pub image_hint: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            name: item.name.clone(),
            size: item.size.clone(),
            color: item.color.clone(),
            quantity: item.quantity,
            price: format!("${:.2}", item.unit_price),
            line_price: format!("${:.2}", item.line_total()),
            image_url: item.image_url.clone(),
            image_hint: item.image_hint.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    pub(crate) fn from_engine<S: CartStore>(engine: &CartEngine<S>) -> Self {
        Self {
            items: engine.items().iter().map(CartItemView::from).collect(),
            subtotal: format!("${:.2}", engine.subtotal()),
            item_count: engine.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub quantity: Option<u32>,
}

/// Quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub size: String,
    pub color: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    /// Always `None` on a full page render; the items partial reads it.
    pub removed: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
    /// Toast text naming a just-removed item, if any.
    pub removed: Option<String>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let engine = hydrate_cart(&session).await;
    let cart = CartView::from_engine(&engine);
    // Writing back here lands the self-healed slot in the session when the
    // stored payload was corrupt.
    persist_cart(&session, engine).await?;
    Ok(CartShowTemplate {
        cart,
        removed: None,
    })
}

/// Add item to cart (HTMX).
///
/// The catalog is the source of truth for price, name, and imagery; the form
/// only chooses the variant. Returns the count badge with an HTMX trigger so
/// other cart fragments refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let catalog = state.content().catalog().await?;
    let product_id = ProductId::new(form.product_id);

    let product = catalog
        .get(&product_id)
        .ok_or_else(|| AppError::BadRequest("unknown product".to_string()))?;
    if !product.sizes.contains(&form.size) || !product.colors.contains(&form.color) {
        return Err(AppError::BadRequest(
            "that size/color combination is not offered".to_string(),
        ));
    }

    let item = LineItem {
        product_id,
        name: product.name.clone(),
        category: product.category.clone(),
        unit_price: product.price,
        quantity: form.quantity.unwrap_or(1),
        image_url: product.image_url.clone(),
        image_hint: product.image_hint.clone(),
        size: form.size,
        color: form.color,
    };

    let mut engine = hydrate_cart(&session).await;
    engine.add_item(item);
    let count = engine.item_count();
    persist_cart(&session, engine).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Adjust cart item quantity (HTMX).
///
/// Deltas below a quantity of 1 clamp at 1; the template disables the "−"
/// control at quantity 1, and removal is its own action.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let key = ItemKey::new(form.product_id, form.size, form.color);

    let mut engine = hydrate_cart(&session).await;
    engine.update_quantity(&key, form.delta);
    let cart = CartView::from_engine(&engine);
    persist_cart(&session, engine).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart,
            removed: None,
        },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
///
/// A matching entry is removed and named in a toast; a non-matching key is a
/// silent no-op and the fragment renders unchanged.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let key = ItemKey::new(form.product_id, form.size, form.color);

    let mut engine = hydrate_cart(&session).await;
    let removed = match engine.remove_item(&key) {
        CartChange::Removed(item) => Some(format!(
            "Removed {} ({} / {}) from your cart",
            item.name, item.size, item.color
        )),
        _ => None,
    };
    let cart = CartView::from_engine(&engine);
    persist_cart(&session, engine).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart, removed },
    )
        .into_response())
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Response> {
    let mut engine = hydrate_cart(&session).await;
    engine.clear();
    let cart = CartView::from_engine(&engine);
    persist_cart(&session, engine).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart,
            removed: None,
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> CartCountTemplate {
    let engine = hydrate_cart(&session).await;
    CartCountTemplate {
        count: engine.item_count(),
    }
}

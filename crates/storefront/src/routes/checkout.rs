//! Checkout route handlers (manual payment flow).
//!
//! There is no payment gateway: the customer fills in their details, the
//! order is appended to the order book as `pending`, and the confirmation
//! page shows the bank-transfer reference to quote.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rand::Rng as _;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use atelier_core::content::{Customer, Order, PaymentDetails};
use atelier_core::types::{Email, OrderStatus};

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::{hydrate_cart, persist_cart};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub shipping: String,
    pub total: String,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order_number: String,
    pub total: String,
    pub payment_method: String,
    pub payment_reference: String,
}

/// Display the checkout form. An empty cart has nothing to check out, so it
/// redirects back to the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let engine = hydrate_cart(&session).await;
    if engine.items().is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let shipping = state.config().shipping_fee;
    let total = engine.subtotal() + shipping;
    let cart = CartView::from_engine(&engine);
    persist_cart(&session, engine).await?;

    Ok(CheckoutTemplate {
        cart,
        shipping: format!("${shipping:.2}"),
        total: format!("${total:.2}"),
    }
    .into_response())
}

/// Place the order and render the confirmation page.
#[instrument(skip(state, session, form))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut engine = hydrate_cart(&session).await;
    if engine.items().is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let email = Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email address: {e}")))?;
    let name = form.name.trim().to_owned();
    if name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_owned()));
    }
    let address_line1 = form.address_line1.trim().to_owned();
    if address_line1.is_empty() {
        return Err(AppError::BadRequest("address is required".to_owned()));
    }

    let number = unique_order_number(&state)?;
    let subtotal = engine.subtotal();
    let shipping_fee = state.config().shipping_fee;
    let total = subtotal + shipping_fee;

    let payment = PaymentDetails {
        method: "bank_transfer".to_owned(),
        reference: number.clone(),
    };

    let order = Order {
        id: Uuid::new_v4(),
        number: number.clone(),
        created_at: Utc::now(),
        customer: Customer {
            name,
            email,
            phone: non_empty(form.phone),
            address_line1,
            address_line2: non_empty(form.address_line2),
            city: form.city.trim().to_owned(),
            postal_code: form.postal_code.trim().to_owned(),
            country: form.country.trim().to_owned(),
        },
        items: engine.items().to_vec(),
        subtotal,
        shipping_fee,
        total,
        payment: payment.clone(),
        status: OrderStatus::Pending,
    };

    state.content().append_order(order)?;
    tracing::info!(order_number = %number, "order placed");

    engine.clear();
    persist_cart(&session, engine).await?;

    Ok(ConfirmationTemplate {
        order_number: number,
        total: format!("${total:.2}"),
        payment_method: "Bank transfer".to_owned(),
        payment_reference: payment.reference,
    }
    .into_response())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Generate an order number not already present in the order book.
fn unique_order_number(state: &AppState) -> Result<String> {
    let existing = state.content().existing_order_numbers()?;
    loop {
        let number = generate_order_number();
        if !existing.contains(&number) {
            return Ok(number);
        }
    }
}

/// A short human-quotable order number: `ATL-` plus six alphanumerics.
fn generate_order_number() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("ATL-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        assert!(number.starts_with("ATL-"));
        assert_eq!(number.len(), 10);
        let suffix = &number["ATL-".len()..];
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_non_empty_trims_and_drops_blank() {
        assert_eq!(non_empty(Some("  x ".to_owned())), Some("x".to_owned()));
        assert_eq!(non_empty(Some("   ".to_owned())), None);
        assert_eq!(non_empty(None), None);
    }
}

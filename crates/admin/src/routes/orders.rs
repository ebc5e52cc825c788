//! Order book handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use atelier_core::content::Order;
use atelier_core::types::OrderStatus;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Order summary row for list templates.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: String,
    pub number: String,
    pub placed_at: String,
    pub customer_name: String,
    pub total: String,
    pub status: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            number: order.number.clone(),
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            customer_name: order.customer.name.clone(),
            total: format!("${:.2}", order.total),
            status: order.status.to_string(),
        }
    }
}

/// Order line for the detail template.
pub struct OrderLineView {
    pub name: String,
    pub variant: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Full order detail for the show template.
pub struct OrderDetailView {
    pub id: String,
    pub number: String,
    pub placed_at: String,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub address: Vec<String>,
    pub lines: Vec<OrderLineView>,
    pub subtotal: String,
    pub shipping_fee: String,
    pub total: String,
    pub payment_method: String,
    pub payment_reference: String,
    /// Statuses this order may move to next.
    pub next_statuses: Vec<String>,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let mut address = vec![order.customer.address_line1.clone()];
        if let Some(line2) = &order.customer.address_line2 {
            address.push(line2.clone());
        }
        address.push(format!(
            "{} {}",
            order.customer.city, order.customer.postal_code
        ));
        address.push(order.customer.country.clone());

        let lines = order
            .items
            .iter()
            .map(|item| OrderLineView {
                name: item.name.clone(),
                variant: format!("{} / {}", item.size, item.color),
                quantity: item.quantity,
                line_total: format!("${:.2}", item.line_total()),
            })
            .collect();

        let next_statuses = [
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ]
        .into_iter()
        .filter(|next| order.status.can_transition_to(*next))
        .map(|next| next.to_string())
        .collect();

        Self {
            id: order.id.to_string(),
            number: order.number.clone(),
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            status: order.status.to_string(),
            customer_name: order.customer.name.clone(),
            customer_email: order.customer.email.to_string(),
            customer_phone: order.customer.phone.clone(),
            address,
            lines,
            subtotal: format!("${:.2}", order.subtotal),
            shipping_fee: format!("${:.2}", order.shipping_fee),
            total: format!("${:.2}", order.total),
            payment_method: order.payment.method.clone(),
            payment_reference: order.payment.reference.clone(),
            next_statuses,
        }
    }
}

/// Order list query parameters.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
}

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderRowView>,
    pub active_status: Option<String>,
    /// Filter links, in lifecycle order.
    pub statuses: Vec<String>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
}

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Display the order list, optionally filtered by status.
#[instrument(skip(state))]
pub async fn index(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<OrdersIndexTemplate> {
    let orders = match &query.status {
        Some(raw) => {
            let status = parse_status(raw)?;
            state.orders().list_by_status(status)?
        }
        None => state.orders().list()?,
    };

    Ok(OrdersIndexTemplate {
        orders: orders.iter().map(OrderRowView::from).collect(),
        active_status: query.status,
        statuses: [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ]
        .map(|s| s.to_string())
        .to_vec(),
    })
}

/// Display a single order.
#[instrument(skip(state))]
pub async fn show(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<OrderShowTemplate> {
    let order = state.orders().get(id)?;
    Ok(OrderShowTemplate {
        order: OrderDetailView::from(&order),
    })
}

/// Move an order to a new status.
#[instrument(skip(state))]
pub async fn update_status(
    _: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status = parse_status(&form.status)?;
    let order = state.orders().set_status(id, status)?;
    tracing::info!(order_number = %order.number, status = %order.status, "order status changed");
    Ok(Redirect::to(&format!("/orders/{id}")))
}

fn parse_status(raw: &str) -> Result<OrderStatus> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("unknown order status '{raw}'")))
}

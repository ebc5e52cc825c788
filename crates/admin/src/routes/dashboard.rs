//! Dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use atelier_core::types::OrderStatus;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::routes::orders::OrderRowView;
use crate::state::AppState;

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub product_count: usize,
    pub pending_count: usize,
    pub paid_count: usize,
    pub recent_orders: Vec<OrderRowView>,
}

/// Display the dashboard: stock of the catalog and the state of the order
/// book at a glance.
#[instrument(skip(state))]
pub async fn dashboard(_: RequireAdminAuth, State(state): State<AppState>) -> Result<DashboardTemplate> {
    let product_count = state.products().list()?.len();

    let orders = state.orders().list()?;
    let pending_count = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();
    let paid_count = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Paid)
        .count();
    let recent_orders = orders.iter().take(5).map(OrderRowView::from).collect();

    Ok(DashboardTemplate {
        product_count,
        pending_count,
        paid_count,
        recent_orders,
    })
}

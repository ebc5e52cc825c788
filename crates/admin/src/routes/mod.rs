//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//! GET  /auth/login                 - Login form
//! POST /auth/login                 - Verify password, start session
//! POST /auth/logout                - End session
//!
//! # Everything below requires an authenticated session
//! GET  /                           - Dashboard
//!
//! # Catalog
//! GET  /products                   - Product list
//! GET  /products/new               - New product form
//! POST /products                   - Create product
//! GET  /products/{id}/edit         - Edit product form
//! POST /products/{id}              - Update product
//! POST /products/{id}/delete       - Delete product
//!
//! # Pages
//! GET  /homepage                   - Homepage editor
//! POST /homepage                   - Publish homepage content
//! GET  /about                      - About-page editor
//! POST /about                      - Publish about-page content
//!
//! # Orders
//! GET  /orders                     - Order list (optional ?status=)
//! GET  /orders/{id}                - Order detail
//! POST /orders/{id}/status         - Move order to a new status
//! ```

pub mod about;
pub mod auth;
pub mod dashboard;
pub mod homepage;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product editor routes.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

/// Create the order book routes.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::update_status))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::dashboard))
        // Authentication
        .route("/auth/login", get(auth::login_form).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        // Catalog
        .nest("/products", product_routes())
        // Page editors
        .route("/homepage", get(homepage::edit).post(homepage::update))
        .route("/about", get(about::edit).post(about::update))
        // Orders
        .nest("/orders", order_routes())
}

//! Content repositories for the admin back-office.
//!
//! The "database" is the set of JSON content files shared with the
//! storefront. Each repository wraps one file and applies the same
//! load / mutate / validate / overwrite cycle, so a failed validation never
//! reaches disk.

pub mod about;
pub mod homepage;
pub mod orders;
pub mod products;

use thiserror::Error;

use atelier_core::content::StoreError;
use atelier_core::types::OrderStatus;

pub use about::AboutRepository;
pub use homepage::HomepageRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying content file error (includes validation failures).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Constraint violation (e.g., duplicate product id).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Order status transition is not allowed.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

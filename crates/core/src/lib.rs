//! Atelier Core - shared domain library.
//!
//! This crate provides the domain model used across all Atelier components:
//! - `storefront` - Public-facing boutique site
//! - `admin` - Internal back-office (content editors, orders)
//! - `cli` - Command-line tools for seeding and validating content
//!
//! # Architecture
//!
//! The core crate contains no HTTP handling and no async code. It owns three
//! concerns:
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and
//!   order statuses
//! - [`cart`] - The session cart engine: deduplicated line items keyed by
//!   `(product_id, size, color)`, persisted through a [`cart::CartStore`]
//! - [`content`] - The JSON-file content store shared by the storefront and
//!   the admin editors (catalog, homepage, about page, orders)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod content;
pub mod types;

pub use types::*;

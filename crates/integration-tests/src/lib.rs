//! Integration tests for Atelier.
//!
//! These tests run in-process against a temporary content directory: the
//! admin repositories write the files, the storefront services read them,
//! and the cart engine moves payloads between the two. No servers, no
//! network.
//!
//! ```bash
//! cargo test -p atelier-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use chrono::Utc;
use rust_decimal::dec;
use tempfile::TempDir;
use uuid::Uuid;

use atelier_core::cart::LineItem;
use atelier_core::content::{
    Catalog, ContentStores, Customer, Order, PaymentDetails, Product,
};
use atelier_core::types::{Email, OrderStatus, ProductId};

/// A content directory that lives as long as the test.
pub struct TestContent {
    dir: TempDir,
}

impl TestContent {
    /// Create an empty content directory.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a content directory pre-loaded with a two-product catalog.
    ///
    /// # Panics
    ///
    /// Panics when the catalog cannot be written.
    #[must_use]
    pub fn with_catalog() -> Self {
        let content = Self::empty();
        let catalog = Catalog {
            products: vec![
                sample_product("linen-shirt", "Shirts", dec!(49.50)),
                sample_product("wool-coat", "Outerwear", dec!(180.00)),
            ],
        };
        content.stores().catalog().save(&catalog).unwrap();
        content
    }

    /// Path of the content directory.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Stores over this directory.
    #[must_use]
    pub fn stores(&self) -> ContentStores {
        ContentStores::new(self.dir.path())
    }
}

/// A product with predictable fields for assertions.
#[must_use]
pub fn sample_product(id: &str, category: &str, price: rust_decimal::Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Sample {id}"),
        category: category.to_owned(),
        price,
        description: "A sample product".to_owned(),
        image_url: format!("/static/images/{id}.jpg"),
        image_hint: format!("photo of {id}"),
        sizes: vec!["S".to_owned(), "M".to_owned()],
        colors: vec!["White".to_owned(), "Black".to_owned()],
    }
}

/// A line item matching [`sample_product`].
#[must_use]
pub fn sample_line_item(id: &str, quantity: u32) -> LineItem {
    LineItem {
        product_id: ProductId::new(id),
        name: format!("Sample {id}"),
        category: "Shirts".to_owned(),
        unit_price: dec!(49.50),
        quantity,
        image_url: format!("/static/images/{id}.jpg"),
        image_hint: format!("photo of {id}"),
        size: "M".to_owned(),
        color: "White".to_owned(),
    }
}

/// A pending order with one line item.
///
/// # Panics
///
/// Panics when the sample email fails to parse.
#[must_use]
pub fn sample_order(number: &str) -> Order {
    let item = sample_line_item("linen-shirt", 2);
    let subtotal = item.line_total();
    Order {
        id: Uuid::new_v4(),
        number: number.to_owned(),
        created_at: Utc::now(),
        customer: Customer {
            name: "Jo Bloggs".to_owned(),
            email: Email::parse("jo@example.com").unwrap(),
            phone: None,
            address_line1: "1 High St".to_owned(),
            address_line2: None,
            city: "Leeds".to_owned(),
            postal_code: "LS1 1AA".to_owned(),
            country: "UK".to_owned(),
        },
        items: vec![item],
        subtotal,
        shipping_fee: dec!(5.00),
        total: subtotal + dec!(5.00),
        payment: PaymentDetails {
            method: "bank_transfer".to_owned(),
            reference: number.to_owned(),
        },
        status: OrderStatus::Pending,
    }
}

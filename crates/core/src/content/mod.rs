//! Content types for the JSON-file-backed stores.
//!
//! The admin editors write these files and the storefront reads them
//! directly (a file-based publish model: one file per content type, no
//! multi-file consistency). Every type carries its own [`Validate`]
//! implementation; stores validate before every overwrite.

pub mod store;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::LineItem;
use crate::types::{Email, OrderStatus, ProductId};

pub use store::{ContentStores, JsonFileStore, StoreError};

/// A content value that failed its write-time checks.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("validation failed: {0}")]
pub struct ValidationError(pub String);

/// Write-time validation contract for every content type.
pub trait Validate {
    /// Check the value's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing the first violated rule.
    fn validate(&self) -> Result<(), ValidationError>;
}

// =============================================================================
// Catalog
// =============================================================================

/// One product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
    pub image_hint: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

/// The product catalog, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Distinct categories, in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for product in &self.products {
            if !out.contains(&product.category) {
                out.push(product.category.clone());
            }
        }
        out
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut seen: Vec<&ProductId> = Vec::new();
        for product in &self.products {
            if product.id.is_empty() {
                return Err(ValidationError("product id cannot be empty".to_owned()));
            }
            if seen.contains(&&product.id) {
                return Err(ValidationError(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
            seen.push(&product.id);

            if product.name.trim().is_empty() {
                return Err(ValidationError(format!(
                    "product {} has an empty name",
                    product.id
                )));
            }
            if product.price.is_sign_negative() {
                return Err(ValidationError(format!(
                    "product {} has a negative price",
                    product.id
                )));
            }
            if product.sizes.is_empty() || product.colors.is_empty() {
                return Err(ValidationError(format!(
                    "product {} must offer at least one size and one color",
                    product.id
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Homepage & About
// =============================================================================

/// The homepage hero banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub image_hint: String,
    pub cta_label: String,
    pub cta_href: String,
}

/// A titled body section used on the homepage and about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hint: Option<String>,
}

/// Editable homepage content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageContent {
    pub hero: HeroSection,
    pub sections: Vec<ContentSection>,
    pub featured_product_ids: Vec<ProductId>,
}

impl Validate for HomepageContent {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.hero.title.trim().is_empty() {
            return Err(ValidationError("hero title cannot be empty".to_owned()));
        }
        if self.sections.iter().any(|s| s.title.trim().is_empty()) {
            return Err(ValidationError(
                "homepage sections must have titles".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Editable about-page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub intro: String,
    pub sections: Vec<ContentSection>,
}

impl Validate for AboutContent {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError("about title cannot be empty".to_owned()));
        }
        if self.sections.iter().any(|s| s.title.trim().is_empty()) {
            return Err(ValidationError(
                "about sections must have titles".to_owned(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Customer contact and shipping details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Manual payment details: the method label shown to the customer and the
/// transfer reference they quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: String,
    pub reference: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    pub payment: PaymentDetails,
    pub status: OrderStatus,
}

impl Validate for Order {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.number.trim().is_empty() {
            return Err(ValidationError("order number cannot be empty".to_owned()));
        }
        if self.items.is_empty() {
            return Err(ValidationError(format!(
                "order {} has no line items",
                self.number
            )));
        }
        if self.items.iter().any(|i| i.quantity == 0) {
            return Err(ValidationError(format!(
                "order {} has a zero-quantity line",
                self.number
            )));
        }
        let line_sum: Decimal = self.items.iter().map(LineItem::line_total).sum();
        if line_sum != self.subtotal {
            return Err(ValidationError(format!(
                "order {} subtotal {} does not match line totals {}",
                self.number, self.subtotal, line_sum
            )));
        }
        if self.subtotal + self.shipping_fee != self.total {
            return Err(ValidationError(format!(
                "order {} total {} does not match subtotal + shipping",
                self.number, self.total
            )));
        }
        Ok(())
    }
}

impl Validate for Vec<Order> {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut numbers: Vec<&str> = Vec::new();
        for order in self {
            order.validate()?;
            if numbers.contains(&order.number.as_str()) {
                return Err(ValidationError(format!(
                    "duplicate order number: {}",
                    order.number
                )));
            }
            numbers.push(&order.number);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Shirts".to_owned(),
            price: dec!(30.00),
            description: "A product".to_owned(),
            image_url: format!("/static/images/{id}.jpg"),
            image_hint: format!("product {id}"),
            sizes: vec!["S".to_owned(), "M".to_owned()],
            colors: vec!["White".to_owned()],
        }
    }

    fn order() -> Order {
        let item = LineItem {
            product_id: ProductId::new("p1"),
            name: "Product p1".to_owned(),
            category: "Shirts".to_owned(),
            unit_price: dec!(30.00),
            quantity: 2,
            image_url: "/static/images/p1.jpg".to_owned(),
            image_hint: "product p1".to_owned(),
            size: "M".to_owned(),
            color: "White".to_owned(),
        };
        Order {
            id: Uuid::new_v4(),
            number: "ATL-TEST-0001".to_owned(),
            created_at: Utc::now(),
            customer: Customer {
                name: "Jess Doe".to_owned(),
                email: Email::parse("jess@example.com").unwrap(),
                phone: None,
                address_line1: "1 High St".to_owned(),
                address_line2: None,
                city: "Springfield".to_owned(),
                postal_code: "12345".to_owned(),
                country: "US".to_owned(),
            },
            items: vec![item],
            subtotal: dec!(60.00),
            shipping_fee: dec!(5.00),
            total: dec!(65.00),
            payment: PaymentDetails {
                method: "bank_transfer".to_owned(),
                reference: "JESS-0001".to_owned(),
            },
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let catalog = Catalog {
            products: vec![product("p1"), product("p1")],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_rejects_negative_price() {
        let mut bad = product("p1");
        bad.price = dec!(-1.00);
        let catalog = Catalog {
            products: vec![bad],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_categories_first_seen_order() {
        let mut p2 = product("p2");
        p2.category = "Dresses".to_owned();
        let catalog = Catalog {
            products: vec![product("p1"), p2, product("p3")],
        };
        assert_eq!(catalog.categories(), ["Shirts", "Dresses"]);
    }

    #[test]
    fn test_order_validates_totals() {
        let good = order();
        assert!(good.validate().is_ok());

        let mut bad_subtotal = order();
        bad_subtotal.subtotal = dec!(10.00);
        bad_subtotal.total = dec!(15.00);
        assert!(bad_subtotal.validate().is_err());

        let mut bad_total = order();
        bad_total.total = dec!(999.00);
        assert!(bad_total.validate().is_err());
    }

    #[test]
    fn test_order_rejects_empty_items() {
        let mut bad = order();
        bad.items.clear();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_order_list_rejects_duplicate_numbers() {
        let orders = vec![order(), order()];
        assert!(orders.validate().is_err());
    }
}

//! Session cart: line items, identity keys, and the cart engine.
//!
//! A cart is an ordered list of [`LineItem`]s. Two additions with the same
//! [`ItemKey`] (`product_id`, `size`, `color`) merge into one entry rather
//! than duplicating; insertion order is display order and round-trips through
//! the persisted payload unchanged.

pub mod engine;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

pub use engine::{CartEngine, CartStore, MemoryCartStore};

/// A quantity of one product variant in the cart.
///
/// Serialized field names are the persisted payload format and must not
/// change: existing session payloads are deserialized against them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_url: String,
    pub image_hint: String,
    pub size: String,
    pub color: String,
}

impl LineItem {
    /// The identity key deciding whether two additions merge.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Price of this line (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The `(product_id, size, color)` triple identifying a cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl ItemKey {
    /// Create a key from its parts.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// What a cart mutation did, reported back so consumers can re-render and
/// surface user-facing notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new entry was appended.
    Added(ItemKey),
    /// An existing entry absorbed the incoming quantity.
    Merged(ItemKey),
    /// An entry was removed; carries the removed item so the consumer can
    /// name it in a notification.
    Removed(LineItem),
    /// An entry's quantity was set to the given value (clamped at 1).
    QuantitySet(ItemKey, u32),
    /// The cart was emptied.
    Cleared,
    /// No entry matched; nothing happened.
    Unchanged,
}

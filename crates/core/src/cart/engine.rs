//! The cart engine: an owned, deduplicated line-item list synchronized to a
//! persisted payload slot.
//!
//! The engine is synchronous; every operation runs to completion and writes
//! the updated payload through its [`CartStore`] before returning, so the
//! in-memory list and the store are always consistent after any call
//! (read-your-writes within one session context).
//!
//! # Known limitation
//!
//! Two session contexts sharing one underlying slot (e.g., two browser tabs)
//! each hold an independent in-memory copy; the engine does not observe
//! external writes to the slot. The last writer wins until the other side
//! re-hydrates.

use rust_decimal::Decimal;

use super::{CartChange, ItemKey, LineItem};

/// The persisted payload slot a cart engine synchronizes to.
///
/// `read` returns the last-written serialized payload, or `None` when the
/// slot has never been written. `write` replaces the payload and is
/// best-effort: durability failures are owned by the implementation, not
/// reported through this contract.
pub trait CartStore {
    fn read(&self) -> Option<String>;
    fn write(&mut self, payload: &str);
}

/// An in-memory payload slot.
///
/// Used as the request-scoped buffer in the storefront (the session layer
/// moves the payload in and out around each request) and as the fixture
/// store in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    payload: Option<String>,
}

impl MemoryCartStore {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { payload: None }
    }

    /// Create a slot seeded with an existing payload.
    #[must_use]
    pub const fn with_payload(payload: String) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    /// The current payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Consume the slot and return the payload.
    #[must_use]
    pub fn into_payload(self) -> Option<String> {
        self.payload
    }
}

impl CartStore for MemoryCartStore {
    fn read(&self) -> Option<String> {
        self.payload.clone()
    }

    fn write(&mut self, payload: &str) {
        self.payload = Some(payload.to_owned());
    }
}

/// The authoritative, deduplicated cart for one session context.
///
/// One engine is constructed per session context and handed to consumers;
/// there is no shared global cart. All mutation goes through the four
/// operations, each of which persists before returning and reports a
/// [`CartChange`] so consumers can re-render.
#[derive(Debug)]
pub struct CartEngine<S: CartStore> {
    store: S,
    items: Vec<LineItem>,
}

impl<S: CartStore> CartEngine<S> {
    /// Hydrate the engine from the store's payload.
    ///
    /// An absent payload yields an empty cart. A corrupt payload is logged,
    /// the slot is reset to an empty list, and the cart starts empty; the
    /// fault is never surfaced to the consumer.
    pub fn hydrate(mut store: S) -> Self {
        let items = match store.read() {
            None => Vec::new(),
            Some(payload) => match serde_json::from_str::<Vec<LineItem>>(&payload) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!("discarding corrupt cart payload: {e}");
                    store.write("[]");
                    Vec::new()
                }
            },
        };
        Self { store, items }
    }

    /// The current line items, in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add an item, merging into an existing entry with the same identity
    /// key.
    ///
    /// On merge, only the quantity changes: the existing entry's descriptive
    /// fields (name, price, image) win and the incoming ones are discarded.
    /// New entries are appended, preserving display order. The incoming
    /// quantity is floored at 1; a merged quantity saturates at `u32::MAX`.
    pub fn add_item(&mut self, mut item: LineItem) -> CartChange {
        item.quantity = item.quantity.max(1);
        let key = item.key();

        let change = if let Some(existing) = self.items.iter_mut().find(|i| i.key() == key) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            CartChange::Merged(key)
        } else {
            self.items.push(item);
            CartChange::Added(key)
        };

        self.persist();
        change
    }

    /// Remove the entry with the given identity key.
    ///
    /// Returns the removed item inside the change so the consumer can name
    /// it in a notification. A missing key is a silent no-op.
    pub fn remove_item(&mut self, key: &ItemKey) -> CartChange {
        let Some(pos) = self.items.iter().position(|i| i.key() == *key) else {
            return CartChange::Unchanged;
        };
        let removed = self.items.remove(pos);
        self.persist();
        CartChange::Removed(removed)
    }

    /// Adjust an entry's quantity by `delta`, clamped at a floor of 1.
    ///
    /// Decrementing cannot remove an entry; removal is only reachable via
    /// [`Self::remove_item`]. A missing key is a silent no-op.
    pub fn update_quantity(&mut self, key: &ItemKey, delta: i64) -> CartChange {
        let Some(item) = self.items.iter_mut().find(|i| i.key() == *key) else {
            return CartChange::Unchanged;
        };
        let updated = i64::from(item.quantity).saturating_add(delta).max(1);
        item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        let quantity = item.quantity;
        self.persist();
        CartChange::QuantitySet(key.clone(), quantity)
    }

    /// Empty the cart. Invoked after successful order placement.
    pub fn clear(&mut self) -> CartChange {
        self.items.clear();
        self.persist();
        CartChange::Cleared
    }

    /// Consume the engine and return the store (with the latest payload).
    pub fn into_store(self) -> S {
        self.store
    }

    /// Serialize the current list and write it through the store.
    fn persist(&mut self) {
        match serde_json::to_string(&self.items) {
            Ok(payload) => self.store.write(&payload),
            Err(e) => tracing::error!("failed to serialize cart payload: {e}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::types::ProductId;

    fn item(id: &str, size: &str, color: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Shirts".to_owned(),
            unit_price: dec!(20.00),
            quantity,
            image_url: format!("/static/images/{id}.jpg"),
            image_hint: format!("product {id}"),
            size: size.to_owned(),
            color: color.to_owned(),
        }
    }

    fn empty_engine() -> CartEngine<MemoryCartStore> {
        CartEngine::hydrate(MemoryCartStore::new())
    }

    #[test]
    fn test_hydrate_absent_payload_is_empty() {
        let engine = empty_engine();
        assert!(engine.items().is_empty());
    }

    #[test]
    fn test_add_merges_same_key_and_sums_quantities() {
        let mut engine = empty_engine();
        assert_eq!(
            engine.add_item(item("p1", "M", "Red", 1)),
            CartChange::Added(ItemKey::new("p1", "M", "Red"))
        );

        let mut second = item("p1", "M", "Red", 2);
        second.name = "Changed".to_owned();
        second.unit_price = dec!(99.99);
        assert_eq!(
            engine.add_item(second),
            CartChange::Merged(ItemKey::new("p1", "M", "Red"))
        );

        assert_eq!(engine.items().len(), 1);
        let entry = &engine.items()[0];
        assert_eq!(entry.quantity, 3);
        // Descriptive fields of the first add win.
        assert_eq!(entry.name, "Product p1");
        assert_eq!(entry.unit_price, dec!(20.00));
    }

    #[test]
    fn test_merge_saturates_instead_of_overflowing() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", u32::MAX - 1));
        assert_eq!(
            engine.add_item(item("p1", "M", "Red", 5)),
            CartChange::Merged(ItemKey::new("p1", "M", "Red"))
        );
        assert_eq!(engine.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_add_distinct_size_or_color_never_merges() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 1));
        engine.add_item(item("p1", "L", "Red", 1));
        engine.add_item(item("p1", "M", "Blue", 1));
        assert_eq!(engine.items().len(), 3);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut engine = empty_engine();
        engine.add_item(item("p2", "M", "Red", 1));
        engine.add_item(item("p1", "S", "Black", 1));
        engine.add_item(item("p3", "L", "White", 1));
        let ids: Vec<&str> = engine.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1", "p3"]);
    }

    #[test]
    fn test_add_floors_incoming_quantity_at_one() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 0));
        assert_eq!(engine.items()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_clamps_at_one() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 1));
        let key = ItemKey::new("p1", "M", "Red");

        assert_eq!(
            engine.update_quantity(&key, -5),
            CartChange::QuantitySet(key.clone(), 1)
        );
        assert_eq!(engine.items()[0].quantity, 1);

        engine.update_quantity(&key, 4);
        assert_eq!(engine.items()[0].quantity, 5);
        engine.update_quantity(&key, -2);
        assert_eq!(engine.items()[0].quantity, 3);
    }

    #[test]
    fn test_update_quantity_missing_key_is_noop() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 2));
        let change = engine.update_quantity(&ItemKey::new("p9", "M", "Red"), 1);
        assert_eq!(change, CartChange::Unchanged);
        assert_eq!(engine.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_existing_key() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 1));
        engine.add_item(item("p2", "L", "Blue", 1));

        let key = ItemKey::new("p1", "M", "Red");
        match engine.remove_item(&key) {
            CartChange::Removed(removed) => assert_eq!(removed.key(), key),
            other => panic!("expected Removed, got {other:?}"),
        }
        assert_eq!(engine.items().len(), 1);
        assert!(engine.items().iter().all(|i| i.key() != key));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 1));
        assert_eq!(
            engine.remove_item(&ItemKey::new("p9", "M", "Red")),
            CartChange::Unchanged
        );
        assert_eq!(engine.items().len(), 1);
    }

    #[test]
    fn test_payload_round_trip_preserves_content_and_order() {
        let mut engine = empty_engine();
        engine.add_item(item("p2", "M", "Red", 2));
        engine.add_item(item("p1", "S", "Black", 1));
        let before = engine.items().to_vec();

        let rehydrated = CartEngine::hydrate(engine.into_store());
        assert_eq!(rehydrated.items(), before.as_slice());
    }

    #[test]
    fn test_corrupt_payload_self_heals_to_empty() {
        let store = MemoryCartStore::with_payload("{not valid json".to_owned());
        let engine = CartEngine::hydrate(store);
        assert!(engine.items().is_empty());
        // The slot was reset, not left corrupt.
        assert_eq!(engine.into_store().payload(), Some("[]"));
    }

    #[test]
    fn test_valid_json_wrong_shape_self_heals() {
        let store = MemoryCartStore::with_payload(r#"{"cart": []}"#.to_owned());
        let engine = CartEngine::hydrate(store);
        assert!(engine.items().is_empty());
    }

    #[test]
    fn test_clear_empties_memory_and_store() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 3));
        engine.clear();
        assert!(engine.items().is_empty());
        assert_eq!(engine.into_store().payload(), Some("[]"));
    }

    #[test]
    fn test_every_mutation_persists_before_returning() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 1));
        let after_add: Vec<LineItem> =
            serde_json::from_str(engine.store.payload().unwrap()).unwrap();
        assert_eq!(after_add, engine.items());

        engine.update_quantity(&ItemKey::new("p1", "M", "Red"), 2);
        let after_update: Vec<LineItem> =
            serde_json::from_str(engine.store.payload().unwrap()).unwrap();
        assert_eq!(after_update, engine.items());
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut engine = empty_engine();
        engine.add_item(item("p1", "M", "Red", 2));
        engine.add_item(item("p2", "L", "Blue", 1));
        assert_eq!(engine.item_count(), 3);
        assert_eq!(engine.subtotal(), dec!(60.00));
    }
}

//! Cart lifecycle across hydrate / mutate / persist cycles.
//!
//! Each cycle mimics one request: build an engine from the stored payload,
//! apply one operation, and carry the written payload into the next cycle.

#![allow(clippy::unwrap_used)]

use rust_decimal::dec;

use atelier_core::cart::{CartChange, CartEngine, ItemKey, MemoryCartStore};
use atelier_integration_tests::sample_line_item;

fn next_cycle(engine: CartEngine<MemoryCartStore>) -> CartEngine<MemoryCartStore> {
    let store = engine.into_store();
    CartEngine::hydrate(store)
}

#[test]
fn test_cart_survives_many_cycles() {
    let mut engine = CartEngine::hydrate(MemoryCartStore::new());
    engine.add_item(sample_line_item("linen-shirt", 1));

    let mut engine = next_cycle(engine);
    engine.add_item(sample_line_item("wool-coat", 1));

    let mut engine = next_cycle(engine);
    // Same variant again: merged, not appended.
    let change = engine.add_item(sample_line_item("linen-shirt", 2));
    assert!(matches!(change, CartChange::Merged(_)));

    let engine = next_cycle(engine);
    assert_eq!(engine.items().len(), 2);
    assert_eq!(engine.items()[0].quantity, 3);
    // First-added entry keeps its position at the front.
    assert_eq!(engine.items()[0].product_id.as_str(), "linen-shirt");
    assert_eq!(engine.item_count(), 4);
}

#[test]
fn test_remove_and_clamp_across_cycles() {
    let mut engine = CartEngine::hydrate(MemoryCartStore::new());
    engine.add_item(sample_line_item("linen-shirt", 1));
    engine.add_item(sample_line_item("wool-coat", 5));

    let mut engine = next_cycle(engine);
    let key = ItemKey::new("linen-shirt", "M", "White");
    // Decrement at quantity 1 clamps rather than removing.
    engine.update_quantity(&key, -3);
    assert_eq!(engine.items()[0].quantity, 1);

    let mut engine = next_cycle(engine);
    match engine.remove_item(&key) {
        CartChange::Removed(item) => assert_eq!(item.product_id.as_str(), "linen-shirt"),
        other => panic!("expected removal, got {other:?}"),
    }

    let engine = next_cycle(engine);
    assert_eq!(engine.items().len(), 1);
    assert_eq!(engine.subtotal(), dec!(247.50));
}

#[test]
fn test_corrupt_payload_resets_once_and_stays_healthy() {
    let store = MemoryCartStore::with_payload("{not json".to_owned());
    let engine = CartEngine::hydrate(store);
    assert!(engine.items().is_empty());

    // The reset payload is already valid for the next cycle.
    let store = engine.into_store();
    assert_eq!(store.payload(), Some("[]"));
    let engine = CartEngine::hydrate(store);
    assert!(engine.items().is_empty());
}

//! Session-stored cart state.
//!
//! The session holds the serialized cart payload (a JSON array of line
//! items) under a fixed key. Each request hydrates a `CartEngine` from that
//! payload, mutates it, and writes the updated payload back, so the session
//! is the durable slot the engine synchronizes to.

use tower_sessions::Session;

use atelier_core::cart::{CartEngine, CartStore as _, MemoryCartStore};

/// Session keys for storefront data.
pub mod session_keys {
    /// Key for the serialized cart line-item payload.
    pub const CART_ITEMS: &str = "cart_items";
}

/// Hydrate a cart engine from the session's payload slot.
///
/// A corrupt payload self-heals inside the engine; the healed slot reaches
/// the session on the next [`persist_cart`].
pub async fn hydrate_cart(session: &Session) -> CartEngine<MemoryCartStore> {
    let payload = session
        .get::<String>(session_keys::CART_ITEMS)
        .await
        .ok()
        .flatten();

    let store = match payload {
        Some(payload) => MemoryCartStore::with_payload(payload),
        None => MemoryCartStore::new(),
    };
    CartEngine::hydrate(store)
}

/// Write the engine's payload slot back into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn persist_cart(
    session: &Session,
    engine: CartEngine<MemoryCartStore>,
) -> Result<(), tower_sessions::session::Error> {
    let mut store = engine.into_store();
    if store.payload().is_none() {
        // Never-written engines still get a concrete empty slot.
        store.write("[]");
    }
    if let Some(payload) = store.into_payload() {
        session.insert(session_keys::CART_ITEMS, payload).await?;
    }
    Ok(())
}

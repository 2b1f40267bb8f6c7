//! Cart snapshot codec.
//!
//! Saving writes the whole cart as one JSON document. Loading is defensive:
//! the snapshot may have been written by an older build or damaged on disk,
//! so every item is validated independently and invalid ones are dropped. A
//! snapshot that doesn't parse at all is deleted so it can't wedge the
//! terminal on every launch.

use serde_json::Value;
use tracing::{debug, warn};

use fairway_core::cart::{Cart, CartLineItem};
use fairway_core::types::Member;
use fairway_core::validation::validate_price_cents;
use fairway_core::MAX_ITEM_QUANTITY;

use crate::error::StoreResult;
use crate::snapshot::{SnapshotStore, CART_KEY};

impl SnapshotStore {
    /// Persists the cart. Committed on return.
    pub fn save_cart(&self, cart: &Cart) -> StoreResult<()> {
        let json = serde_json::to_string(cart)?;
        self.put(CART_KEY, &json)
    }

    /// Loads the persisted cart. Never fails:
    ///
    /// - no snapshot → empty cart
    /// - unparseable snapshot → record deleted, empty cart
    /// - invalid items/member/event name → dropped, the rest restored
    pub fn load_cart(&self) -> Cart {
        let raw = match self.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(err) => {
                warn!(error = %err, "failed to read cart snapshot, starting empty");
                return Cart::new();
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "cart snapshot corrupt, discarding it");
                if let Err(err) = self.remove(CART_KEY) {
                    warn!(error = %err, "failed to delete corrupt cart snapshot");
                }
                return Cart::new();
            }
        };

        restore_cart(&value)
    }
}

/// Rebuilds a cart from a parsed snapshot, keeping only what validates.
fn restore_cart(value: &Value) -> Cart {
    let mut cart = Cart::new();

    if let Some(items) = value.get("items").and_then(Value::as_array) {
        for raw in items {
            match line_item_from_value(raw) {
                Some(line) => cart.items.push(line),
                None => debug!(item = %raw, "dropping invalid cart item from snapshot"),
            }
        }
    }

    // Member is kept only if it deserializes to a complete record
    if let Some(member) = value.get("member").filter(|m| m.is_object()) {
        match serde_json::from_value::<Member>(member.clone()) {
            Ok(member) => cart.member = Some(member),
            Err(err) => debug!(error = %err, "dropping invalid member from snapshot"),
        }
    }

    if let Some(name) = value.get("eventName").and_then(Value::as_str) {
        cart.event_name = name.to_string();
    }

    cart
}

/// Validates one snapshot item. `None` means the item is dropped.
fn line_item_from_value(value: &Value) -> Option<CartLineItem> {
    let obj = value.as_object()?;

    let id = obj.get("id")?.as_str()?;
    if id.trim().is_empty() {
        return None;
    }
    let name = obj.get("name")?.as_str()?;
    if name.trim().is_empty() {
        return None;
    }

    let price_cents = obj.get("priceCents")?.as_i64()?;
    validate_price_cents(price_cents).ok()?;

    let quantity = obj.get("quantity")?.as_i64()?;
    if quantity < 1 {
        return None;
    }

    // Missing or unrecognized category defaults to custom; missing brand to ""
    let category = obj
        .get("category")
        .cloned()
        .and_then(|c| serde_json::from_value(c).ok())
        .unwrap_or_default();
    let brand = obj
        .get("brand")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(CartLineItem {
        id: id.to_string(),
        name: name.to_string(),
        price_cents,
        quantity: quantity.min(MAX_ITEM_QUANTITY),
        category,
        brand,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Cart Model
//!
//! The in-progress order: line items, the attached member, and the event tag.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Lifecycle                                  │
//! │                                                                         │
//! │  Member lookup ──► set_member ──► add_item × N ──► update_quantity     │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                     subtotal / tax / grand_total (read-only)           │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                     submit (service layer) ──► clear                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Rule
//! Two adds merge into one line only when **both** id and name match. Two
//! custom drinks that happen to share a name keep separate lines because
//! their generated ids differ; a renamed menu item gets its own line so the
//! receipt shows what was actually poured.
//!
//! Fallible mutators return `Err` and leave the cart unchanged. Read
//! operations never fail: structurally invalid items are rejected here on
//! entry and dropped by the snapshot loader, so a `Cart` in hand is always
//! well-formed.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{DrinkCategory, Member, TaxRate};
use crate::validation::validate_price_cents;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Line Item
// =============================================================================

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    /// Always in `[1, MAX_ITEM_QUANTITY]`.
    pub quantity: i64,
    #[serde(default)]
    pub category: DrinkCategory,
    #[serde(default)]
    pub brand: String,
}

impl CartLineItem {
    /// Price × quantity for this line.
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived totals, computed in one pass for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order.
///
/// Items keep insertion order. The member and event name are optional
/// context attached before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub event_name: String,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of a catalog item to the cart.
    ///
    /// A line matching on `(id, name)` has its quantity incremented,
    /// saturating at [`MAX_ITEM_QUANTITY`]; otherwise a new line with
    /// quantity 1 is appended. Rejects a blank id/name or an out-of-range
    /// price without touching the cart.
    ///
    /// ## Example
    /// ```rust
    /// use fairway_core::cart::Cart;
    /// use fairway_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::standard();
    /// let mut cart = Cart::new();
    /// cart.add_item(catalog.find("c1").unwrap()).unwrap();
    /// cart.add_item(catalog.find("c1").unwrap()).unwrap();
    /// assert_eq!(cart.items.len(), 1);
    /// assert_eq!(cart.items[0].quantity, 2);
    /// ```
    pub fn add_item(&mut self, item: &CatalogItem) -> ValidationResult<()> {
        self.add_line(CartLineItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price_cents: item.price_cents,
            quantity: 1,
            category: item.category,
            brand: item.brand.clone(),
        })
    }

    /// Adds one unit of a pre-built line (the incoming quantity is ignored;
    /// merge and append both count a single unit).
    pub fn add_line(&mut self, line: CartLineItem) -> ValidationResult<()> {
        if line.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            });
        }
        if line.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }
        validate_price_cents(line.price_cents)?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.id == line.id && i.name == line.name)
        {
            existing.quantity = (existing.quantity + 1).min(MAX_ITEM_QUANTITY);
        } else {
            self.items.push(CartLineItem {
                quantity: 1,
                ..line
            });
        }
        Ok(())
    }

    /// Removes every line with the given id. Absent id is a no-op.
    pub fn remove_item(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Sets the quantity of the line with the given id.
    ///
    /// `quantity == 0` removes the line (same as [`remove_item`]); values
    /// above [`MAX_ITEM_QUANTITY`] clamp to it. Unknown ids are a no-op;
    /// other lines are never touched.
    ///
    /// [`remove_item`]: Cart::remove_item
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> ValidationResult<()> {
        if id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "id".to_string(),
            });
        }
        if quantity < 0 {
            return Err(ValidationError::Negative {
                field: "quantity".to_string(),
            });
        }
        if quantity == 0 {
            self.remove_item(id);
            return Ok(());
        }
        let quantity = quantity.min(MAX_ITEM_QUANTITY);
        for item in self.items.iter_mut().filter(|i| i.id == id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    /// Empties the cart: items, member, and event name.
    pub fn clear(&mut self) {
        self.items.clear();
        self.member = None;
        self.event_name.clear();
    }

    /// Replaces the attached member (snapshot semantics: `None` detaches).
    pub fn set_member(&mut self, member: Option<Member>) {
        self.member = member;
    }

    /// Sets the event tag carried onto the submitted order.
    pub fn set_event_name(&mut self, event_name: impl Into<String>) {
        self.event_name = event_name.into();
    }

    // -------------------------------------------------------------------------
    // Derived Values (total functions, never fail)
    // -------------------------------------------------------------------------

    /// Sum of price × quantity across all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Tax on the subtotal. An out-of-range rate falls back to the default
    /// club rate so the register always shows a number.
    pub fn tax(&self, rate: TaxRate) -> Money {
        self.subtotal()
            .calculate_tax(TaxRate::from_bps_or_default(rate.bps()))
    }

    /// Subtotal plus tax.
    pub fn grand_total(&self, rate: TaxRate) -> Money {
        self.subtotal() + self.tax(rate)
    }

    /// Total units across all lines (a line with quantity 3 counts 3).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All derived totals in one pass.
    pub fn totals(&self, rate: TaxRate) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = self.tax(rate);
        CartTotals {
            item_count: self.item_count(),
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            total_cents: (subtotal + tax).cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn margarita() -> CatalogItem {
        Catalog::standard().find("c1").cloned().unwrap()
    }

    fn budweiser() -> CatalogItem {
        Catalog::standard().find("b1").cloned().unwrap()
    }

    #[test]
    fn test_add_merges_on_id_and_name() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap();
        cart.add_item(&margarita()).unwrap();
        cart.add_item(&budweiser()).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].quantity, 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_same_id_different_name_keeps_separate_lines() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap();

        let mut renamed = margarita();
        renamed.name = "Margarita (spicy)".to_string();
        cart.add_item(&renamed).unwrap();

        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_add_saturates_at_max_quantity() {
        let mut cart = Cart::new();
        let item = margarita();
        cart.add_item(&item).unwrap();
        cart.items[0].quantity = MAX_ITEM_QUANTITY - 1;

        cart.add_item(&item).unwrap();
        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);
        cart.add_item(&item).unwrap();
        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_add_rejects_invalid_item_without_state_change() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap();

        let mut blank = margarita();
        blank.name = "   ".to_string();
        assert!(cart.add_item(&blank).is_err());

        let mut negative = budweiser();
        negative.price_cents = -100;
        assert!(cart.add_item(&negative).is_err());

        let mut absurd = budweiser();
        absurd.price_cents = i64::MAX;
        assert!(cart.add_item(&absurd).is_err());

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap();
        cart.add_item(&budweiser()).unwrap();

        cart.update_quantity("c1", 0).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id, "b1");
    }

    #[test]
    fn test_update_quantity_clamps_and_ignores_unknown() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap();

        cart.update_quantity("c1", 5000).unwrap();
        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);

        // Unknown id: no-op, no error
        cart.update_quantity("nope", 3).unwrap();
        assert_eq!(cart.items.len(), 1);

        assert!(cart.update_quantity("c1", -1).is_err());
        assert!(cart.update_quantity("", 3).is_err());
        assert_eq!(cart.items[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_totals_are_consistent() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap(); // $12.00
        cart.add_item(&margarita()).unwrap(); // $24.00
        cart.add_item(&budweiser()).unwrap(); // $30.00

        let rate = TaxRate::from_bps(800);
        assert_eq!(cart.subtotal().cents(), 3000);
        assert_eq!(cart.tax(rate).cents(), 240);
        assert_eq!(cart.grand_total(rate).cents(), 3240);

        let totals = cart.totals(rate);
        assert_eq!(totals.subtotal_cents + totals.tax_cents, totals.total_cents);
        assert_eq!(totals.item_count, 3);
    }

    #[test]
    fn test_invalid_tax_rate_falls_back_to_default() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap(); // $12.00

        // 300% is a config mistake; default 8% applies
        let tax = cart.tax(TaxRate::from_bps(30_000));
        assert_eq!(tax.cents(), 96);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(&margarita()).unwrap();
        cart.set_member(Some(Member {
            member_id: "1234".into(),
            first_name: "Pat".into(),
            last_name: "Doyle".into(),
            email: "pat@example.com".into(),
            phone: None,
            membership_type: None,
            active: true,
        }));
        cart.set_event_name("Trivia Night");

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.member.is_none());
        assert!(cart.event_name.is_empty());
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        let totals = cart.totals(TaxRate::default());
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.total_cents, 0);
        assert_eq!(totals.item_count, 0);
    }
}

//! # Order Submission
//!
//! Turns the cart into an order on the remote store.
//!
//! ## Submission Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Submission                                    │
//! │                                                                         │
//! │  1. Acquire in-flight flag ──────────── busy? ──► Err(InFlight)         │
//! │  2. Check preconditions                                                 │
//! │     ├── member with id attached? ─────── no ───► Err(MissingMember)     │
//! │     ├── bartender uid present? ───────── no ───► Err(MissingBartender)  │
//! │     └── cart non-empty? ──────────────── no ───► Err(EmptyCart)         │
//! │  3. Build order from cart lines + cart-derived totals                   │
//! │  4. remote.create_order ──────────────── Err ──► Err(Remote) (fatal)    │
//! │  5. Popularity bump per non-custom item ─ Err ──► warn! (best effort)   │
//! │  6. Return SubmittedOrder                                               │
//! │                                                                         │
//! │  The submitter never clears the cart; the caller does, on success.      │
//! │  The order either exists with the displayed totals or not at all.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use fairway_core::cart::{Cart, CartTotals};
use fairway_core::catalog::is_custom_item_id;
use fairway_core::types::{NewOrder, OrderItem, StaffProfile, TaxRate};

use crate::error::SubmitError;
use crate::remote::RemoteStore;

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmittedOrder {
    /// Server-assigned order id.
    pub order_id: String,
    /// The totals that were written, as the cart derived them.
    pub totals: CartTotals,
}

/// Submits orders to the remote store, one at a time.
#[derive(Clone)]
pub struct OrderSubmitter {
    remote: Arc<dyn RemoteStore>,
    in_flight: Arc<AtomicBool>,
}

impl OrderSubmitter {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        OrderSubmitter {
            remote,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Submits the cart as an order poured by `bartender`.
    ///
    /// Preconditions are checked before any remote call; a violation means
    /// nothing was written. On success the cart is left untouched, so the
    /// caller can show the receipt and then clear it.
    pub async fn submit(
        &self,
        cart: &Cart,
        bartender: &StaffProfile,
        rate: TaxRate,
        notes: &str,
    ) -> Result<SubmittedOrder, SubmitError> {
        // One submission at a time; the double-tap returns immediately
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::InFlight)?;

        let member = cart
            .member
            .as_ref()
            .filter(|m| !m.member_id.trim().is_empty())
            .ok_or(SubmitError::MissingMember)?;
        if bartender.uid.trim().is_empty() {
            return Err(SubmitError::MissingBartender);
        }
        if cart.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        let items: Vec<OrderItem> = cart
            .items
            .iter()
            .map(|line| OrderItem {
                item_id: line.id.clone(),
                name: line.name.clone(),
                category: line.category,
                brand: line.brand.clone(),
                price_cents: line.price_cents,
                quantity: line.quantity,
            })
            .collect();

        // The cart's own derivation is the single source of truth for totals
        let totals = cart.totals(rate);
        let order = NewOrder {
            member_id: member.member_id.clone(),
            member_name: member.full_name(),
            bartender_id: bartender.uid.clone(),
            bartender_name: bartender.name.clone(),
            items,
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            event_name: cart.event_name.clone(),
            notes: notes.to_string(),
        };

        let order_id = self.remote.create_order(order).await?;
        info!(
            order_id = %order_id,
            member_id = %member.member_id,
            total_cents = totals.total_cents,
            "order submitted"
        );

        // Popularity is best effort: the order already exists, a failed bump
        // must not look like a failed sale
        for line in &cart.items {
            if is_custom_item_id(&line.id) {
                continue;
            }
            if let Err(err) = self.remote.update_item_popularity(&line.id).await {
                warn!(item_id = %line.id, error = %err, "popularity update failed");
            }
        }

        Ok(SubmittedOrder { order_id, totals })
    }
}

/// RAII flag: acquired with a compare-exchange, released on drop so every
/// exit path (including `?`) clears it.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryRemote;
    use fairway_core::catalog::{Catalog, CatalogItem};
    use fairway_core::types::{Member, StaffRole};

    fn member() -> Member {
        Member {
            member_id: "1234".into(),
            first_name: "Pat".into(),
            last_name: "Doyle".into(),
            email: "pat@example.com".into(),
            phone: None,
            membership_type: None,
            active: true,
        }
    }

    fn bartender() -> StaffProfile {
        StaffProfile {
            uid: "u-alex".into(),
            name: "Alex".into(),
            email: "alex@club.test".into(),
            role: StaffRole::Bartender,
            active: true,
        }
    }

    fn full_cart() -> Cart {
        let catalog = Catalog::standard();
        let mut cart = Cart::new();
        cart.add_item(catalog.find("c1").unwrap()).unwrap(); // $12.00
        cart.add_item(catalog.find("c1").unwrap()).unwrap(); // ×2
        cart.add_item(catalog.find("b9").unwrap()).unwrap(); // $8.00
        cart.set_member(Some(member()));
        cart.set_event_name("Trivia Night");
        cart
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let remote = Arc::new(MemoryRemote::new());
        let submitter = OrderSubmitter::new(remote.clone());
        let cart = full_cart();
        let rate = TaxRate::from_bps(800);

        let submitted = submitter
            .submit(&cart, &bartender(), rate, "no salt")
            .await
            .unwrap();

        // Totals match the cart's own derivation exactly
        assert_eq!(submitted.totals.subtotal_cents, 3200);
        assert_eq!(submitted.totals.tax_cents, 256);
        assert_eq!(submitted.totals.total_cents, 3456);

        let order = remote.order(&submitted.order_id).unwrap();
        assert_eq!(order.member_id, "1234");
        assert_eq!(order.member_name, "Pat Doyle");
        assert_eq!(order.bartender_id, "u-alex");
        assert_eq!(order.event_name, "Trivia Night");
        assert_eq!(order.notes, "no salt");
        assert_eq!(order.total_cents, 3456);
        assert_eq!(order.items.len(), 2);

        // Popularity bumped once per line
        assert_eq!(remote.popularity("c1"), 1);
        assert_eq!(remote.popularity("b9"), 1);

        // The submitter does not clear the cart
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_preconditions_block_before_any_write() {
        let remote = Arc::new(MemoryRemote::new());
        let submitter = OrderSubmitter::new(remote.clone());
        let rate = TaxRate::default();

        // No member
        let mut cart = full_cart();
        cart.set_member(None);
        let err = submitter
            .submit(&cart, &bartender(), rate, "")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::MissingMember));

        // Member with blank id
        let mut cart = full_cart();
        let mut blank = member();
        blank.member_id = "  ".into();
        cart.set_member(Some(blank));
        let err = submitter
            .submit(&cart, &bartender(), rate, "")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::MissingMember));

        // No bartender uid
        let cart = full_cart();
        let mut ghost = bartender();
        ghost.uid = String::new();
        let err = submitter.submit(&cart, &ghost, rate, "").await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingBartender));

        // Empty cart
        let mut cart = Cart::new();
        cart.set_member(Some(member()));
        let err = submitter
            .submit(&cart, &bartender(), rate, "")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::EmptyCart));

        assert_eq!(remote.order_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_atomic() {
        let remote = Arc::new(MemoryRemote::new());
        remote.set_fail_create_order(true);
        let submitter = OrderSubmitter::new(remote.clone());
        let cart = full_cart();

        let err = submitter
            .submit(&cart, &bartender(), TaxRate::default(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Remote(_)));
        assert_eq!(remote.order_count(), 0);
        assert_eq!(remote.popularity("c1"), 0);

        // The in-flight flag was released; a retry succeeds
        remote.set_fail_create_order(false);
        submitter
            .submit(&cart, &bartender(), TaxRate::default(), "")
            .await
            .unwrap();
        assert_eq!(remote.order_count(), 1);
    }

    #[tokio::test]
    async fn test_popularity_failure_does_not_fail_submission() {
        let remote = Arc::new(MemoryRemote::new());
        remote.set_fail_popularity(true);
        let submitter = OrderSubmitter::new(remote.clone());
        let cart = full_cart();

        let submitted = submitter
            .submit(&cart, &bartender(), TaxRate::default(), "")
            .await
            .unwrap();
        assert!(remote.order(&submitted.order_id).is_some());
        assert_eq!(remote.popularity("c1"), 0);
    }

    #[tokio::test]
    async fn test_custom_items_skip_popularity() {
        let remote = Arc::new(MemoryRemote::new());
        let submitter = OrderSubmitter::new(remote.clone());

        let mut cart = full_cart();
        let custom = CatalogItem::custom("House Lemonade", 450).unwrap();
        cart.add_item(&custom).unwrap();

        submitter
            .submit(&cart, &bartender(), TaxRate::default(), "")
            .await
            .unwrap();
        assert_eq!(remote.popularity("c1"), 1);
        assert_eq!(remote.popularity(&custom.id), 0);
    }

    #[tokio::test]
    async fn test_concurrent_submit_returns_in_flight() {
        // Hold the flag manually to simulate a submission in progress
        let remote = Arc::new(MemoryRemote::new());
        let submitter = OrderSubmitter::new(remote);
        submitter.in_flight.store(true, Ordering::SeqCst);

        let err = submitter
            .submit(&full_cart(), &bartender(), TaxRate::default(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::InFlight));

        submitter.in_flight.store(false, Ordering::SeqCst);
        assert!(submitter
            .submit(&full_cart(), &bartender(), TaxRate::default(), "")
            .await
            .is_ok());
    }
}

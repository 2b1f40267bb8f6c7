//! # Cart and Settings Sessions
//!
//! Shared mutable state for the running terminal, with write-through
//! persistence to the local snapshot store.
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Auto-Persist on Every Mutation                         │
//! │                                                                         │
//! │  add_item ──► mutate in-memory cart ──► Ok                              │
//! │                       │                                                 │
//! │                       └──► tokio::spawn + spawn_blocking                │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                        SnapshotStore::save_cart                         │
//! │                             │            │                              │
//! │                             Ok           Err ──► warn! (swallowed)      │
//! │                                                                         │
//! │  The caller never waits on disk. A crash loses at most the very last   │
//! │  operation; everything before it was already committed.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use fairway_core::cart::{Cart, CartTotals};
use fairway_core::catalog::CatalogItem;
use fairway_core::error::ValidationResult;
use fairway_core::timeframe::Timeframe;
use fairway_core::types::{Member, Settings, TaxRate, Theme};
use fairway_store::{SnapshotStore, StoreResult};

// =============================================================================
// Cart Session
// =============================================================================

/// The live cart, shared across the terminal.
///
/// Cheap to clone; clones share the cart and the store handle. Every
/// successful mutation schedules a background save; failed validations
/// change nothing and save nothing.
#[derive(Clone)]
pub struct CartSession {
    cart: Arc<Mutex<Cart>>,
    store: SnapshotStore,
}

impl CartSession {
    /// Restores the session from the store (empty cart if no usable
    /// snapshot exists).
    pub fn load(store: SnapshotStore) -> Self {
        let cart = store.load_cart();
        if !cart.is_empty() {
            debug!(items = cart.items.len(), "restored in-progress cart");
        }
        CartSession {
            cart: Arc::new(Mutex::new(cart)),
            store,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations (each schedules a background save on success)
    // -------------------------------------------------------------------------

    pub fn add_item(&self, item: &CatalogItem) -> ValidationResult<()> {
        self.mutate(|cart| cart.add_item(item))
    }

    /// Builds and adds an off-menu drink.
    pub fn add_custom_item(&self, name: &str, price_cents: i64) -> ValidationResult<()> {
        let item = CatalogItem::custom(name, price_cents)?;
        self.mutate(|cart| cart.add_item(&item))
    }

    pub fn remove_item(&self, id: &str) {
        let _ = self.mutate(|cart| {
            cart.remove_item(id);
            Ok(())
        });
    }

    pub fn update_quantity(&self, id: &str, quantity: i64) -> ValidationResult<()> {
        self.mutate(|cart| cart.update_quantity(id, quantity))
    }

    pub fn clear(&self) {
        let _ = self.mutate(|cart| {
            cart.clear();
            Ok(())
        });
    }

    pub fn set_member(&self, member: Option<Member>) {
        let _ = self.mutate(|cart| {
            cart.set_member(member);
            Ok(())
        });
    }

    pub fn set_event_name(&self, event_name: impl Into<String>) {
        let name = event_name.into();
        let _ = self.mutate(|cart| {
            cart.set_event_name(name);
            Ok(())
        });
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        f(&cart)
    }

    /// A point-in-time copy of the cart.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    pub fn totals(&self, rate: TaxRate) -> CartTotals {
        self.with_cart(|cart| cart.totals(rate))
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Saves the cart synchronously (shutdown path; mutations persist in the
    /// background on their own).
    pub fn flush(&self) -> StoreResult<()> {
        let cart = self.snapshot();
        self.store.save_cart(&cart)
    }

    fn mutate<F>(&self, f: F) -> ValidationResult<()>
    where
        F: FnOnce(&mut Cart) -> ValidationResult<()>,
    {
        let snapshot = {
            let mut cart = self.cart.lock().expect("cart mutex poisoned");
            f(&mut cart)?;
            cart.clone()
        };
        persist_cart(self.store.clone(), snapshot);
        Ok(())
    }
}

/// Fire-and-forget background save. redb commits block, so the write runs on
/// the blocking pool; failures are logged and swallowed.
fn persist_cart(store: SnapshotStore, cart: Cart) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || store.save_cart(&cart)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "failed to persist cart snapshot"),
            Err(err) => warn!(error = %err, "cart persistence task failed"),
        }
    });
}

// =============================================================================
// Settings Service
// =============================================================================

/// The live settings, persisted on every accepted change.
#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<Mutex<Settings>>,
    store: SnapshotStore,
}

impl SettingsService {
    /// Restores settings from the store (defaults if no usable snapshot).
    pub fn load(store: SnapshotStore) -> Self {
        let settings = store.load_settings();
        SettingsService {
            settings: Arc::new(Mutex::new(settings)),
            store,
        }
    }

    /// A point-in-time copy of the settings.
    pub fn current(&self) -> Settings {
        self.settings
            .lock()
            .expect("settings mutex poisoned")
            .clone()
    }

    /// The effective tax rate (out-of-range config falls back to default).
    pub fn tax_rate(&self) -> TaxRate {
        self.current().tax_rate()
    }

    pub fn set_default_timeframe(&self, timeframe: Timeframe) {
        self.update(|s| {
            s.default_timeframe = timeframe;
            Ok(())
        })
        .ok();
    }

    pub fn set_tax_rate_bps(&self, bps: u32) -> ValidationResult<()> {
        self.update(|s| s.set_tax_rate_bps(bps))
    }

    pub fn set_theme(&self, theme: Theme) {
        self.update(|s| {
            s.theme = theme;
            Ok(())
        })
        .ok();
    }

    pub fn set_notifications_enabled(&self, enabled: bool) {
        self.update(|s| {
            s.notifications_enabled = enabled;
            Ok(())
        })
        .ok();
    }

    pub fn set_sound_enabled(&self, enabled: bool) {
        self.update(|s| {
            s.sound_enabled = enabled;
            Ok(())
        })
        .ok();
    }

    pub fn set_default_event_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.update(|s| {
            s.default_event_name = name;
            Ok(())
        })
        .ok();
    }

    /// Saves synchronously (shutdown path).
    pub fn flush(&self) -> StoreResult<()> {
        let settings = self.current();
        self.store.save_settings(&settings)
    }

    fn update<F>(&self, f: F) -> ValidationResult<()>
    where
        F: FnOnce(&mut Settings) -> ValidationResult<()>,
    {
        let snapshot = {
            let mut settings = self.settings.lock().expect("settings mutex poisoned");
            f(&mut settings)?;
            settings.clone()
        };
        let store = self.store.clone();
        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || store.save_settings(&snapshot)).await;
            match result {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!(error = %err, "failed to persist settings snapshot"),
                Err(err) => warn!(error = %err, "settings persistence task failed"),
            }
        });
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::catalog::Catalog;

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

    #[tokio::test]
    async fn test_mutations_and_flush_round_trip() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let session = CartSession::load(store.clone());
        let catalog = Catalog::standard();

        session.add_item(catalog.find("c1").unwrap()).unwrap();
        session.add_item(catalog.find("c1").unwrap()).unwrap();
        session.add_item(catalog.find("b1").unwrap()).unwrap();
        session.update_quantity("b1", 4).unwrap();
        session.set_member(Some(member()));
        session.set_event_name("Trivia Night");
        session.flush().unwrap();

        // A fresh session over the same store sees the persisted cart
        let restored = CartSession::load(store);
        let cart = restored.snapshot();
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[1].quantity, 4);
        assert_eq!(cart.member.as_ref().unwrap().member_id, "1234");
        assert_eq!(cart.event_name, "Trivia Night");
    }

    #[tokio::test]
    async fn test_failed_validation_changes_nothing() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let session = CartSession::load(store);
        let catalog = Catalog::standard();

        session.add_item(catalog.find("c1").unwrap()).unwrap();
        assert!(session.update_quantity("c1", -2).is_err());
        assert!(session.add_custom_item("   ", 500).is_err());

        let totals = session.totals(TaxRate::default());
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.subtotal_cents, 1200);
    }

    #[tokio::test]
    async fn test_custom_item_through_session() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let session = CartSession::load(store);

        session.add_custom_item("House Lemonade", 450).unwrap();
        let cart = session.snapshot();
        assert_eq!(cart.items.len(), 1);
        assert!(fairway_core::is_custom_item_id(&cart.items[0].id));
    }

    #[tokio::test]
    async fn test_settings_persist_on_change() {
        let store = SnapshotStore::open_in_memory().unwrap();
        let service = SettingsService::load(store.clone());

        service.set_theme(Theme::Dark);
        service.set_tax_rate_bps(925).unwrap();
        assert!(service.set_tax_rate_bps(60_000).is_err());
        service.set_default_timeframe(Timeframe::Last30Days);
        service.flush().unwrap();

        let restored = SettingsService::load(store).current();
        assert_eq!(restored.theme, Theme::Dark);
        assert_eq!(restored.tax_rate_bps, 925);
        assert_eq!(restored.default_timeframe, Timeframe::Last30Days);
    }
}

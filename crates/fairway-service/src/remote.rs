//! # Remote Document Store
//!
//! The trait the terminal uses to talk to the club's backing store, plus an
//! in-memory implementation for tests and the demo.
//!
//! The terminal treats the remote as an opaque collaborator: members are
//! read-only snapshots, orders are write-once, popularity counters are
//! best-effort. Nothing here assumes a particular backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use fairway_core::timeframe::DateRange;
use fairway_core::types::{Member, NewOrder, Order};
use fairway_core::validation::validate_member_id;

use crate::error::{LookupError, RemoteError};

// =============================================================================
// Remote Store Trait
// =============================================================================

/// The club's backing document store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches a member by 4-digit id. `Ok(None)` means no such member.
    async fn get_member_by_id(&self, member_id: &str) -> Result<Option<Member>, RemoteError>;

    /// Creates an order and returns its server-assigned id.
    async fn create_order(&self, order: NewOrder) -> Result<String, RemoteError>;

    /// Bumps the popularity counter for a menu item.
    async fn update_item_popularity(&self, item_id: &str) -> Result<(), RemoteError>;

    /// All orders created within the inclusive range.
    async fn get_orders_by_timeframe(&self, range: DateRange) -> Result<Vec<Order>, RemoteError>;
}

// =============================================================================
// Member Lookup
// =============================================================================

/// Looks up a member by card number.
///
/// Validates the 4-digit format locally before any remote call and rejects
/// inactive accounts, so a found member is always attachable to the cart.
pub async fn lookup_member(
    remote: &dyn RemoteStore,
    member_id: &str,
) -> Result<Member, LookupError> {
    validate_member_id(member_id)?;
    let member_id = member_id.trim();

    let member = remote
        .get_member_by_id(member_id)
        .await?
        .ok_or_else(|| LookupError::NotFound(member_id.to_string()))?;

    if !member.active {
        return Err(LookupError::Inactive(member_id.to_string()));
    }

    debug!(member_id, "member lookup succeeded");
    Ok(member)
}

// =============================================================================
// In-Memory Remote
// =============================================================================

/// Full in-process [`RemoteStore`] implementation.
///
/// Orders get uuid ids and wall-clock timestamps; popularity is a counter
/// per item id. The `fail_*` switches let tests exercise the failure paths.
#[derive(Default)]
pub struct MemoryRemote {
    inner: Mutex<Inner>,
    fail_create_order: AtomicBool,
    fail_popularity: AtomicBool,
}

#[derive(Default)]
struct Inner {
    members: HashMap<String, Member>,
    orders: Vec<Order>,
    popularity: HashMap<String, u64>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        MemoryRemote::default()
    }

    /// Adds (or replaces) a member record.
    pub fn insert_member(&self, member: Member) {
        let mut inner = self.inner.lock().expect("remote state poisoned");
        inner.members.insert(member.member_id.clone(), member);
    }

    /// Makes the next `create_order` calls fail.
    pub fn set_fail_create_order(&self, fail: bool) {
        self.fail_create_order.store(fail, Ordering::SeqCst);
    }

    /// Makes `update_item_popularity` calls fail.
    pub fn set_fail_popularity(&self, fail: bool) {
        self.fail_popularity.store(fail, Ordering::SeqCst);
    }

    /// Popularity counter for an item id (0 if never ordered).
    pub fn popularity(&self, item_id: &str) -> u64 {
        let inner = self.inner.lock().expect("remote state poisoned");
        inner.popularity.get(item_id).copied().unwrap_or(0)
    }

    /// Number of stored orders.
    pub fn order_count(&self) -> usize {
        self.inner.lock().expect("remote state poisoned").orders.len()
    }

    /// A stored order by id.
    pub fn order(&self, id: &str) -> Option<Order> {
        let inner = self.inner.lock().expect("remote state poisoned");
        inner.orders.iter().find(|o| o.id == id).cloned()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn get_member_by_id(&self, member_id: &str) -> Result<Option<Member>, RemoteError> {
        let inner = self.inner.lock().expect("remote state poisoned");
        Ok(inner.members.get(member_id).cloned())
    }

    async fn create_order(&self, order: NewOrder) -> Result<String, RemoteError> {
        if self.fail_create_order.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("injected failure".to_string()));
        }
        let id = Uuid::new_v4().to_string();
        let order = Order::from_new(id.clone(), order, Utc::now());
        self.inner.lock().expect("remote state poisoned").orders.push(order);
        Ok(id)
    }

    async fn update_item_popularity(&self, item_id: &str) -> Result<(), RemoteError> {
        if self.fail_popularity.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("injected failure".to_string()));
        }
        let mut inner = self.inner.lock().expect("remote state poisoned");
        *inner.popularity.entry(item_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    async fn get_orders_by_timeframe(&self, range: DateRange) -> Result<Vec<Order>, RemoteError> {
        let inner = self.inner.lock().expect("remote state poisoned");
        Ok(inner
            .orders
            .iter()
            .filter(|o| o.created_at >= range.start && o.created_at <= range.end)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, active: bool) -> Member {
        Member {
            member_id: id.to_string(),
            first_name: "Pat".into(),
            last_name: "Doyle".into(),
            email: "pat@example.com".into(),
            phone: None,
            membership_type: None,
            active,
        }
    }

    #[tokio::test]
    async fn test_lookup_rejects_malformed_id_without_querying() {
        let remote = MemoryRemote::new();
        let err = lookup_member(&remote, "12ab").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidId(_)));

        let err = lookup_member(&remote, "").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_lookup_not_found_and_inactive() {
        let remote = MemoryRemote::new();
        remote.insert_member(member("1234", true));
        remote.insert_member(member("5678", false));

        let found = lookup_member(&remote, "1234").await.unwrap();
        assert_eq!(found.member_id, "1234");

        // Surrounding whitespace is tolerated
        assert!(lookup_member(&remote, " 1234 ").await.is_ok());

        let err = lookup_member(&remote, "0000").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));

        let err = lookup_member(&remote, "5678").await.unwrap_err();
        assert!(matches!(err, LookupError::Inactive(_)));
    }

    #[tokio::test]
    async fn test_orders_filtered_by_range() {
        let remote = MemoryRemote::new();
        let order = NewOrder {
            member_id: "1234".into(),
            member_name: "Pat Doyle".into(),
            bartender_id: "u-1".into(),
            bartender_name: "Alex".into(),
            items: vec![],
            subtotal_cents: 1200,
            tax_cents: 96,
            total_cents: 1296,
            event_name: String::new(),
            notes: String::new(),
        };
        let id = remote.create_order(order).await.unwrap();
        assert!(remote.order(&id).is_some());

        let now = Utc::now();
        let today = DateRange {
            start: now - chrono::Duration::hours(1),
            end: now + chrono::Duration::hours(1),
        };
        assert_eq!(remote.get_orders_by_timeframe(today).await.unwrap().len(), 1);

        let last_week = DateRange {
            start: now - chrono::Duration::days(8),
            end: now - chrono::Duration::days(7),
        };
        assert!(remote
            .get_orders_by_timeframe(last_week)
            .await
            .unwrap()
            .is_empty());
    }
}

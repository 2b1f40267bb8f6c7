//! # Sales Reports
//!
//! Loads orders for a report filter and reduces them to display stats.
//!
//! ## Stale-Response Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The bartender flips the timeframe faster than the remote answers:      │
//! │                                                                         │
//! │  load(last7days)  gen=1 ──► remote query ..........(slow)............   │
//! │  load(today)      gen=2 ──► remote query ──► gen still 2? ──► stats    │
//! │                                   │                                     │
//! │              (slow reply arrives) └──► gen is 2, not 1 ──► Ok(None)    │
//! │                                                                         │
//! │  A superseded load returns None so it can never overwrite the stats     │
//! │  of the query the user actually asked for last.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use fairway_core::timeframe::ReportFilter;
use fairway_core::types::Order;

use crate::error::RemoteError;
use crate::remote::RemoteStore;

// =============================================================================
// Report Stats
// =============================================================================

/// One entry in the top-sellers list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopItem {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
}

/// Aggregated stats for a loaded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStats {
    pub total_sales_cents: i64,
    pub order_count: usize,
    /// Integer division; the display layer doesn't need fractional cents.
    pub avg_order_value_cents: i64,
    /// Top 5 items by total quantity, best first.
    pub top_items: Vec<TopItem>,
}

impl ReportStats {
    /// Reduces a batch of orders to stats, skipping malformed records
    /// (negative totals or quantities) instead of poisoning the report.
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut total_sales_cents = 0i64;
        let mut order_count = 0usize;
        let mut quantities: HashMap<String, TopItem> = HashMap::new();

        for order in orders {
            if order.total_cents < 0 {
                debug!(order_id = %order.id, "skipping order with negative total");
                continue;
            }
            total_sales_cents += order.total_cents;
            order_count += 1;

            for item in &order.items {
                if item.quantity < 1 {
                    continue;
                }
                quantities
                    .entry(item.item_id.clone())
                    .and_modify(|t| t.quantity += item.quantity)
                    .or_insert_with(|| TopItem {
                        item_id: item.item_id.clone(),
                        name: item.name.clone(),
                        quantity: item.quantity,
                    });
            }
        }

        let mut top_items: Vec<TopItem> = quantities.into_values().collect();
        // Quantity descending, name as the tiebreaker for a stable list
        top_items.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
        top_items.truncate(5);

        ReportStats {
            total_sales_cents,
            order_count,
            avg_order_value_cents: if order_count == 0 {
                0
            } else {
                total_sales_cents / order_count as i64
            },
            top_items,
        }
    }
}

// =============================================================================
// Report Service
// =============================================================================

/// Loads reports with a stale-response guard.
///
/// Cheap to clone; clones share the generation counter.
#[derive(Clone)]
pub struct ReportService {
    remote: Arc<dyn RemoteStore>,
    generation: Arc<AtomicU64>,
}

impl ReportService {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        ReportService {
            remote,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Loads stats for the filter, resolved against `reference`.
    ///
    /// `Ok(None)` means this load was superseded by a newer one while its
    /// query was in flight; the caller keeps whatever it is showing.
    pub async fn load(
        &self,
        filter: &ReportFilter,
        reference: DateTime<Utc>,
    ) -> Result<Option<ReportStats>, RemoteError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let range = filter.resolve_range(reference);

        let mut orders = self.remote.get_orders_by_timeframe(range).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale report response");
            return Ok(None);
        }

        // Client-side event filter over the loaded window
        let needle = filter.event_name.trim().to_lowercase();
        if !needle.is_empty() {
            orders.retain(|o| o.event_name.to_lowercase().contains(&needle));
        }

        Ok(Some(ReportStats::from_orders(&orders)))
    }

    /// Loads against the current wall clock.
    pub async fn load_now(&self, filter: &ReportFilter) -> Result<Option<ReportStats>, RemoteError> {
        self.load(filter, Utc::now()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # fairway-core: Pure Business Logic for Fairway POS
//!
//! This crate is the **heart** of Fairway POS, the point-of-sale core for a
//! club bar. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fairway POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 fairway-service (Orchestration)                 │   │
//! │  │   CartSession ──► OrderSubmitter ──► ReportService ──► Auth    │   │
//! │  └───────────┬─────────────────────────────────────┬───────────────┘   │
//! │              │                                     │                    │
//! │  ┌───────────▼─────────────────────┐  ┌────────────▼────────────────┐  │
//! │  │   ★ fairway-core (THIS CRATE) ★ │  │  fairway-store (redb)       │  │
//! │  │                                 │  │  cart/settings snapshots    │  │
//! │  │  ┌────────┐ ┌──────┐ ┌───────┐ │  └─────────────────────────────┘  │
//! │  │  │ money  │ │ cart │ │catalog│ │                                   │
//! │  │  │TaxRate │ │Member│ │drinks │ │                                   │
//! │  │  └────────┘ └──────┘ └───────┘ │                                   │
//! │  │  ┌──────────┐ ┌─────────────┐  │                                   │
//! │  │  │validation│ │  timeframe  │  │                                   │
//! │  │  └──────────┘ └─────────────┘  │                                   │
//! │  │                                 │                                   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Member, Settings, Order, StaffProfile, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The drink menu: cocktails, beers, wines, spirits
//! - [`cart`] - The cart model: line items, merge rules, totals
//! - [`timeframe`] - Report timeframes and date-range resolution
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use fairway_core::money::Money;
//! use fairway_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(2600); // two Margaritas + change
//!
//! // Calculate tax at the default club rate
//! let tax = subtotal.calculate_tax(TaxRate::default()); // 8.00%
//! assert_eq!(tax.cents(), 208);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod timeframe;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fairway_core::Money` instead of
// `use fairway_core::money::Money`

pub use cart::{Cart, CartLineItem, CartTotals};
pub use catalog::{is_custom_item_id, Catalog};
pub use error::ValidationError;
pub use money::Money;
pub use timeframe::{DateRange, ReportFilter, Timeframe};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Quantity updates clamp to this value; repeated adds saturate at it.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price in cents ($100,000.00).
///
/// Bounds every price that enters the model, including ones read back from a
/// snapshot, so a line total at [`MAX_ITEM_QUANTITY`] and the sum across the
/// cart stay far inside i64 range.
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

/// Default sales tax rate in basis points (800 = 8.00%).
///
/// Used whenever the configured rate is missing or out of range, so totals
/// are always computable.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Upper bound for a configurable tax rate (10000 bps = 100%).
pub const MAX_TAX_RATE_BPS: u32 = 10_000;

/// Length of a club member ID (exactly this many ASCII digits).
pub const MEMBER_ID_LEN: usize = 4;

/// Prefix that marks a drink id as a custom (off-menu) entry.
///
/// Custom items never participate in popularity tracking.
pub const CUSTOM_ID_PREFIX: &str = "custom_";

//! # fairway-store: Local Snapshot Persistence for Fairway POS
//!
//! This crate owns the terminal's local durable state: the cart in progress
//! and the settings, stored as JSON snapshots in an embedded [redb] database.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 snapshots table (&str -> &str)                          │
//! │                                                                         │
//! │   "cart"     →  {"items":[...],"member":{...},"eventName":"..."}       │
//! │   "settings" →  {"defaultTimeframe":"today","taxRateBps":800,...}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Defensive Loading
//! Persistence exists to survive restarts, not to be a source of truth worth
//! crashing over. Loading never fails:
//!
//! - unparseable snapshot → record deleted, default value returned
//! - invalid cart item → that item dropped, the rest kept
//! - invalid settings field → that field defaulted, the rest kept
//!
//! [redb]: https://docs.rs/redb

pub mod cart;
pub mod error;
pub mod settings;
pub mod snapshot;

pub use error::{StoreError, StoreResult};
pub use snapshot::SnapshotStore;

//! # fairway-service: Orchestration Layer for Fairway POS
//!
//! Wires the pure core ([`fairway_core`]) and the local snapshot store
//! ([`fairway_store`]) into the services a bar terminal actually runs.
//!
//! ## Services
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     fairway-service                                     │
//! │                                                                         │
//! │  CartSession      - live cart, auto-persisted on every mutation        │
//! │  SettingsService  - live settings, persisted on every change           │
//! │  AuthSession      - signed-in staff profile (watch channel)            │
//! │  OrderSubmitter   - cart → order on the remote, one at a time          │
//! │  ReportService    - sales stats with a stale-response guard            │
//! │                                                                         │
//! │  RemoteStore / AuthProvider are traits; MemoryRemote / MemoryAuth      │
//! │  are the in-process implementations for tests and the demo binary.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod error;
pub mod remote;
pub mod reports;
pub mod session;
pub mod submit;

pub use auth::{AuthProvider, AuthSession, MemoryAuth};
pub use error::{AuthError, LookupError, RemoteError, SubmitError};
pub use remote::{lookup_member, MemoryRemote, RemoteStore};
pub use reports::{ReportService, ReportStats, TopItem};
pub use session::{CartSession, SettingsService};
pub use submit::{OrderSubmitter, SubmittedOrder};

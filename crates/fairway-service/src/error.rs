//! # Service Error Types
//!
//! Error types for the orchestration layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Error Flow                                       │
//! │                                                                         │
//! │  RemoteError   - transport/backend failure talking to the remote       │
//! │       │                                                                 │
//! │       ├──► LookupError::Remote   (member lookup)                        │
//! │       ├──► SubmitError::Remote   (order creation - fatal)               │
//! │       └──► swallowed after warn! (popularity update - best effort)      │
//! │                                                                         │
//! │  AuthError     - sign-in/sign-up/profile failures                       │
//! │  SubmitError   - precondition + remote failures on submission           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use fairway_core::error::ValidationError;

// =============================================================================
// Remote Store Errors
// =============================================================================

/// Failure talking to the remote document store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Backend unreachable or timed out.
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    /// Backend reachable but refused the request.
    #[error("remote store rejected the request: {0}")]
    Rejected(String),
}

// =============================================================================
// Member Lookup Errors
// =============================================================================

/// Failure looking up a member by card number.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The id isn't a well-formed 4-digit member number; no query was made.
    #[error(transparent)]
    InvalidId(#[from] ValidationError),

    #[error("member {0} not found")]
    NotFound(String),

    /// The member exists but the account is deactivated.
    #[error("member {0} is inactive")]
    Inactive(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

// =============================================================================
// Order Submission Errors
// =============================================================================

/// Failure submitting an order. Every variant means no order was created.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The cart has no member (or one without an id) attached.
    #[error("no member attached to the order")]
    MissingMember,

    /// No signed-in bartender to attribute the order to.
    #[error("no bartender on the order")]
    MissingBartender,

    #[error("cart is empty")]
    EmptyCart,

    /// Another submission is still running; this one was not started.
    #[error("an order submission is already in progress")]
    InFlight,

    /// The remote write failed; the order does not exist.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Failure signing in, signing up, or resolving a staff profile.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    /// The account exists but has been deactivated.
    #[error("this account is inactive")]
    InactiveAccount,

    /// The provider returned a profile the session refuses to trust.
    #[error("profile is invalid: {0}")]
    InvalidProfile(String),

    #[error("auth provider error: {0}")]
    Provider(String),
}

//! # Staff Authentication
//!
//! The auth provider trait, the session that wraps it, and an in-memory
//! provider for tests and the demo.
//!
//! ## Session Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Auth Session                                     │
//! │                                                                         │
//! │  sign_in ──► provider ──► validate profile ──► watch channel           │
//! │                              │                      │                   │
//! │                              │ uid empty?           ├─► current()       │
//! │                              │ inactive?            └─► subscribe()     │
//! │                              ▼                                          │
//! │                        AuthError (no session change)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The watch channel carries the signed-in profile to anything that needs to
//! react to sign-in/sign-out without polling.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;
use uuid::Uuid;

use fairway_core::types::{StaffProfile, StaffRole};

use crate::error::AuthError;

// =============================================================================
// Auth Provider Trait
// =============================================================================

/// The identity backend.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<StaffProfile, AuthError>;

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: StaffRole,
    ) -> Result<StaffProfile, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Fetches the stored profile for a uid, if any.
    async fn user_data(&self, uid: &str) -> Result<Option<StaffProfile>, AuthError>;
}

// =============================================================================
// Auth Session
// =============================================================================

/// Holds the currently signed-in staff profile.
///
/// Cheap to clone; clones share the session state.
#[derive(Clone)]
pub struct AuthSession {
    provider: Arc<dyn AuthProvider>,
    tx: Arc<watch::Sender<Option<StaffProfile>>>,
}

impl AuthSession {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        let (tx, _rx) = watch::channel(None);
        AuthSession {
            provider,
            tx: Arc::new(tx),
        }
    }

    /// Signs in and establishes the session.
    ///
    /// The returned profile is validated before it becomes current: a blank
    /// uid or a deactivated account is rejected and the session is unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<StaffProfile, AuthError> {
        let profile = self.provider.sign_in(email, password).await?;

        if profile.uid.trim().is_empty() {
            return Err(AuthError::InvalidProfile("uid is empty".to_string()));
        }
        if !profile.active {
            return Err(AuthError::InactiveAccount);
        }

        info!(uid = %profile.uid, role = ?profile.role, "staff signed in");
        self.tx.send_replace(Some(profile.clone()));
        Ok(profile)
    }

    /// Signs out and clears the session. The session is cleared even if the
    /// provider call fails; a half-signed-out terminal is worse.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.provider.sign_out().await;
        self.tx.send_replace(None);
        info!("staff signed out");
        result
    }

    /// The signed-in profile, if any.
    pub fn current(&self) -> Option<StaffProfile> {
        self.tx.borrow().clone()
    }

    /// A receiver that observes sign-in/sign-out changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<StaffProfile>> {
        self.tx.subscribe()
    }

    pub fn is_manager(&self) -> bool {
        matches!(
            self.current(),
            Some(StaffProfile {
                role: StaffRole::Manager,
                ..
            })
        )
    }

    /// Whether someone who can pour is signed in (managers can tend bar).
    pub fn is_bartender(&self) -> bool {
        self.current().is_some()
    }
}

// =============================================================================
// In-Memory Provider
// =============================================================================

/// In-process [`AuthProvider`] keyed by email.
#[derive(Default)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
}

struct Account {
    password: String,
    profile: StaffProfile,
}

impl MemoryAuth {
    pub fn new() -> Self {
        MemoryAuth::default()
    }

    /// Seeds an account directly (bypassing sign_up), for tests and the demo.
    pub fn seed(&self, email: &str, password: &str, profile: StaffProfile) {
        self.accounts.lock().expect("accounts poisoned").insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                profile,
            },
        );
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<StaffProfile, AuthError> {
        let accounts = self.accounts.lock().expect("accounts poisoned");
        match accounts.get(email) {
            Some(account) if account.password == password => Ok(account.profile.clone()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: StaffRole,
    ) -> Result<StaffProfile, AuthError> {
        let mut accounts = self.accounts.lock().expect("accounts poisoned");
        if accounts.contains_key(email) {
            return Err(AuthError::EmailTaken);
        }
        let profile = StaffProfile {
            uid: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            active: true,
        };
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                profile: profile.clone(),
            },
        );
        Ok(profile)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn user_data(&self, uid: &str) -> Result<Option<StaffProfile>, AuthError> {
        let accounts = self.accounts.lock().expect("accounts poisoned");
        Ok(accounts
            .values()
            .find(|a| a.profile.uid == uid)
            .map(|a| a.profile.clone()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

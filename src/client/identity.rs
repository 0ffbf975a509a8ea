//! Identity store - what the client knows about the signed-in user.
//!
//! Session restore, sign-in and sign-out are driven by the external auth
//! provider; this store only records the outcome so the session gate and
//! the HTTP gateway can read it.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::UserId;
use crate::ports::AccessTokenSource;

/// A signed-in user as reported by the auth provider.
pub struct Identity {
    pub user_id: UserId,
    pub email: Option<String>,
    access_token: SecretString,
}

impl Identity {
    pub fn new(user_id: UserId, email: Option<String>, access_token: SecretString) -> Self {
        Self {
            user_id,
            email,
            access_token,
        }
    }
}

impl Clone for Identity {
    fn clone(&self) -> Self {
        Self {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            access_token: SecretString::new(self.access_token.expose_secret().clone()),
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Token-free copy of the store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentitySnapshot {
    /// A session restore is in progress.
    pub loading: bool,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
}

impl IdentitySnapshot {
    pub fn is_known(&self) -> bool {
        self.user_id.is_some()
    }
}

#[derive(Debug, Default)]
struct IdentityState {
    loading: bool,
    identity: Option<Identity>,
}

/// Holds the current identity for one client instance.
#[derive(Debug, Default)]
pub struct IdentityStore {
    state: RwLock<IdentityState>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a stored session as being restored.
    pub fn begin_restore(&self) {
        self.write().loading = true;
    }

    /// Ends a restore with whatever session the provider found.
    pub fn finish_restore(&self, identity: Option<Identity>) {
        let mut state = self.write();
        state.loading = false;
        state.identity = identity;
    }

    pub fn sign_in(&self, identity: Identity) {
        tracing::info!(user_id = %identity.user_id, "signed in");
        self.finish_restore(Some(identity));
    }

    pub fn sign_out(&self) {
        let mut state = self.write();
        if let Some(identity) = state.identity.take() {
            tracing::info!(user_id = %identity.user_id, "signed out");
        }
        state.loading = false;
    }

    pub fn snapshot(&self) -> IdentitySnapshot {
        let state = self.read();
        IdentitySnapshot {
            loading: state.loading,
            user_id: state.identity.as_ref().map(|i| i.user_id.clone()),
            email: state.identity.as_ref().and_then(|i| i.email.clone()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, IdentityState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, IdentityState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AccessTokenSource for IdentityStore {
    fn access_token(&self) -> Option<SecretString> {
        self.read()
            .identity
            .as_ref()
            .map(|i| SecretString::new(i.access_token.expose_secret().clone()))
    }
}

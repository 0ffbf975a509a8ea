//! Session gate - decides which part of the app the user may reach.
//!
//! The gate combines what the identity store knows about the session with
//! what the profile cache knows about the user's profile.
//!
//! Precedence, first match wins:
//!
//! 1. identity still restoring → `Checking`
//! 2. no identity → `Unauthenticated`
//! 3. profile read not finished for this identity → `Checking`
//! 4. profile read failed → `LoadFailed`
//! 5. no profile → `Onboarding`
//! 6. profile present → `Main`

use std::fmt;

use super::identity::{IdentitySnapshot, IdentityStore};
use super::profile_cache::{CacheError, CacheSnapshot, CacheStatus, ProfileCache};

/// Region of the app the user is allowed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateState {
    Unauthenticated,
    Checking,
    Onboarding,
    Main,
    LoadFailed,
}

impl GateState {
    /// `Main` and `Unauthenticated` only change on new input from outside
    /// (sign-in, sign-out); every other state is waiting on something.
    pub fn is_settled(&self) -> bool {
        matches!(self, GateState::Main | GateState::Unauthenticated)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateState::Unauthenticated => "unauthenticated",
            GateState::Checking => "checking",
            GateState::Onboarding => "onboarding",
            GateState::Main => "main",
            GateState::LoadFailed => "load_failed",
        };
        f.write_str(s)
    }
}

/// Navigation target handed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    Splash,
    ProfileSetup,
    Main,
    LoadError,
}

/// Where to send the user when the profile read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFailurePolicy {
    /// Treat the failure like a missing profile.
    #[default]
    RouteToOnboarding,
    /// Show an error screen with a retry.
    ShowError,
}

/// Pure evaluation of the gate state.
pub fn evaluate(identity: &IdentitySnapshot, cache: &CacheSnapshot) -> GateState {
    if identity.loading {
        return GateState::Checking;
    }
    let Some(user_id) = identity.user_id.as_ref() else {
        return GateState::Unauthenticated;
    };
    if !cache.has_settled_for(user_id) {
        return GateState::Checking;
    }
    if cache.status == CacheStatus::LoadFailed {
        return GateState::LoadFailed;
    }
    match cache.profile {
        None => GateState::Onboarding,
        Some(_) => GateState::Main,
    }
}

/// Gate for one client instance; remembers the last route it issued.
#[derive(Debug, Default)]
pub struct SessionGate {
    policy: LoadFailurePolicy,
    last_state: Option<GateState>,
    last_route: Option<Route>,
}

impl SessionGate {
    pub fn new(policy: LoadFailurePolicy) -> Self {
        Self {
            policy,
            last_state: None,
            last_route: None,
        }
    }

    pub fn state(&self) -> Option<GateState> {
        self.last_state
    }

    pub fn route_for(&self, state: GateState) -> Route {
        match state {
            GateState::Unauthenticated => Route::SignIn,
            GateState::Checking => Route::Splash,
            GateState::Onboarding => Route::ProfileSetup,
            GateState::Main => Route::Main,
            GateState::LoadFailed => match self.policy {
                LoadFailurePolicy::RouteToOnboarding => Route::ProfileSetup,
                LoadFailurePolicy::ShowError => Route::LoadError,
            },
        }
    }

    /// Re-evaluates and returns a route only when it differs from the last
    /// one issued. Repeated calls with unchanged inputs return `None`.
    pub fn observe(&mut self, identity: &IdentitySnapshot, cache: &CacheSnapshot) -> Option<Route> {
        let state = evaluate(identity, cache);
        if self.last_state != Some(state) {
            tracing::debug!(from = ?self.last_state, to = %state, "session gate transition");
            self.last_state = Some(state);
        }

        let route = self.route_for(state);
        if self.last_route == Some(route) {
            return None;
        }
        self.last_route = Some(route);
        Some(route)
    }

    /// Drives the cache from the current identity, then observes.
    ///
    /// Clears the cache when the identity is gone or belongs to someone
    /// else, and starts a load when an identity is known but its profile
    /// has not been read yet.
    pub async fn sync(&mut self, identity: &IdentityStore, cache: &ProfileCache) -> Option<Route> {
        let who = identity.snapshot();
        let cached = cache.snapshot();

        let stale = match (&who.user_id, &cached.loaded_for) {
            (None, _) => cached.status != CacheStatus::Unloaded,
            (Some(user_id), Some(loaded_for)) => user_id != loaded_for,
            (Some(_), None) => false,
        };
        if stale && !who.loading {
            tracing::debug!("identity changed, clearing profile cache");
            cache.clear();
        }

        if let (false, Some(user_id)) = (who.loading, who.user_id.as_ref()) {
            let cached = cache.snapshot();
            if !cached.has_settled_for(user_id) && !cached.is_loading() {
                match cache.load(user_id).await {
                    Ok(()) | Err(CacheError::LoadInFlight) => {}
                    Err(e) => tracing::warn!(error = %e, "profile load did not start"),
                }
            }
        }

        self.observe(&identity.snapshot(), &cache.snapshot())
    }
}

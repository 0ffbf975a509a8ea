//! Client side cache of the signed-in user's profile.
//!
//! The cache is observed by the session gate while a load is still in
//! flight, so its state sits behind a lock that is never held across an
//! `.await`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::profile::{CandidateProfile, ProfileError, ProfileUpdate, ProfileView};
use crate::ports::ProfileGateway;

/// Progress of the profile read for the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    #[default]
    Unloaded,
    Loading,
    /// The read finished; `profile` is `None` if the user has none yet.
    Loaded,
    /// The read failed; `error` says why.
    LoadFailed,
}

/// Copy of the cache state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub profile: Option<ProfileView>,
    pub status: CacheStatus,
    pub error: Option<String>,
    /// Identity the current state belongs to.
    pub loaded_for: Option<UserId>,
}

impl CacheSnapshot {
    /// True once a read for `user_id` has finished, successfully or not.
    pub fn has_settled_for(&self, user_id: &UserId) -> bool {
        self.loaded_for.as_ref() == Some(user_id)
            && matches!(self.status, CacheStatus::Loaded | CacheStatus::LoadFailed)
    }

    pub fn is_loading(&self) -> bool {
        self.status == CacheStatus::Loading
    }
}

/// Cache failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// A load is already running; wait for it instead of starting another.
    #[error("a profile load is already in flight")]
    LoadInFlight,

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// The profile cache for one client instance.
pub struct ProfileCache {
    gateway: Arc<dyn ProfileGateway>,
    state: RwLock<CacheSnapshot>,
    /// Bumped by every `clear`; writes only land in the generation they started in.
    generation: AtomicU64,
}

impl ProfileCache {
    pub fn new(gateway: Arc<dyn ProfileGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(CacheSnapshot::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Reads the profile for `user_id`.
    ///
    /// A missing profile and a failed read both end the load with `Ok(())`;
    /// the outcome is visible in [`ProfileCache::snapshot`]. Only a second
    /// concurrent load is refused.
    pub async fn load(&self, user_id: &UserId) -> Result<(), CacheError> {
        {
            let mut state = self.write();
            if state.status == CacheStatus::Loading {
                return Err(CacheError::LoadInFlight);
            }
            state.status = CacheStatus::Loading;
            state.error = None;
            state.loaded_for = Some(user_id.clone());
        }

        let result = self.gateway.get(user_id).await;

        let mut state = self.write();
        if state.status != CacheStatus::Loading || state.loaded_for.as_ref() != Some(user_id) {
            // Cleared (sign-out) while the read was running.
            tracing::debug!(user_id = %user_id, "discarding stale profile load");
            return Ok(());
        }

        match result {
            Ok(profile) => {
                tracing::debug!(user_id = %user_id, found = profile.is_some(), "profile loaded");
                state.profile = profile;
                state.status = CacheStatus::Loaded;
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "profile load failed");
                state.profile = None;
                state.status = CacheStatus::LoadFailed;
                state.error = Some(e.to_string());
            }
        }
        Ok(())
    }

    /// Submits the onboarding payload and caches the stored profile.
    ///
    /// On failure the cache is left exactly as it was. If the cache was
    /// cleared while the request ran, the profile is returned but not cached.
    pub async fn create_and_store(
        &self,
        candidate: &CandidateProfile,
    ) -> Result<ProfileView, CacheError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let view = self.gateway.create(candidate).await?;
        self.store(generation, view.clone());
        Ok(view)
    }

    /// Updates the profile and caches the result.
    ///
    /// Same failure and sign-out behavior as [`ProfileCache::create_and_store`].
    pub async fn update_and_store(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileView, CacheError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let view = self.gateway.update(user_id, update).await?;
        self.store(generation, view.clone());
        Ok(view)
    }

    /// Drops everything, e.g. on sign-out.
    pub fn clear(&self) {
        let mut state = self.write();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = CacheSnapshot::default();
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, generation: u64, view: ProfileView) {
        let mut state = self.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(user_id = %view.user_id, "cache cleared during write; not caching");
            return;
        }
        state.loaded_for = Some(view.user_id.clone());
        state.profile = Some(view);
        state.status = CacheStatus::Loaded;
        state.error = None;
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CacheSnapshot> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

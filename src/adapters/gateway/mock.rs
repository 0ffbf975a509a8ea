//! Scriptable profile gateway for client tests.
//!
//! Behaves like the real service (backed by an in-memory repository) and can
//! additionally fail reads or writes, hold reads or writes until released,
//! and count how often it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::LocalProfileGateway;
use crate::adapters::memory::InMemoryProfileRepository;
use crate::application::ProfileService;
use crate::domain::foundation::{Clock, SystemClock, UserId};
use crate::domain::profile::{CandidateProfile, ProfileError, ProfileUpdate, ProfileView};
use crate::ports::ProfileGateway;

/// Profile gateway with failure injection.
pub struct MockProfileGateway {
    inner: LocalProfileGateway,
    get_error: RwLock<Option<ProfileError>>,
    write_error: RwLock<Option<ProfileError>>,
    held: RwLock<Option<Arc<Notify>>>,
    held_writes: RwLock<Option<Arc<Notify>>>,
    get_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl MockProfileGateway {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let repository = Arc::new(InMemoryProfileRepository::new(clock.clone()));
        Self {
            inner: LocalProfileGateway::new(ProfileService::new(repository, clock)),
            get_error: RwLock::new(None),
            write_error: RwLock::new(None),
            held: RwLock::new(None),
            held_writes: RwLock::new(None),
            get_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    /// Stores a profile as if it had been created earlier.
    pub async fn seed(&self, candidate: &CandidateProfile) -> Result<ProfileView, ProfileError> {
        self.inner.create(candidate).await
    }

    /// Makes every read fail with `error` (or succeed again with `None`).
    pub fn fail_reads(&self, error: Option<ProfileError>) {
        *lock_write(&self.get_error) = error;
    }

    /// Makes every create/update fail with `error` (or succeed again with `None`).
    pub fn fail_writes(&self, error: Option<ProfileError>) {
        *lock_write(&self.write_error) = error;
    }

    /// Holds subsequent reads until the returned handle is notified.
    pub fn hold_reads(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock_write(&self.held) = Some(notify.clone());
        notify
    }

    /// Holds subsequent creates and updates until the returned handle is notified.
    pub fn hold_writes(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *lock_write(&self.held_writes) = Some(notify.clone());
        notify
    }

    /// Number of `get` calls so far.
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` and `update` calls so far, counted before any hold.
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    async fn begin_write(&self) -> Option<ProfileError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let held = lock_read(&self.held_writes).clone();
        if let Some(notify) = held {
            notify.notified().await;
        }
        lock_read(&self.write_error).clone()
    }
}

impl Default for MockProfileGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileGateway for MockProfileGateway {
    async fn get(&self, user_id: &UserId) -> Result<Option<ProfileView>, ProfileError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let held = lock_read(&self.held).clone();
        if let Some(notify) = held {
            notify.notified().await;
        }

        let failure = lock_read(&self.get_error).clone();
        match failure {
            Some(error) => Err(error),
            None => self.inner.get(user_id).await,
        }
    }

    async fn create(&self, candidate: &CandidateProfile) -> Result<ProfileView, ProfileError> {
        match self.begin_write().await {
            Some(error) => Err(error),
            None => self.inner.create(candidate).await,
        }
    }

    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileView, ProfileError> {
        match self.begin_write().await {
            Some(error) => Err(error),
            None => self.inner.update(user_id, update).await,
        }
    }
}

fn lock_read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock_write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

//! ProfileRepository port - durable storage of dating profiles.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::{NewProfile, Profile, ProfileChanges};

/// Storage for profiles, keyed by the owning user.
///
/// Uniqueness of `user_id` is a storage guarantee: two concurrent inserts for
/// the same user yield exactly one success.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile owned by a user.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on storage failure
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Persist a new profile.
    ///
    /// Sets both timestamps and marks the profile complete.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the user already has a profile
    /// - `DatabaseError` on storage failure
    async fn insert(&self, profile: NewProfile) -> Result<Profile, DomainError>;

    /// Apply the supplied fields to an existing profile.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if the user has no profile
    /// - `DatabaseError` on storage failure
    async fn update(&self, user_id: &UserId, changes: ProfileChanges)
        -> Result<Profile, DomainError>;
}

//! ProfileGateway port - how a client reaches the profile service.
//!
//! The client cache talks to the service only through this port, either over
//! HTTP or in process.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::{CandidateProfile, ProfileError, ProfileUpdate, ProfileView};

/// Remote (or local) profile operations as seen by a client.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch a user's profile. `Ok(None)` means the user still has to
    /// complete onboarding.
    ///
    /// # Errors
    ///
    /// - `Persistence` when the service failed to read
    /// - `Unavailable` when the service could not be reached
    async fn get(&self, user_id: &UserId) -> Result<Option<ProfileView>, ProfileError>;

    /// Submit the onboarding payload.
    ///
    /// # Errors
    ///
    /// - `Validation` with every rejected field
    /// - `DuplicateProfile` if the user already has a profile
    /// - `Persistence` / `Unavailable` as for [`ProfileGateway::get`]
    async fn create(&self, candidate: &CandidateProfile) -> Result<ProfileView, ProfileError>;

    /// Change some fields of an existing profile.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user has no profile
    /// - `Validation` with every rejected field
    /// - `Persistence` / `Unavailable` as for [`ProfileGateway::get`]
    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileView, ProfileError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_gateway_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ProfileGateway>();
    }
}

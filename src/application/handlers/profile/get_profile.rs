//! GetProfile - Query handler for reading a user's profile.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::foundation::{Clock, UserId};
use crate::domain::profile::{ProfileError, ProfileView};
use crate::ports::ProfileRepository;

/// Query for one user's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

/// Handler for reading profiles.
pub struct GetProfileHandler {
    repository: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl GetProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// `Ok(None)` when the user has not completed onboarding yet.
    pub async fn handle(&self, query: GetProfileQuery) -> Result<Option<ProfileView>, ProfileError> {
        let profile = self
            .repository
            .find_by_user(&query.user_id)
            .await
            .map_err(|e| {
                error!(user_id = %query.user_id, error = %e, "failed to read profile");
                ProfileError::Persistence(e.message().to_string())
            })?;

        debug!(user_id = %query.user_id, found = profile.is_some(), "profile lookup");
        Ok(profile.map(|p| p.view(self.clock.today())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::foundation::ManualClock;
    use crate::domain::profile::{DateOfBirth, Gender, NewProfile};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_none() {
        let clock = Arc::new(ManualClock::on_date(date(2025, 1, 1)));
        let handler =
            GetProfileHandler::new(Arc::new(InMemoryProfileRepository::new(clock.clone())), clock);

        let result = handler
            .handle(GetProfileQuery {
                user_id: UserId::new("nobody").unwrap(),
            })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_recomputes_age_on_each_read() {
        let clock = Arc::new(ManualClock::on_date(date(2025, 4, 9)));
        let repo = Arc::new(InMemoryProfileRepository::new(clock.clone()));
        let user_id = UserId::new("u1").unwrap();
        repo.insert(NewProfile {
            user_id: user_id.clone(),
            gender: Gender::Male,
            looking_for: Gender::Male,
            date_of_birth: DateOfBirth::new(date(2000, 4, 10)),
            contact_handle: None,
            bio: None,
        })
        .await
        .unwrap();
        let handler = GetProfileHandler::new(repo, clock.clone());

        let before = handler
            .handle(GetProfileQuery { user_id: user_id.clone() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before.age, 24);

        clock.advance_secs(24 * 3600);
        let after = handler
            .handle(GetProfileQuery { user_id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.age, 25);
    }
}

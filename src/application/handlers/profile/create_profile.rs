//! CreateProfile - Command handler for the onboarding submission.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::{Clock, ErrorCode};
use crate::domain::profile::{validate_create, CandidateProfile, ProfileError, ProfileView};
use crate::ports::ProfileRepository;

/// Command to create the caller's profile.
#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub candidate: CandidateProfile,
}

/// Handler for creating profiles.
pub struct CreateProfileHandler {
    repository: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: CreateProfileCommand) -> Result<ProfileView, ProfileError> {
        // 1. Validate against today's date
        let today = self.clock.today();
        let new_profile = validate_create(&cmd.candidate, today).map_err(|errors| {
            warn!(fields = %errors, "profile creation rejected");
            ProfileError::Validation(errors)
        })?;
        let user_id = new_profile.user_id.clone();

        // 2. Persist; storage owns uniqueness
        let profile = self.repository.insert(new_profile).await.map_err(|e| {
            if e.code() == ErrorCode::Conflict {
                warn!(user_id = %user_id, "profile already exists");
                ProfileError::DuplicateProfile(user_id.clone())
            } else {
                error!(user_id = %user_id, error = %e, "failed to store profile");
                ProfileError::Persistence(e.message().to_string())
            }
        })?;

        info!(user_id = %user_id, "profile created");
        Ok(profile.view(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::foundation::{DomainError, ManualClock, UserId};
    use crate::domain::profile::{NewProfile, Profile, ProfileChanges};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    const USER: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    struct FailingProfileRepository;

    #[async_trait]
    impl ProfileRepository for FailingProfileRepository {
        async fn find_by_user(&self, _user_id: &UserId) -> Result<Option<Profile>, DomainError> {
            Err(DomainError::database("connection reset"))
        }

        async fn insert(&self, _profile: NewProfile) -> Result<Profile, DomainError> {
            Err(DomainError::database("connection reset"))
        }

        async fn update(
            &self,
            _user_id: &UserId,
            _changes: ProfileChanges,
        ) -> Result<Profile, DomainError> {
            Err(DomainError::database("connection reset"))
        }
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::on_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()))
    }

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            user_id: Some(USER.to_string()),
            gender: Some("male".to_string()),
            looking_for: Some("female".to_string()),
            date_of_birth: Some("2000-01-01".to_string()),
            contact_handle: None,
            bio: Some("hi".to_string()),
        }
    }

    fn handler() -> CreateProfileHandler {
        let clock = clock();
        CreateProfileHandler::new(Arc::new(InMemoryProfileRepository::new(clock.clone())), clock)
    }

    #[tokio::test]
    async fn test_create_profile_success_returns_view_with_age() {
        let view = handler()
            .handle(CreateProfileCommand { candidate: candidate() })
            .await
            .unwrap();

        assert_eq!(view.user_id.as_str(), USER);
        assert_eq!(view.age, 25);
        assert!(view.is_complete);
        assert_eq!(view.bio.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn test_create_profile_twice_is_duplicate() {
        let handler = handler();
        handler
            .handle(CreateProfileCommand { candidate: candidate() })
            .await
            .unwrap();

        let err = handler
            .handle(CreateProfileCommand { candidate: candidate() })
            .await
            .unwrap_err();
        assert_eq!(err, ProfileError::DuplicateProfile(UserId::new(USER).unwrap()));
    }

    #[tokio::test]
    async fn test_create_profile_invalid_input_never_reaches_storage() {
        let clock = clock();
        let handler = CreateProfileHandler::new(Arc::new(FailingProfileRepository), clock);
        let bad = CandidateProfile {
            gender: Some("x".into()),
            ..candidate()
        };

        let err = handler
            .handle(CreateProfileCommand { candidate: bad })
            .await
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains("gender"));
    }

    #[tokio::test]
    async fn test_create_profile_storage_failure_is_persistence() {
        let handler = CreateProfileHandler::new(Arc::new(FailingProfileRepository), clock());
        let err = handler
            .handle(CreateProfileCommand { candidate: candidate() })
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::Persistence(_)));
    }
}

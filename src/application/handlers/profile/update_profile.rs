//! UpdateProfile - Command handler for partial profile edits.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::foundation::{Clock, ErrorCode, UserId};
use crate::domain::profile::{validate_update, ProfileError, ProfileUpdate, ProfileView};
use crate::ports::ProfileRepository;

/// Command to change some fields of an existing profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub update: ProfileUpdate,
}

/// Handler for updating profiles.
pub struct UpdateProfileHandler {
    repository: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateProfileHandler {
    pub fn new(repository: Arc<dyn ProfileRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<ProfileView, ProfileError> {
        let user_id = cmd.user_id;

        // 1. Existence first, so a missing profile is reported before bad input
        let existing = self
            .repository
            .find_by_user(&user_id)
            .await
            .map_err(|e| persistence_failure(&user_id, e.message()))?;
        if existing.is_none() {
            warn!(user_id = %user_id, "update for missing profile");
            return Err(ProfileError::NotFound(user_id));
        }

        // 2. Validate only the fields that were sent
        let today = self.clock.today();
        let changes = validate_update(&cmd.update, today).map_err(|errors| {
            warn!(user_id = %user_id, fields = %errors, "profile update rejected");
            ProfileError::Validation(errors)
        })?;

        // 3. Apply
        let profile = self
            .repository
            .update(&user_id, changes)
            .await
            .map_err(|e| match e.code() {
                ErrorCode::ProfileNotFound => ProfileError::NotFound(user_id.clone()),
                _ => persistence_failure(&user_id, e.message()),
            })?;

        info!(user_id = %user_id, "profile updated");
        Ok(profile.view(today))
    }
}

fn persistence_failure(user_id: &UserId, message: &str) -> ProfileError {
    error!(user_id = %user_id, error = message, "failed to update profile");
    ProfileError::Persistence(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::foundation::ManualClock;
    use crate::domain::profile::{ContactHandle, DateOfBirth, Gender, NewProfile};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seeded() -> (UpdateProfileHandler, UserId) {
        let clock = Arc::new(ManualClock::on_date(date(2025, 6, 1)));
        let repo = Arc::new(InMemoryProfileRepository::new(clock.clone()));
        let user_id = UserId::new("u1").unwrap();
        repo.insert(NewProfile {
            user_id: user_id.clone(),
            gender: Gender::Female,
            looking_for: Gender::Male,
            date_of_birth: DateOfBirth::new(date(1999, 9, 9)),
            contact_handle: Some(ContactHandle::new("snap").unwrap()),
            bio: None,
        })
        .await
        .unwrap();
        (UpdateProfileHandler::new(repo, clock), user_id)
    }

    #[tokio::test]
    async fn test_update_changes_only_bio() {
        let (handler, user_id) = seeded().await;

        let view = handler
            .handle(UpdateProfileCommand {
                user_id,
                update: ProfileUpdate::bio(Some("new bio")),
            })
            .await
            .unwrap();

        assert_eq!(view.bio.as_deref(), Some("new bio"));
        assert_eq!(view.gender, Gender::Female);
        assert_eq!(view.looking_for, Gender::Male);
        assert_eq!(view.contact_handle.as_deref(), Some("snap"));
    }

    #[tokio::test]
    async fn test_update_explicit_null_clears_contact_handle() {
        let (handler, user_id) = seeded().await;

        let view = handler
            .handle(UpdateProfileCommand {
                user_id,
                update: ProfileUpdate {
                    contact_handle: Some(None),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert!(view.contact_handle.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_profile_reports_not_found_before_validation() {
        let (handler, _) = seeded().await;
        let ghost = UserId::new("ghost").unwrap();

        let err = handler
            .handle(UpdateProfileCommand {
                user_id: ghost.clone(),
                update: ProfileUpdate {
                    gender: Some(Some("nope".into())),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err, ProfileError::NotFound(ghost));
    }

    #[tokio::test]
    async fn test_update_rejects_minor_birth_date() {
        let (handler, user_id) = seeded().await;

        let err = handler
            .handle(UpdateProfileCommand {
                user_id,
                update: ProfileUpdate {
                    date_of_birth: Some(Some("2010-01-01".into())),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains("date_of_birth"));
    }
}

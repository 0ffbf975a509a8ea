//! In-memory profile repository for tests and single-process deployments.
//!
//! Check-and-insert happens under one write lock, which gives the same
//! one-profile-per-user guarantee as the database primary key.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{Clock, DomainError, ErrorCode, UserId};
use crate::domain::profile::{NewProfile, Profile, ProfileChanges};
use crate::ports::ProfileRepository;

/// Profiles kept in a process-local map.
#[derive(Debug, Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryProfileRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of stored profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn insert(&self, new: NewProfile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&new.user_id) {
            return Err(DomainError::conflict(format!(
                "Profile already exists for user {}",
                new.user_id
            ))
            .with_detail("user_id", new.user_id.as_str()));
        }

        let profile = Profile::create(new, self.clock.now());
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(profile)
    }

    async fn update(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.get_mut(user_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found for user {}", user_id),
            )
        })?;

        profile.apply(changes, self.clock.now());
        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ManualClock;
    use crate::domain::profile::{Bio, DateOfBirth, Gender};
    use chrono::NaiveDate;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::on_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()))
    }

    fn new_profile(id: &str) -> NewProfile {
        NewProfile {
            user_id: UserId::new(id).unwrap(),
            gender: Gender::Female,
            looking_for: Gender::Female,
            date_of_birth: DateOfBirth::new(NaiveDate::from_ymd_opt(1995, 3, 3).unwrap()),
            contact_handle: None,
            bio: None,
        }
    }

    #[tokio::test]
    async fn insert_then_find() {
        let repo = InMemoryProfileRepository::new(clock());
        let created = repo.insert(new_profile("u1")).await.unwrap();
        assert!(created.is_complete());

        let found = repo.find_by_user(&UserId::new("u1").unwrap()).await.unwrap();
        assert_eq!(found, Some(created));
        assert!(repo
            .find_by_user(&UserId::new("u2").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn second_insert_for_same_user_conflicts() {
        let repo = InMemoryProfileRepository::new(clock());
        repo.insert(new_profile("u1")).await.unwrap();

        let err = repo.insert(new_profile("u1")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_admit_exactly_one() {
        let repo = InMemoryProfileRepository::new(clock());
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(new_profile("u1")).await })
            })
            .collect();

        let mut ok = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields_and_bumps_updated_at() {
        let clock = clock();
        let repo = InMemoryProfileRepository::new(clock.clone());
        let created = repo.insert(new_profile("u1")).await.unwrap();

        clock.advance_secs(60);
        let updated = repo
            .update(
                &UserId::new("u1").unwrap(),
                ProfileChanges {
                    bio: Some(Some(Bio::new("hello").unwrap())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.bio().map(Bio::as_str), Some("hello"));
        assert_eq!(updated.gender(), created.gender());
        assert_eq!(updated.created_at(), created.created_at());
        assert!(updated.updated_at().is_after(created.updated_at()));
    }

    #[tokio::test]
    async fn update_missing_profile_is_not_found() {
        let repo = InMemoryProfileRepository::new(clock());
        let err = repo
            .update(&UserId::new("ghost").unwrap(), ProfileChanges::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProfileNotFound);
    }
}

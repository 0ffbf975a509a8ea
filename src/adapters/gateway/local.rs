//! In-process profile gateway.
//!
//! Lets the client cache run against the service directly, e.g. in an
//! embedded deployment or in tests.

use async_trait::async_trait;

use crate::application::ProfileService;
use crate::domain::foundation::UserId;
use crate::domain::profile::{CandidateProfile, ProfileError, ProfileUpdate, ProfileView};
use crate::ports::ProfileGateway;

/// Calls the profile service without any transport.
#[derive(Clone)]
pub struct LocalProfileGateway {
    service: ProfileService,
}

impl LocalProfileGateway {
    pub fn new(service: ProfileService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProfileGateway for LocalProfileGateway {
    async fn get(&self, user_id: &UserId) -> Result<Option<ProfileView>, ProfileError> {
        self.service.get(user_id).await
    }

    async fn create(&self, candidate: &CandidateProfile) -> Result<ProfileView, ProfileError> {
        self.service.create(candidate.clone()).await
    }

    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileView, ProfileError> {
        self.service.update(user_id, update.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::foundation::ManualClock;
    use chrono::NaiveDate;
    use std::sync::Arc;

    #[tokio::test]
    async fn forwards_to_the_service() {
        let clock = Arc::new(ManualClock::on_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        let service =
            ProfileService::new(Arc::new(InMemoryProfileRepository::new(clock.clone())), clock);
        let gateway = LocalProfileGateway::new(service);
        let user_id = UserId::new("a3bb189e-8bf9-3888-9912-ace4e6543002").unwrap();

        assert!(gateway.get(&user_id).await.unwrap().is_none());

        let created = gateway
            .create(&CandidateProfile {
                user_id: Some(user_id.to_string()),
                gender: Some("male".into()),
                looking_for: Some("female".into()),
                date_of_birth: Some("1998-08-08".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.age, 26);
        assert_eq!(gateway.get(&user_id).await.unwrap(), Some(created));
    }
}

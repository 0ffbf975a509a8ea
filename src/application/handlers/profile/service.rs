//! ProfileService - the create/get/update facade used by HTTP handlers and
//! the in-process gateway.

use std::sync::Arc;

use crate::domain::foundation::{Clock, UserId};
use crate::domain::profile::{CandidateProfile, ProfileError, ProfileUpdate, ProfileView};
use crate::ports::ProfileRepository;

use super::{
    CreateProfileCommand, CreateProfileHandler, GetProfileHandler, GetProfileQuery,
    UpdateProfileCommand, UpdateProfileHandler,
};

/// Profile operations sharing one repository and one clock.
#[derive(Clone)]
pub struct ProfileService {
    create: Arc<CreateProfileHandler>,
    get: Arc<GetProfileHandler>,
    update: Arc<UpdateProfileHandler>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            create: Arc::new(CreateProfileHandler::new(repository.clone(), clock.clone())),
            get: Arc::new(GetProfileHandler::new(repository.clone(), clock.clone())),
            update: Arc::new(UpdateProfileHandler::new(repository, clock)),
        }
    }

    pub async fn create(&self, candidate: CandidateProfile) -> Result<ProfileView, ProfileError> {
        self.create.handle(CreateProfileCommand { candidate }).await
    }

    pub async fn get(&self, user_id: &UserId) -> Result<Option<ProfileView>, ProfileError> {
        self.get
            .handle(GetProfileQuery {
                user_id: user_id.clone(),
            })
            .await
    }

    pub async fn update(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<ProfileView, ProfileError> {
        self.update
            .handle(UpdateProfileCommand {
                user_id: user_id.clone(),
                update,
            })
            .await
    }
}

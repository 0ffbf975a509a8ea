//! Profile command and query handlers.

mod create_profile;
mod get_profile;
mod service;
mod update_profile;

pub use create_profile::{CreateProfileCommand, CreateProfileHandler};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use service::ProfileService;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};

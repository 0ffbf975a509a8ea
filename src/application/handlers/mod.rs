//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod profile;

pub use profile::{
    CreateProfileCommand, CreateProfileHandler, GetProfileHandler, GetProfileQuery,
    ProfileService, UpdateProfileCommand, UpdateProfileHandler,
};

//! Profile module - the dating profile a user completes during onboarding.
//!
//! # Domain Invariants
//!
//! - One profile per user, enforced by storage
//! - Holders are at least 18 years old when the profile is written
//! - Age is derived from the date of birth on every read, never stored
//! - `is_complete` is true for every persisted profile
//! - `user_id` and `is_complete` are never caller controlled

mod errors;
mod profile;
mod validator;
mod values;

pub use errors::{FieldErrors, ProfileError};
pub use profile::{NewProfile, Profile, ProfileChanges, ProfileView};
pub use validator::{validate_create, validate_update, CandidateProfile, ProfileUpdate};
pub use values::{
    Bio, ContactHandle, DateOfBirth, Gender, BIO_MAX_CHARS, CONTACT_HANDLE_MAX_CHARS, MINIMUM_AGE,
};

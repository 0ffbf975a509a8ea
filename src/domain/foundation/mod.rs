//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the clock abstraction, authentication
//! types and error types that form the vocabulary of the onboarding domain.

mod auth;
mod clock;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use timestamp::Timestamp;

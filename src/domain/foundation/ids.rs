//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// User identifier (issued by the external auth provider).
///
/// Treated as opaque everywhere except profile creation, where the
/// identity must be a well-formed UUID. UUID-shaped ids are always stored in
/// their lowercase hyphenated form, whichever constructor (or deserializer)
/// produced them, so the same identity compares equal however it was cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        match Uuid::parse_str(id.trim()) {
            Ok(uuid) => Ok(Self::canonical(uuid)),
            Err(_) => Ok(Self(id)),
        }
    }

    /// Creates a UserId that must be a well-formed UUID.
    pub fn parse_uuid(id: &str) -> Result<Self, ValidationError> {
        let uuid = Uuid::parse_str(id.trim())
            .map_err(|_| ValidationError::invalid_format("user_id", "must be a valid UUID"))?;
        Ok(Self::canonical(uuid))
    }

    fn canonical(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! HTTP DTOs for profile endpoints.
//!
//! Request bodies are the domain's raw payloads (`CandidateProfile`,
//! `ProfileUpdate`), so only the response envelopes live here. They are
//! shared with the client gateway, which parses the same shapes.

use serde::{Deserialize, Serialize};

use crate::domain::profile::{FieldErrors, ProfileView};

/// Successful profile response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub profile: ProfileView,
}

impl ProfileResponse {
    pub fn new(profile: ProfileView) -> Self {
        Self {
            success: true,
            message: None,
            profile,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Failure envelope. `errors` is present for field level failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

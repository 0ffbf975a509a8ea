//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Session token validation settings.
///
/// Without a `jwt_secret` the API runs unauthenticated and every request is
/// anonymous.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret shared with the auth provider
    pub jwt_secret: Option<SecretString>,

    /// Expected `aud` claim
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(secret) = &self.jwt_secret {
            if secret.expose_secret().trim().is_empty() {
                return Err(ValidationError::EmptyJwtSecret);
            }
            if self.jwt_audience.is_empty() {
                return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_audience: default_jwt_audience(),
        }
    }
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

//! Profile error types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{UserId, ValidationError};

/// Field name to messages, ordered by field name.
///
/// Every violated field is reported, not just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set holding one message for one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Records a value-object error under `field`.
    pub fn add_validation(&mut self, field: &str, error: &ValidationError) {
        self.add(field, describe(field, error));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

fn describe(field: &str, error: &ValidationError) -> String {
    let label = field.replace('_', " ");
    match error {
        ValidationError::EmptyField { .. } => format!("The {} field is required.", label),
        ValidationError::TooLong { max, .. } => {
            format!("The {} may not be greater than {} characters.", label, max)
        }
        ValidationError::InvalidFormat { reason, .. } => format!("The {} {}.", label, reason),
    }
}

/// Failures surfaced by the profile service and the client gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Input rejected; correct the listed fields and retry.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// A profile already exists for this identity.
    #[error("a profile already exists for user {0}")]
    DuplicateProfile(UserId),

    /// No profile exists for this identity.
    #[error("no profile found for user {0}")]
    NotFound(UserId),

    /// Storage failed.
    #[error("profile storage failed: {0}")]
    Persistence(String),

    /// The profile service could not be reached.
    #[error("profile service unavailable: {0}")]
    Unavailable(String),
}

impl ProfileError {
    /// Field errors, for the validation variant.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ProfileError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ProfileError {
    fn from(errors: FieldErrors) -> Self {
        ProfileError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_collect_per_field_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("looking_for", "bad");
        errors.add("gender", "bad");
        errors.add("gender", "worse");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("gender").unwrap(), ["bad", "worse"]);
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["gender", "looking_for"]);
    }

    #[test]
    fn field_errors_serialize_as_plain_map() {
        let errors = FieldErrors::single("bio", "too long");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "bio": ["too long"] }));
    }

    #[test]
    fn validation_errors_are_described_for_humans() {
        let mut errors = FieldErrors::new();
        errors.add_validation("bio", &ValidationError::too_long("bio", 500, 501));
        errors.add_validation("user_id", &ValidationError::empty_field("user_id"));

        assert_eq!(
            errors.get("bio").unwrap()[0],
            "The bio may not be greater than 500 characters."
        );
        assert_eq!(errors.get("user_id").unwrap()[0], "The user id field is required.");
    }

    #[test]
    fn into_result_only_succeeds_when_empty() {
        assert_eq!(FieldErrors::new().into_result(|| 7), Ok(7));
        assert!(FieldErrors::single("x", "y").into_result(|| 7).is_err());
    }

    #[test]
    fn profile_error_exposes_field_errors() {
        let err = ProfileError::from(FieldErrors::single("gender", "bad"));
        assert!(err.field_errors().unwrap().contains("gender"));
        assert!(ProfileError::Persistence("x".into()).field_errors().is_none());
    }
}

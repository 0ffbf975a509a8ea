//! Profile value objects: gender, date of birth (with derived age), and the
//! length-limited free text fields.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Minimum age (in whole years) required to hold a profile.
pub const MINIMUM_AGE: u32 = 18;

/// Maximum length of the contact handle, in characters.
pub const CONTACT_HANDLE_MAX_CHARS: usize = 255;

/// Maximum length of the bio, in characters.
pub const BIO_MAX_CHARS: usize = 500;

/// Gender, used both for the user and for who they are looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Accepts exactly `male` or `female`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ValidationError::invalid_format(
                "gender",
                "must be one of: male, female",
            )),
        }
    }
}

/// Date of birth. Age is always derived from it, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateOfBirth(NaiveDate);

impl DateOfBirth {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Self(dt.date_naive()))
            .map_err(|_| ValidationError::invalid_format("date_of_birth", "is not a valid date"))
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Whole years between the birth date and `today`.
    ///
    /// The year difference is reduced by one while this year's birthday has
    /// not been reached. Dates in the future yield zero.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut years = today.year() - self.0.year();
        if (today.month(), today.day()) < (self.0.month(), self.0.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// True when the holder is at least [`MINIMUM_AGE`] on `today`.
    pub fn is_adult_on(&self, today: NaiveDate) -> bool {
        self.0 <= today && self.age_on(today) >= MINIMUM_AGE
    }
}

impl fmt::Display for DateOfBirth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Handle other users use to reach this person (a Snapchat username in
/// the mobile app).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactHandle(String);

impl ContactHandle {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        bounded_text("contact_handle", value.into(), CONTACT_HANDLE_MAX_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free text self description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bio(String);

impl Bio {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        bounded_text("bio", value.into(), BIO_MAX_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn bounded_text(field: &str, value: String, max: usize) -> Result<String, ValidationError> {
    let chars = value.chars().count();
    if chars > max {
        return Err(ValidationError::too_long(field, max, chars));
    }
    Ok(value)
}

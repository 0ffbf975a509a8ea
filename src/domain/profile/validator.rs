//! Profile validation.
//!
//! Incoming payloads keep every field as a raw optional string so that a
//! wrong enum value or an unparseable date becomes a field error instead of
//! a deserialization failure. Validation is pure; the evaluation date is
//! passed in by the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::errors::FieldErrors;
use super::profile::{NewProfile, ProfileChanges};
use super::values::{Bio, ContactHandle, DateOfBirth, Gender, MINIMUM_AGE};
use crate::domain::foundation::{UserId, ValidationError};

/// Raw creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub looking_for: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default, alias = "snapchat_username")]
    pub contact_handle: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Raw partial update payload.
///
/// Outer `None` means the field was not sent; `Some(None)` is an explicit
/// null. `user_id` and `is_complete` are not accepted and are dropped if a
/// caller sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub looking_for: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(
        default,
        alias = "snapchat_username",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_handle: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
}

impl ProfileUpdate {
    /// Update that sets or clears only the bio.
    pub fn bio(bio: Option<&str>) -> Self {
        Self {
            bio: Some(bio.map(str::to_string)),
            ..Default::default()
        }
    }
}

// A key that is present (even as null) deserializes to `Some(_)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Checks a creation payload against every creation rule at once.
pub fn validate_create(
    candidate: &CandidateProfile,
    today: NaiveDate,
) -> Result<NewProfile, FieldErrors> {
    let mut errors = FieldErrors::new();

    let user_id = required(&mut errors, "user_id", &candidate.user_id, UserId::parse_uuid);
    let gender = required(&mut errors, "gender", &candidate.gender, parse_gender);
    let looking_for = required(&mut errors, "looking_for", &candidate.looking_for, parse_gender);
    let date_of_birth = required(&mut errors, "date_of_birth", &candidate.date_of_birth, |raw| {
        parse_adult_birth_date(raw, today)
    });
    let contact_handle = optional(
        &mut errors,
        "contact_handle",
        &candidate.contact_handle,
        ContactHandle::new,
    );
    let bio = optional(&mut errors, "bio", &candidate.bio, Bio::new);

    match (user_id, gender, looking_for, date_of_birth) {
        (Some(user_id), Some(gender), Some(looking_for), Some(date_of_birth))
            if errors.is_empty() =>
        {
            Ok(NewProfile {
                user_id,
                gender,
                looking_for,
                date_of_birth,
                contact_handle: contact_handle.flatten(),
                bio: bio.flatten(),
            })
        }
        _ => Err(errors),
    }
}

/// Checks the fields present in an update; absent fields are not touched.
pub fn validate_update(
    update: &ProfileUpdate,
    today: NaiveDate,
) -> Result<ProfileChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    let gender = non_nullable(&mut errors, "gender", &update.gender, parse_gender);
    let looking_for = non_nullable(&mut errors, "looking_for", &update.looking_for, parse_gender);
    let date_of_birth = non_nullable(&mut errors, "date_of_birth", &update.date_of_birth, |raw| {
        parse_adult_birth_date(raw, today)
    });
    let contact_handle = update
        .contact_handle
        .as_ref()
        .and_then(|value| optional(&mut errors, "contact_handle", value, ContactHandle::new));
    let bio = update
        .bio
        .as_ref()
        .and_then(|value| optional(&mut errors, "bio", value, Bio::new));

    errors.into_result(|| ProfileChanges {
        gender,
        looking_for,
        date_of_birth,
        contact_handle,
        bio,
    })
}

/// Trims the input; a blank string counts as missing.
fn normalize(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &Option<String>,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Option<T> {
    let Some(value) = normalize(raw) else {
        errors.add_validation(field, &ValidationError::empty_field(field));
        return None;
    };
    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            errors.add_validation(field, &err);
            None
        }
    }
}

/// `Some(None)` for a blank value, `None` when the value was rejected.
fn optional<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &Option<String>,
    parse: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Option<Option<T>> {
    let Some(value) = normalize(raw) else {
        return Some(None);
    };
    match parse(value.to_string()) {
        Ok(parsed) => Some(Some(parsed)),
        Err(err) => {
            errors.add_validation(field, &err);
            None
        }
    }
}

fn non_nullable<T>(
    errors: &mut FieldErrors,
    field: &str,
    raw: &Option<Option<String>>,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Option<T> {
    raw.as_ref()
        .and_then(|value| required(errors, field, value, parse))
}

fn parse_gender(raw: &str) -> Result<Gender, ValidationError> {
    raw.parse()
}

fn parse_adult_birth_date(raw: &str, today: NaiveDate) -> Result<DateOfBirth, ValidationError> {
    let date_of_birth = DateOfBirth::parse(raw)?;
    if !date_of_birth.is_adult_on(today) {
        return Err(ValidationError::invalid_format(
            "date_of_birth",
            format!("must be at least {} years ago", MINIMUM_AGE),
        ));
    }
    Ok(date_of_birth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const USER: &str = "9b2f6d8e-0c1a-4a57-9a43-1d1f5e0f8a11";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            user_id: Some(USER.to_string()),
            gender: Some("male".to_string()),
            looking_for: Some("female".to_string()),
            date_of_birth: Some("2000-01-01".to_string()),
            contact_handle: Some("snap".to_string()),
            bio: None,
        }
    }

    #[test]
    fn valid_candidate_passes() {
        let profile = validate_create(&candidate(), today()).unwrap();
        assert_eq!(profile.user_id.as_str(), USER);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.looking_for, Gender::Female);
        assert_eq!(profile.contact_handle.unwrap().as_str(), "snap");
        assert!(profile.bio.is_none());
    }

    #[test]
    fn every_violation_is_reported_together() {
        let bad = CandidateProfile {
            user_id: Some("not-a-uuid".into()),
            gender: Some("x".into()),
            looking_for: None,
            date_of_birth: Some("2010-01-01".into()),
            contact_handle: Some("a".repeat(256)),
            bio: Some("b".repeat(501)),
        };

        let errors = validate_create(&bad, today()).unwrap_err();
        for field in [
            "user_id",
            "gender",
            "looking_for",
            "date_of_birth",
            "contact_handle",
            "bio",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn invalid_gender_reports_only_gender() {
        let bad = CandidateProfile {
            gender: Some("x".into()),
            ..candidate()
        };
        let errors = validate_create(&bad, today()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["gender"]);
    }

    #[test]
    fn inputs_are_trimmed_and_blank_means_missing() {
        let padded = CandidateProfile {
            gender: Some("  female ".into()),
            contact_handle: Some("   ".into()),
            bio: Some("".into()),
            ..candidate()
        };
        let profile = validate_create(&padded, today()).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert!(profile.contact_handle.is_none());
        assert!(profile.bio.is_none());

        let blank_gender = CandidateProfile {
            gender: Some(" ".into()),
            ..candidate()
        };
        assert!(validate_create(&blank_gender, today())
            .unwrap_err()
            .contains("gender"));
    }

    #[test]
    fn turning_eighteen_today_is_admitted() {
        let adult = CandidateProfile {
            date_of_birth: Some("2007-06-01".into()),
            ..candidate()
        };
        assert!(validate_create(&adult, today()).is_ok());

        let minor = CandidateProfile {
            date_of_birth: Some("2007-06-02".into()),
            ..candidate()
        };
        let errors = validate_create(&minor, today()).unwrap_err();
        assert_eq!(
            errors.get("date_of_birth").unwrap()[0],
            "The date of birth must be at least 18 years ago."
        );
    }

    #[test]
    fn user_id_is_normalized_to_lowercase() {
        let upper = CandidateProfile {
            user_id: Some(USER.to_uppercase()),
            ..candidate()
        };
        assert_eq!(validate_create(&upper, today()).unwrap().user_id.as_str(), USER);
    }

    #[test]
    fn snapchat_username_alias_is_accepted() {
        let json = serde_json::json!({
            "user_id": USER,
            "gender": "male",
            "looking_for": "female",
            "date_of_birth": "2000-01-01",
            "snapchat_username": "ghost",
        });
        let candidate: CandidateProfile = serde_json::from_value(json).unwrap();
        assert_eq!(candidate.contact_handle.as_deref(), Some("ghost"));
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let update: ProfileUpdate =
            serde_json::from_value(serde_json::json!({ "bio": null })).unwrap();
        assert_eq!(update.bio, Some(None));
        assert_eq!(update.contact_handle, None);

        let changes = validate_update(&update, today()).unwrap();
        assert_eq!(changes.bio, Some(None));
        assert!(changes.contact_handle.is_none());
        assert!(changes.gender.is_none());
    }

    #[test]
    fn update_ignores_identity_and_completion_fields() {
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({
            "user_id": "someone-else",
            "is_complete": false,
            "bio": "hi",
        }))
        .unwrap();
        let changes = validate_update(&update, today()).unwrap();
        assert_eq!(changes.bio.unwrap().unwrap().as_str(), "hi");
    }

    #[test]
    fn update_rejects_null_for_required_fields() {
        let update: ProfileUpdate =
            serde_json::from_value(serde_json::json!({ "gender": null, "date_of_birth": null }))
                .unwrap();
        let errors = validate_update(&update, today()).unwrap_err();
        assert!(errors.contains("gender"));
        assert!(errors.contains("date_of_birth"));
    }

    #[test]
    fn update_applies_creation_rules_to_present_fields() {
        let update = ProfileUpdate {
            looking_for: Some(Some("other".into())),
            bio: Some(Some("b".repeat(501))),
            ..Default::default()
        };
        let errors = validate_update(&update, today()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["bio", "looking_for"]);
    }

    #[test]
    fn empty_update_is_valid_and_changes_nothing() {
        let changes = validate_update(&ProfileUpdate::default(), today()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let json = serde_json::to_value(ProfileUpdate::bio(None)).unwrap();
        assert_eq!(json, serde_json::json!({ "bio": null }));
    }

    proptest! {
        #[test]
        fn bios_within_limit_always_pass(bio in "[a-zA-Z0-9 ]{1,500}") {
            let with_bio = CandidateProfile { bio: Some(bio), ..candidate() };
            prop_assert!(validate_create(&with_bio, today()).is_ok());
        }

        #[test]
        fn bios_over_limit_always_fail(extra in 1usize..200) {
            let with_bio = CandidateProfile { bio: Some("x".repeat(500 + extra)), ..candidate() };
            let errors = validate_create(&with_bio, today()).unwrap_err();
            prop_assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["bio"]);
        }

        #[test]
        fn unknown_genders_never_validate(gender in "[a-z]{1,12}") {
            prop_assume!(gender != "male" && gender != "female");
            let bad = CandidateProfile { gender: Some(gender), ..candidate() };
            prop_assert!(validate_create(&bad, today()).is_err());
        }
    }
}

//! Profile aggregate and its create/update/read shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::values::{Bio, ContactHandle, DateOfBirth, Gender};
use crate::domain::foundation::{Timestamp, UserId};

/// A validated profile ready to be persisted for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub user_id: UserId,
    pub gender: Gender,
    pub looking_for: Gender,
    pub date_of_birth: DateOfBirth,
    pub contact_handle: Option<ContactHandle>,
    pub bio: Option<Bio>,
}

/// A validated partial update.
///
/// `None` leaves a field untouched. For the nullable fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub gender: Option<Gender>,
    pub looking_for: Option<Gender>,
    pub date_of_birth: Option<DateOfBirth>,
    pub contact_handle: Option<Option<ContactHandle>>,
    pub bio: Option<Option<Bio>>,
}

impl ProfileChanges {
    /// True when the update would not touch any field.
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.looking_for.is_none()
            && self.date_of_birth.is_none()
            && self.contact_handle.is_none()
            && self.bio.is_none()
    }
}

/// A persisted dating profile.
///
/// # Invariants
///
/// - exactly one profile exists per `user_id`
/// - `is_complete` is true for every persisted profile
/// - `user_id` never changes after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    user_id: UserId,
    gender: Gender,
    looking_for: Gender,
    date_of_birth: DateOfBirth,
    contact_handle: Option<ContactHandle>,
    bio: Option<Bio>,
    is_complete: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    /// Creates the stored form of a freshly validated profile.
    pub fn create(new: NewProfile, now: Timestamp) -> Self {
        Self {
            user_id: new.user_id,
            gender: new.gender,
            looking_for: new.looking_for,
            date_of_birth: new.date_of_birth,
            contact_handle: new.contact_handle,
            bio: new.bio,
            is_complete: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a profile from storage without re-running validation.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        user_id: UserId,
        gender: Gender,
        looking_for: Gender,
        date_of_birth: DateOfBirth,
        contact_handle: Option<ContactHandle>,
        bio: Option<Bio>,
        is_complete: bool,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            gender,
            looking_for,
            date_of_birth,
            contact_handle,
            bio,
            is_complete,
            created_at,
            updated_at,
        }
    }

    /// Applies only the supplied fields and bumps `updated_at`.
    pub fn apply(&mut self, changes: ProfileChanges, now: Timestamp) {
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(looking_for) = changes.looking_for {
            self.looking_for = looking_for;
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(contact_handle) = changes.contact_handle {
            self.contact_handle = contact_handle;
        }
        if let Some(bio) = changes.bio {
            self.bio = bio;
        }
        self.updated_at = now;
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn looking_for(&self) -> Gender {
        self.looking_for
    }

    pub fn date_of_birth(&self) -> DateOfBirth {
        self.date_of_birth
    }

    pub fn contact_handle(&self) -> Option<&ContactHandle> {
        self.contact_handle.as_ref()
    }

    pub fn bio(&self) -> Option<&Bio> {
        self.bio.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Age in whole years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        self.date_of_birth.age_on(today)
    }

    /// Outbound projection with the age derived for `today`.
    pub fn view(&self, today: NaiveDate) -> ProfileView {
        ProfileView {
            user_id: self.user_id.clone(),
            gender: self.gender,
            looking_for: self.looking_for,
            date_of_birth: self.date_of_birth,
            age: self.age_on(today),
            contact_handle: self.contact_handle.as_ref().map(|h| h.as_str().to_string()),
            bio: self.bio.as_ref().map(|b| b.as_str().to_string()),
            is_complete: self.is_complete,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Profile as it travels over the wire, always with the derived age.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub user_id: UserId,
    pub gender: Gender,
    pub looking_for: Gender,
    pub date_of_birth: DateOfBirth,
    pub age: u32,
    pub contact_handle: Option<String>,
    pub bio: Option<String>,
    pub is_complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

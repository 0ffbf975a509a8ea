//! PostgreSQL implementation of ProfileRepository.
//!
//! Uniqueness per user comes from the primary key on `profiles.user_id`;
//! timestamps come from the database clock.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::profile::{
    Bio, ContactHandle, DateOfBirth, Gender, NewProfile, Profile, ProfileChanges,
};
use crate::ports::ProfileRepository;

const PROFILE_COLUMNS: &str = "user_id, gender, looking_for, date_of_birth, contact_handle, \
                               bio, is_complete, created_at, updated_at";

/// PostgreSQL implementation of ProfileRepository.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch profile: {}", e)))?;

        row.map(row_to_profile).transpose()
    }

    async fn insert(&self, profile: NewProfile) -> Result<Profile, DomainError> {
        let result = sqlx::query(&format!(
            r#"
            INSERT INTO profiles (
                user_id, gender, looking_for, date_of_birth, contact_handle, bio,
                is_complete, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, TRUE, NOW(), NOW())
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(profile.user_id.as_str())
        .bind(profile.gender.as_str())
        .bind(profile.looking_for.as_str())
        .bind(profile.date_of_birth.as_date())
        .bind(profile.contact_handle.as_ref().map(ContactHandle::as_str))
        .bind(profile.bio.as_ref().map(Bio::as_str))
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row_to_profile(row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::conflict(format!(
                    "Profile already exists for user {}",
                    profile.user_id
                ))
                .with_detail("user_id", profile.user_id.as_str()))
            }
            Err(e) => Err(DomainError::database(format!(
                "Failed to insert profile: {}",
                e
            ))),
        }
    }

    async fn update(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<Profile, DomainError> {
        // Nullable columns carry a "was supplied" flag so an explicit null
        // can be told apart from "leave as is".
        let row = sqlx::query(&format!(
            r#"
            UPDATE profiles SET
                gender = COALESCE($2, gender),
                looking_for = COALESCE($3, looking_for),
                date_of_birth = COALESCE($4, date_of_birth),
                contact_handle = CASE WHEN $5 THEN $6 ELSE contact_handle END,
                bio = CASE WHEN $7 THEN $8 ELSE bio END,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(changes.gender.map(|g| g.as_str()))
        .bind(changes.looking_for.map(|g| g.as_str()))
        .bind(changes.date_of_birth.map(|d| d.as_date()))
        .bind(changes.contact_handle.is_some())
        .bind(
            changes
                .contact_handle
                .as_ref()
                .and_then(|h| h.as_ref().map(|h| h.as_str().to_string())),
        )
        .bind(changes.bio.is_some())
        .bind(
            changes
                .bio
                .as_ref()
                .and_then(|b| b.as_ref().map(|b| b.as_str().to_string())),
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update profile: {}", e)))?;

        match row {
            Some(row) => row_to_profile(row),
            None => Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found for user {}", user_id),
            )),
        }
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn row_to_profile(row: PgRow) -> Result<Profile, DomainError> {
    let user_id: String = column(&row, "user_id")?;
    let gender: String = column(&row, "gender")?;
    let looking_for: String = column(&row, "looking_for")?;
    let date_of_birth: NaiveDate = column(&row, "date_of_birth")?;
    let contact_handle: Option<String> = column(&row, "contact_handle")?;
    let bio: Option<String> = column(&row, "bio")?;
    let is_complete: bool = column(&row, "is_complete")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;
    let updated_at: DateTime<Utc> = column(&row, "updated_at")?;

    Ok(Profile::reconstitute(
        UserId::new(user_id).map_err(corrupt)?,
        str_to_gender(&gender)?,
        str_to_gender(&looking_for)?,
        DateOfBirth::new(date_of_birth),
        contact_handle.map(ContactHandle::new).transpose().map_err(corrupt)?,
        bio.map(Bio::new).transpose().map_err(corrupt)?,
        is_complete,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn str_to_gender(s: &str) -> Result<Gender, DomainError> {
    s.parse().map_err(corrupt)
}

fn corrupt(e: impl std::fmt::Display) -> DomainError {
    DomainError::database(format!("Invalid stored profile: {}", e))
}

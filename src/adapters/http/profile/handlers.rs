//! HTTP handlers for profile endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::adapters::http::middleware::OptionalAuth;
use crate::application::ProfileService;
use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::domain::profile::{CandidateProfile, FieldErrors, ProfileError, ProfileUpdate};

use super::dto::{ErrorResponse, ProfileResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/profiles - Create the caller's profile
pub async fn create_profile(
    State(service): State<ProfileService>,
    OptionalAuth(caller): OptionalAuth,
    body: Result<Json<CandidateProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ProfileApiError> {
    let Json(candidate) = body?;
    if let Some(user_id) = candidate.user_id.as_deref() {
        warn_on_foreign_target(caller.as_ref(), user_id.trim());
    }

    let view = service.create(candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::new(view).with_message("Profile created successfully")),
    ))
}

/// GET /api/profiles/:user_id - Read a profile
pub async fn get_profile(
    State(service): State<ProfileService>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ProfileApiError> {
    let user_id = path_user(user_id)?;

    match service.get(&user_id).await? {
        Some(view) => Ok(Json(ProfileResponse::new(view))),
        None => Err(ProfileError::NotFound(user_id).into()),
    }
}

/// PUT /api/profiles/:user_id - Change some fields of a profile
pub async fn update_profile(
    State(service): State<ProfileService>,
    OptionalAuth(caller): OptionalAuth,
    Path(user_id): Path<String>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ProfileApiError> {
    let user_id = path_user(user_id)?;
    let Json(update) = body?;
    warn_on_foreign_target(caller.as_ref(), user_id.as_str());

    let view = service.update(&user_id, update).await?;

    Ok(Json(
        ProfileResponse::new(view).with_message("Profile updated successfully"),
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn path_user(raw: String) -> Result<UserId, ProfileApiError> {
    UserId::new(raw).map_err(|e| {
        let mut errors = FieldErrors::new();
        errors.add_validation("user_id", &e);
        ProfileApiError(ProfileError::Validation(errors))
    })
}

// Callers may only touch their own profile; that is not enforced yet, only
// made visible.
fn warn_on_foreign_target(caller: Option<&AuthenticatedUser>, target: &str) {
    if let Some(caller) = caller {
        if !caller.id.as_str().eq_ignore_ascii_case(target) {
            warn!(caller = %caller.id, target_user = target, "caller is acting on another user's profile");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

/// Profile failures rendered as the JSON failure envelope.
#[derive(Debug)]
pub struct ProfileApiError(ProfileError);

impl From<ProfileError> for ProfileApiError {
    fn from(err: ProfileError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ProfileApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "malformed request body");
        Self(ProfileError::Validation(FieldErrors::single(
            "body",
            rejection.body_text(),
        )))
    }
}

impl IntoResponse for ProfileApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            ProfileError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("The given data was invalid.").with_errors(errors),
            ),
            ProfileError::DuplicateProfile(user_id) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("Profile already exists").with_errors(FieldErrors::single(
                    "user_id",
                    format!("A profile already exists for user {}.", user_id),
                )),
            ),
            ProfileError::NotFound(_) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new("Profile not found"))
            }
            ProfileError::Persistence(detail) | ProfileError::Unavailable(detail) => {
                error!(error = %detail, "profile request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Failed to process profile request"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_422() {
        let response =
            ProfileApiError(ProfileError::Validation(FieldErrors::single("bio", "x"))).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_maps_to_409() {
        let response =
            ProfileApiError(ProfileError::DuplicateProfile(UserId::new("u1").unwrap())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response =
            ProfileApiError(ProfileError::NotFound(UserId::new("u1").unwrap())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn persistence_maps_to_500() {
        let response =
            ProfileApiError(ProfileError::Persistence("disk on fire".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Profile gateway over the REST API.
//!
//! Sends `Authorization: Bearer <token>` whenever the token source has a
//! session, and nothing otherwise.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use secrecy::ExposeSecret;

use crate::adapters::http::profile::{ErrorResponse, ProfileResponse};
use crate::config::ClientConfig;
use crate::domain::foundation::UserId;
use crate::domain::profile::{
    CandidateProfile, FieldErrors, ProfileError, ProfileUpdate, ProfileView,
};
use crate::ports::{AccessTokenSource, ProfileGateway};

/// REST client for `/api/profiles`.
#[derive(Clone)]
pub struct HttpProfileGateway {
    http_client: reqwest::Client,
    /// API root including the `/api` prefix.
    base_url: Url,
    tokens: Arc<dyn AccessTokenSource>,
}

impl HttpProfileGateway {
    pub fn new(
        base_url: impl AsRef<str>,
        tokens: Arc<dyn AccessTokenSource>,
        timeout: Duration,
    ) -> Result<Self, ProfileError> {
        let base_url = Url::parse(base_url.as_ref())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ProfileError::Unavailable(format!(
                    "invalid profile API base URL: {}",
                    base_url.as_ref()
                ))
            })?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProfileError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            tokens,
        })
    }

    /// Builds the gateway from the `client` configuration section.
    pub fn from_config(
        config: &ClientConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, ProfileError> {
        config
            .validate()
            .map_err(|e| ProfileError::Unavailable(e.to_string()))?;
        Self::new(&config.api_base_url, tokens, config.request_timeout())
    }

    /// Appends percent-encoded path segments to the API root.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProfileError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProfileError::Unavailable("profile API base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http_client.request(method, url);
        match self.tokens.access_token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ProfileError> {
        builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "profile API unreachable");
            ProfileError::Unavailable(e.to_string())
        })
    }
}

#[async_trait]
impl ProfileGateway for HttpProfileGateway {
    async fn get(&self, user_id: &UserId) -> Result<Option<ProfileView>, ProfileError> {
        let url = self.endpoint(&["profiles", user_id.as_str()])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            // Only the API's own failure envelope means "no profile"; a bare
            // 404 is a wrong base URL or route.
            return match error_body(response).await {
                Some(body) if !body.success => Ok(None),
                _ => Err(route_missing()),
            };
        }
        profile_from(response, Some(user_id)).await.map(Some)
    }

    async fn create(&self, candidate: &CandidateProfile) -> Result<ProfileView, ProfileError> {
        let url = self.endpoint(&["profiles"])?;
        let response = self
            .send(self.request(Method::POST, url).json(candidate))
            .await?;

        let user_id = candidate
            .user_id
            .as_deref()
            .and_then(|id| UserId::new(id.trim()).ok());
        profile_from(response, user_id.as_ref()).await
    }

    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<ProfileView, ProfileError> {
        let url = self.endpoint(&["profiles", user_id.as_str()])?;
        let response = self
            .send(self.request(Method::PUT, url).json(update))
            .await?;

        profile_from(response, Some(user_id)).await
    }
}

async fn profile_from(
    response: Response,
    user_id: Option<&UserId>,
) -> Result<ProfileView, ProfileError> {
    let status = response.status();
    if status.is_success() {
        let body: ProfileResponse = response.json().await.map_err(|e| {
            ProfileError::Persistence(format!("unreadable profile response: {}", e))
        })?;
        return Ok(body.profile);
    }

    let body = error_body(response).await;
    Err(failure(status, body, user_id))
}

async fn error_body(response: Response) -> Option<ErrorResponse> {
    response.json::<ErrorResponse>().await.ok()
}

fn route_missing() -> ProfileError {
    tracing::warn!("profile API answered 404 without an error envelope");
    ProfileError::Persistence("profile API route not found; check the base URL".into())
}

/// Maps a non-success response onto the error the caller would have seen
/// in process. `body` is `None` when the response was not the API's
/// failure envelope.
fn failure(
    status: StatusCode,
    body: Option<ErrorResponse>,
    user_id: Option<&UserId>,
) -> ProfileError {
    match (status, user_id, body) {
        (StatusCode::NOT_FOUND, Some(user_id), Some(body)) if !body.success => {
            ProfileError::NotFound(user_id.clone())
        }
        (StatusCode::NOT_FOUND, _, _) => route_missing(),
        (StatusCode::CONFLICT, Some(user_id), _) => ProfileError::DuplicateProfile(user_id.clone()),
        (StatusCode::UNPROCESSABLE_ENTITY, _, body) => {
            let body = body.unwrap_or_else(|| ErrorResponse::new(status.to_string()));
            let errors = body
                .errors
                .filter(|errors| !errors.is_empty())
                .unwrap_or_else(|| FieldErrors::single("body", body.message));
            ProfileError::Validation(errors)
        }
        (_, _, body) => {
            let message = body.map(|b| b.message).unwrap_or_default();
            tracing::warn!(%status, message = %message, "profile API request failed");
            ProfileError::Persistence(format!("{}: {}", status, message))
        }
    }
}

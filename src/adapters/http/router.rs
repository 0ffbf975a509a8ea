//! Top level API router.
//!
//! Mounts every endpoint under `/api` and wraps it in tracing, CORS, timeout
//! and (when configured) bearer token middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::FromRef, http::HeaderValue, middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::health::health;
use super::middleware::{auth_middleware, AuthState};
use super::profile::profile_routes;
use crate::application::ProfileService;
use crate::domain::foundation::Clock;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub profiles: ProfileService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(profiles: ProfileService, clock: Arc<dyn Clock>) -> Self {
        Self { profiles, clock }
    }
}

impl FromRef<AppState> for ProfileService {
    fn from_ref(state: &AppState) -> Self {
        state.profiles.clone()
    }
}

/// Cross-cutting router settings.
#[derive(Clone, Default)]
pub struct RouterOptions {
    /// Validates bearer tokens when present. `None` disables the check.
    pub session_validator: Option<AuthState>,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
    /// Per-request timeout. `None` disables it.
    pub request_timeout: Option<Duration>,
}

/// Builds the `/api` router.
///
/// - `GET /api/health`
/// - `POST /api/profiles`
/// - `GET /api/profiles/:user_id`
/// - `PUT /api/profiles/:user_id`
pub fn api_router(state: AppState, options: RouterOptions) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .nest("/profiles", profile_routes());

    let mut api = Router::new().nest("/api", api).with_state(state);

    if let Some(validator) = options.session_validator {
        api = api.layer(middleware::from_fn_with_state(validator, auth_middleware));
    }
    if let Some(timeout) = options.request_timeout {
        api = api.layer(TimeoutLayer::new(timeout));
    }

    api.layer(cors_layer(&options.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}

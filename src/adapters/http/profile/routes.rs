//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_profile, get_profile, update_profile};
use crate::adapters::http::AppState;

/// Profile routes, mounted at `/api/profiles`.
///
/// - `POST /` - create the caller's profile
/// - `GET /:user_id` - read a profile
/// - `PUT /:user_id` - change some fields of a profile
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/:user_id", get(get_profile).put(update_profile))
}

//! Profile HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, ProfileResponse};
pub use handlers::ProfileApiError;
pub use routes::profile_routes;

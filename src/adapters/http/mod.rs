//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure; the
//! `router` module assembles them under `/api`.

pub mod health;
pub mod middleware;
pub mod profile;
pub mod router;

pub use router::{api_router, AppState, RouterOptions};

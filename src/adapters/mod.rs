//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - session token validation (JWT, mock)
//! - `gateway` - client side access to the profile service (HTTP, local, mock)
//! - `http` - axum API exposing the profile service
//! - `memory` - in-process profile storage
//! - `postgres` - PostgreSQL profile storage

pub mod auth;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod postgres;

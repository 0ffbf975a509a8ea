//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileRepository` - server side profile storage
//! - `SessionValidator` - bearer token validation
//! - `ProfileGateway` - client side access to the profile service
//! - `AccessTokenSource` - token supplier for outbound client requests

mod access_token;
mod profile_gateway;
mod profile_repository;
mod session_validator;

pub use access_token::{AccessTokenSource, NoAccessToken};
pub use profile_gateway::ProfileGateway;
pub use profile_repository::ProfileRepository;
pub use session_validator::SessionValidator;

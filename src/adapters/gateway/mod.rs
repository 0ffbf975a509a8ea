//! Client side `ProfileGateway` adapters.
//!
//! - `HttpProfileGateway` - talks to the REST API with reqwest
//! - `LocalProfileGateway` - calls the service in process
//! - `MockProfileGateway` - in-process gateway with failure injection for tests

mod http;
mod local;
mod mock;

pub use self::http::HttpProfileGateway;
pub use local::LocalProfileGateway;
pub use mock::MockProfileGateway;

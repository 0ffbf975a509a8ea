//! Client side session state.
//!
//! Explicitly constructed containers a mobile client (or any embedder)
//! owns for the lifetime of one app instance:
//!
//! - `IdentityStore` - the signed-in user, fed by the external auth provider
//! - `ProfileCache` - the user's profile, read through a `ProfileGateway`
//! - `SessionGate` - picks the allowed app region from the two

mod identity;
mod profile_cache;
mod session_gate;

pub use identity::{Identity, IdentitySnapshot, IdentityStore};
pub use profile_cache::{CacheError, CacheSnapshot, CacheStatus, ProfileCache};
pub use session_gate::{evaluate, GateState, LoadFailurePolicy, Route, SessionGate};

//! Domain layer - pure business types and rules.
//!
//! - `foundation` - shared primitives (ids, time, errors, auth)
//! - `profile` - dating profile model, validation and derived age

pub mod foundation;
pub mod profile;

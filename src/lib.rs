//! Slurp - Dating profile onboarding core
//!
//! This crate implements the one-time dating profile lifecycle (validation,
//! persistence, derived age) behind an HTTP API, and the client-side session
//! gate that decides whether a signed-in user is routed to onboarding or to
//! the main application.

pub mod adapters;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;

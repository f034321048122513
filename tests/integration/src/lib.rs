//! Integration test utilities for DeafTube
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API with a real PostgreSQL database.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

//! # tube-api
//!
//! REST API server for DeafTube built with the Axum framework.
//!
//! Routes live under `/api`, uploaded files are served from `/uploads`, and
//! liveness/readiness probes sit at `/health` outside the rate limiter.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;

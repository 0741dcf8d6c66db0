// src/routes/health.rs
//! Liveness probe for the rooms backend.
//!
//! `GET /` answers with a fixed plain-text greeting so orchestrators and CI can
//! check that the process is serving HTTP. It follows the Explicit Module
//! Boundary Pattern (EMBP): the handler stays private and the gateway
//! (`mod.rs`) merges the exported subrouter.

use axum::{routing::get, Router};

/// Handle `GET /`.
///
/// Does not touch the database.
async fn root() -> &'static str {
    "Hello, world"
}

/// Create a subrouter containing the `/` route.
///
/// Generic over the application state so it merges cleanly with the gateway
/// router, whatever its state type (e.g., `PgPool`).
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}

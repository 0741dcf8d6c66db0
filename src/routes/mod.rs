use axum::Router;
use sqlx::PgPool;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

mod average;
mod health;
mod rooms;
mod temperatures;

// ---

/// Assemble every endpoint around the shared connection pool.
///
/// Each request gets an INFO-level `request` span (method, URI) and a response
/// event carrying status and latency.
pub fn router(pool: PgPool) -> Router {
    // ---
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(rooms::router())
        .merge(temperatures::router())
        .merge(average::router())
        .merge(health::router())
        .layer(trace)
        .with_state(pool)
}

//! Application entry point for the `roomtemps` backend service.
//!
//! This binary orchestrates the full startup sequence for the rooms and
//! temperature readings API, including:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Establishing a PostgreSQL connection pool
//! - Creating the database schema if it does not exist
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `DATABASE_URL` (**required**) – PostgreSQL connection string
//! - `DB_POOL_MAX` (optional) – maximum number of DB connections (default: 5)
//! - `LISTEN_PORT` (optional) – HTTP port (default: 8080)
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! This module follows the Explicit Module Boundary Pattern (EMBP) by
//! delegating schema setup to `schema`, pool and queries to `store`,
//! configuration parsing to `config`, and route registration to `routes`.
use std::{env, io::IsTerminal, net::SocketAddr};

use axum::Router;
use dotenvy::dotenv;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

mod config;
mod error;
mod models;
mod routes;
mod schema;
mod store;

pub use config::Config;

// These are not used here but they are imported to be used by routes/*.rs and
// store.rs, that way refactoring is easier since those files do not have
// knowledge of sibling modules, only of their parent module (main.rs)
pub use error::{ApiError, ValidationError};
pub use models::{
    AddTemperatureRequest, CreateRoomRequest, GlobalAverage, GlobalAverageRow, Message, NewRoom,
    RoomCreated, TemperatureReading,
};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    tracing::info!(
        "Attempting to connect to database: {}",
        cfg.masked_db_url()
    );

    let pool = store::connect(&cfg).await?;

    tracing::info!("Successfully connected to database");

    // Runs once here; handlers assume the tables exist
    schema::create_schema(&pool).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.listen_port));

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(pool);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Install the global tracing subscriber.
///
/// Besides the handlers' own events, the router's `TraceLayer` opens an INFO
/// `request` span per HTTP call; with the default `AXUM_SPAN_EVENTS` mode its
/// CLOSE event carries the request latency. `full` adds ENTER/EXIT (noisy under
/// load), `enter_exit` drops the timing line.
///
/// The filter comes from `RUST_LOG` when set, otherwise from [`default_filter`]
/// with `AXUM_LOG_LEVEL`. `FORCE_COLOR` (`1|true|yes` / `0|false|no`)
/// overrides TTY detection for ANSI output.
fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_filter(env::var("AXUM_LOG_LEVEL").ok().as_deref()))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}

/// Filter directives for a given `AXUM_LOG_LEVEL` (default `debug`).
///
/// Per-statement sqlx logs stay at `warn`. Request spans from `tower_http`
/// stay visible down to `info` even when the service itself logs less.
fn default_filter(level: Option<&str>) -> String {
    // ---
    let level = match level {
        Some(l @ ("trace" | "debug" | "info" | "warn" | "error")) => l,
        _ => "debug",
    };
    let http_level = match level {
        "warn" | "error" => "info",
        other => other,
    };
    format!("{level},sqlx::query=warn,tower_http={http_level}")
}

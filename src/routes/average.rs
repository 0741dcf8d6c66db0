use axum::{extract::State, routing::get, Json, Router};
use sqlx::PgPool;
use tracing::info;

use crate::{store, ApiError, GlobalAverage};

// ---

pub fn router() -> Router<PgPool> {
    // ---
    Router::new().route("/api/average", get(handler))
}

/// `GET /api/average`: mean temperature and distinct-day count over all readings.
///
/// An empty table yields `{"average": null, "days": 0}`.
async fn handler(State(pool): State<PgPool>) -> Result<Json<GlobalAverage>, ApiError> {
    // ---
    let mut tx = pool.begin().await?;
    let aggregate = store::global_average(&mut tx).await?;
    tx.commit().await?;

    info!(
        average = ?aggregate.average,
        days = aggregate.days,
        "GET /api/average"
    );
    Ok(Json(aggregate))
}

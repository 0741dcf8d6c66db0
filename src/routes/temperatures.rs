use axum::{
    extract::rejection::JsonRejection, extract::State, http::StatusCode,
    response::IntoResponse, routing::post, Json, Router,
};
use sqlx::PgPool;
use tracing::info;

use crate::{models, store, AddTemperatureRequest, ApiError, Message};

// ---

pub fn router() -> Router<PgPool> {
    // ---
    Router::new().route("/api/temperature", post(handler))
}

/// `POST /api/temperature`: record one reading for an existing room.
async fn handler(
    State(pool): State<PgPool>,
    payload: Result<Json<AddTemperatureRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // ---
    let Json(request) = payload?;
    let reading = request.validate(models::utc_now())?;

    // An unknown room aborts before commit, so the dropped transaction rolls back.
    let mut tx = pool.begin().await?;
    store::insert_reading(&mut tx, &reading)
        .await
        .map_err(|e| ApiError::from_reading_insert(e, reading.room_id))?;
    tx.commit().await?;

    info!(
        room_id = reading.room_id,
        temperature = reading.temperature,
        date = %reading.date,
        "POST /api/temperature - reading stored"
    );
    Ok((
        StatusCode::CREATED,
        Json(Message {
            message: "Temperature added.",
        }),
    ))
}

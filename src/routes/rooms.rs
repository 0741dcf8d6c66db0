use axum::{
    extract::rejection::JsonRejection, extract::State, http::StatusCode,
    response::IntoResponse, routing::post, Json, Router,
};
use sqlx::PgPool;
use tracing::info;

use crate::{store, ApiError, CreateRoomRequest, RoomCreated};

// ---

pub fn router() -> Router<PgPool> {
    // ---
    Router::new().route("/api/room", post(handler))
}

/// `POST /api/room`: insert a room and return its generated id.
async fn handler(
    State(pool): State<PgPool>,
    payload: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // ---
    let Json(request) = payload?;
    let room = request.validate()?;

    let mut tx = pool.begin().await?;
    let id = store::insert_room(&mut tx, &room).await?;
    tx.commit().await?;

    info!(id, name = %room.name, "POST /api/room - room created");
    Ok((StatusCode::CREATED, Json(RoomCreated::new(id, &room.name))))
}

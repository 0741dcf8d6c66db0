//! Persistence gateway: the connection pool and every SQL statement the API runs.
//!
//! Query functions take a `&mut PgConnection` so handlers can run them inside a
//! transaction (`&mut *tx`) and decide when to commit.

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool};

use crate::{Config, GlobalAverage, GlobalAverageRow, NewRoom, TemperatureReading};

// ---

/// Connect the pool, failing if the database is unreachable.
pub async fn connect(cfg: &Config) -> Result<PgPool> {
    // ---
    PgPoolOptions::new()
        .max_connections(cfg.db_pool_max)
        .connect(&cfg.db_url)
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to connect to database '{}': {}",
                cfg.masked_db_url(),
                e
            )
        })
}

/// Insert a room and return its generated id.
pub async fn insert_room(conn: &mut PgConnection, room: &NewRoom) -> Result<i32, sqlx::Error> {
    // ---
    let (id,): (i32,) = sqlx::query_as("INSERT INTO rooms (name) VALUES ($1) RETURNING id")
        .bind(&room.name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

/// Insert one reading. Fails with a foreign-key violation if the room is unknown.
pub async fn insert_reading(
    conn: &mut PgConnection,
    reading: &TemperatureReading,
) -> Result<(), sqlx::Error> {
    // ---
    sqlx::query("INSERT INTO temperatures (room_id, temperature, date) VALUES ($1, $2, $3)")
        .bind(reading.room_id)
        .bind(reading.temperature)
        .bind(reading.date)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Mean temperature and number of distinct calendar days over all readings.
pub async fn global_average(conn: &mut PgConnection) -> Result<GlobalAverage, sqlx::Error> {
    // ---
    let row: GlobalAverageRow = sqlx::query_as(
        r#"
        SELECT
            AVG(temperature)::DOUBLE PRECISION AS average,
            COUNT(DISTINCT DATE(date))         AS days
        FROM temperatures
        "#,
    )
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(average = ?row.average, days = row.days, "global aggregate computed");

    Ok(row.into())
}

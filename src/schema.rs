//! Database schema management for `roomtemps`.
//!
//! Ensures the `rooms` and `temperatures` tables exist before serving requests.
//! Applied once on startup from `main.rs` (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create the database schema (idempotent).
///
/// Creates `rooms` and the `temperatures` table that references it. Deleting a
/// room cascades to its readings. Safe to call on every startup; no-op if the
/// tables already exist.
///
/// Errors are propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id   SERIAL PRIMARY KEY,
            name TEXT
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Must come after `rooms` for the foreign key
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS temperatures (
            room_id     INTEGER,
            temperature REAL,
            date        TIMESTAMP,
            FOREIGN KEY (room_id) REFERENCES rooms (id) ON DELETE CASCADE
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Schema ready (rooms, temperatures)");
    Ok(())
}

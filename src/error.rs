//! Request-path error types and their HTTP mapping.
//!
//! Handlers return `Result<_, ApiError>`; the [`IntoResponse`] impl below turns
//! every failure into a status code plus a `{"error": "..."}` body. Startup code
//! keeps using `anyhow` and never produces these.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

// ---

/// Input rejected before any database work happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    // ---
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`, expected MM-DD-YYYY HH:MM:SS")]
    InvalidDate(String),

    #[error("temperature {0} is outside the storable range")]
    TemperatureOutOfRange(f64),
}

/// Errors surfaced by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // ---
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body was not JSON, had the wrong content type, or a field had the wrong type.
    #[error(transparent)]
    Payload(#[from] JsonRejection),

    #[error("room {0} does not exist")]
    UnknownRoom(i32),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    /// Classify a failed reading insert: a foreign-key violation means the room is unknown.
    pub fn from_reading_insert(err: sqlx::Error, room_id: i32) -> Self {
        // ---
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::UnknownRoom(room_id)
            }
            _ => Self::Database(err),
        }
    }

    fn status(&self) -> StatusCode {
        // ---
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Payload(rejection) => rejection.status(),
            Self::UnknownRoom(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        let message = match &self {
            Self::Payload(rejection) => rejection.body_text(),
            Self::Database(err) => {
                tracing::error!(error = %err, "database error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        if status.is_client_error() {
            tracing::debug!(%status, "{}", message);
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

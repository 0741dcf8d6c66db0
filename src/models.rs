//! Data models for rooms and temperature readings.
//!
//! Request bodies arrive with every field optional so that a missing field is
//! reported as a [`ValidationError`] instead of an extractor rejection. The
//! `validate` methods turn them into the typed values the store accepts.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

// ---

/// Accepted format for an explicit reading date, e.g. `06-15-2023 10:00:00`.
pub const READING_DATE_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

/// Body of `POST /api/room`.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
}

/// Body of `POST /api/temperature`.
#[derive(Debug, Deserialize)]
pub struct AddTemperatureRequest {
    pub room: Option<i32>,
    /// Parsed wide so values outside the `REAL` range are caught in `validate`.
    pub temperature: Option<f64>,
    pub date: Option<String>,
}

/// A room ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub name: String,
}

/// One temperature observation tied to a room.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub room_id: i32,
    pub temperature: f32,
    pub date: NaiveDateTime,
}

impl CreateRoomRequest {
    pub fn validate(self) -> Result<NewRoom, ValidationError> {
        // ---
        let name = self.name.ok_or(ValidationError::MissingField("name"))?;
        Ok(NewRoom { name })
    }
}

impl AddTemperatureRequest {
    /// Validate the body, stamping the reading with `now` when no date is given.
    ///
    /// A date that is present but malformed is rejected; it never falls back to `now`.
    pub fn validate(self, now: NaiveDateTime) -> Result<TemperatureReading, ValidationError> {
        // ---
        let room_id = self.room.ok_or(ValidationError::MissingField("room"))?;
        let temperature = self
            .temperature
            .ok_or(ValidationError::MissingField("temperature"))?;
        let temperature = to_real(temperature)?;
        let date = match self.date {
            Some(raw) => parse_reading_date(&raw)?,
            None => now,
        };

        Ok(TemperatureReading {
            room_id,
            temperature,
            date,
        })
    }
}

/// Narrow to the `REAL` column type, rejecting values that would become infinite.
fn to_real(value: f64) -> Result<f32, ValidationError> {
    // ---
    let real = value as f32;
    if real.is_finite() {
        Ok(real)
    } else {
        Err(ValidationError::TemperatureOutOfRange(value))
    }
}

/// Parse a date in [`READING_DATE_FORMAT`].
pub fn parse_reading_date(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    // ---
    NaiveDateTime::parse_from_str(raw, READING_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Current UTC wall-clock time, as stored in the `TIMESTAMP` column.
pub fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Response of `POST /api/room`.
#[derive(Debug, Serialize)]
pub struct RoomCreated {
    pub id: i32,
    pub message: String,
}

impl RoomCreated {
    pub fn new(id: i32, name: &str) -> Self {
        // ---
        Self {
            id,
            message: format!("Room {name} created."),
        }
    }
}

/// Plain `{"message": ...}` response.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Raw aggregate row as returned by Postgres.
#[derive(Debug, sqlx::FromRow)]
pub struct GlobalAverageRow {
    // ---
    /// `AVG(temperature)`; NULL when there are no readings.
    pub average: Option<f64>,
    /// `COUNT(DISTINCT DATE(date))`.
    pub days: i64,
}

/// Response of `GET /api/average`.
#[derive(Debug, Serialize, PartialEq)]
pub struct GlobalAverage {
    pub average: Option<f64>,
    pub days: i64,
}

impl From<GlobalAverageRow> for GlobalAverage {
    fn from(row: GlobalAverageRow) -> Self {
        // ---
        Self {
            average: row.average.map(round_to_hundredths),
            days: row.days,
        }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn fixed_now() -> NaiveDateTime {
        // ---
        NaiveDate::from_ymd_opt(2025, 3, 26)
            .unwrap()
            .and_hms_opt(18, 45, 0)
            .unwrap()
    }

    fn temperature_request(date: Option<&str>) -> AddTemperatureRequest {
        // ---
        AddTemperatureRequest {
            room: Some(1),
            temperature: Some(21.5),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_room_requires_name() {
        // ---
        let err = CreateRoomRequest { name: None }.validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name"));

        let room = CreateRoomRequest {
            name: Some("Kitchen".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(room.name, "Kitchen");
    }

    #[test]
    fn test_room_created_message() {
        // ---
        let created = RoomCreated::new(3, "Kitchen");
        assert_eq!(created.id, 3);
        assert_eq!(created.message, "Room Kitchen created.");
    }

    #[test]
    fn test_explicit_date_is_kept() {
        // ---
        let reading = temperature_request(Some("06-15-2023 10:00:00"))
            .validate(fixed_now())
            .unwrap();

        let expected = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(reading.date, expected);
        assert_eq!(reading.room_id, 1);
        assert_eq!(reading.temperature, 21.5);
    }

    #[test]
    fn test_missing_date_defaults_to_now() {
        // ---
        let reading = temperature_request(None).validate(fixed_now()).unwrap();
        assert_eq!(reading.date, fixed_now());
    }

    #[test]
    fn test_utc_now_is_current() {
        // ---
        let reading = temperature_request(None).validate(utc_now()).unwrap();
        let drift = utc_now() - reading.date;
        assert!(drift >= Duration::zero() && drift < Duration::seconds(5));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        // ---
        for raw in ["2023-06-15 10:00:00", "06-15-2023", "13-01-2023 10:00:00", ""] {
            let err = temperature_request(Some(raw))
                .validate(fixed_now())
                .unwrap_err();
            assert_eq!(err, ValidationError::InvalidDate(raw.to_string()));
        }
    }

    #[test]
    fn test_missing_room_or_temperature() {
        // ---
        let no_room = AddTemperatureRequest {
            room: None,
            ..temperature_request(None)
        };
        assert_eq!(
            no_room.validate(fixed_now()).unwrap_err(),
            ValidationError::MissingField("room")
        );

        let no_temp = AddTemperatureRequest {
            temperature: None,
            ..temperature_request(None)
        };
        assert_eq!(
            no_temp.validate(fixed_now()).unwrap_err(),
            ValidationError::MissingField("temperature")
        );
    }

    #[test]
    fn test_temperature_beyond_real_range_is_rejected() {
        // ---
        let req: AddTemperatureRequest =
            serde_json::from_str(r#"{"room": 1, "temperature": 1e300}"#).unwrap();
        assert_eq!(
            req.validate(fixed_now()).unwrap_err(),
            ValidationError::TemperatureOutOfRange(1e300)
        );

        for value in [1e39, -1e39, f64::from(f32::MAX) * 2.0] {
            let req = AddTemperatureRequest {
                temperature: Some(value),
                ..temperature_request(None)
            };
            assert_eq!(
                req.validate(fixed_now()).unwrap_err(),
                ValidationError::TemperatureOutOfRange(value)
            );
        }

        // Largest REAL still fits
        let req = AddTemperatureRequest {
            temperature: Some(f64::from(f32::MAX)),
            ..temperature_request(None)
        };
        assert_eq!(req.validate(fixed_now()).unwrap().temperature, f32::MAX);
    }

    #[test]
    fn test_request_bodies_deserialize() {
        // ---
        let req: AddTemperatureRequest =
            serde_json::from_str(r#"{"room": 2, "temperature": 19}"#).unwrap();
        assert_eq!(req.room, Some(2));
        assert_eq!(req.temperature, Some(19.0));
        assert!(req.date.is_none());

        // null counts as absent
        let req: CreateRoomRequest = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(req.name.is_none());
    }

    #[test]
    fn test_average_is_rounded() {
        // ---
        let avg = GlobalAverage::from(GlobalAverageRow {
            average: Some(21.456_789),
            days: 3,
        });
        assert_eq!(avg.average, Some(21.46));
        assert_eq!(avg.days, 3);

        let avg = GlobalAverage::from(GlobalAverageRow {
            average: Some(15.0),
            days: 1,
        });
        assert_eq!(avg.average, Some(15.0));
    }

    #[test]
    fn test_empty_average_is_null() {
        // ---
        let avg = GlobalAverage::from(GlobalAverageRow {
            average: None,
            days: 0,
        });
        assert_eq!(
            serde_json::to_value(&avg).unwrap(),
            serde_json::json!({"average": null, "days": 0})
        );
    }
}

//! Serde mirrors of the dataset CSV rows.
//!
//! Counts and positions are read as `i64` so that negative values reach
//! the loader and fail validation there, instead of disappearing into a
//! deserialization error.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::de::{deserialize_datetime, deserialize_optional_datetime};

#[derive(Debug, Deserialize)]
pub(super) struct RawLine {
    pub line_name: String,
    pub vehicle_type: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawStop {
    pub stop_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawLineStop {
    pub line_name: String,
    pub stop_name: String,
    pub sequence: i64,
    pub time_offset: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawTrip {
    pub trip_id: String,
    pub line_name: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub scheduled_departure: NaiveDateTime,
    pub vehicle_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawStopEvent {
    pub trip_id: String,
    pub stop_name: String,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub scheduled: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_optional_datetime")]
    pub actual: Option<NaiveDateTime>,
    pub passengers_on: i64,
    pub passengers_off: i64,
}

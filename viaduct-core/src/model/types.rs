//! Entity and identifier types for the transit schema.
//!
//! Every entity except [`Trip`] is keyed by a surrogate id allocated by the
//! store; trips carry the externally formatted identifier from the source
//! dataset (e.g. `"T0001"`) as their primary key.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Error;

macro_rules! surrogate_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub(crate) u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

surrogate_id!(LineId);
surrogate_id!(StopId);
surrogate_id!(LineStopId);
surrogate_id!(StopEventId);

/// Externally formatted trip identifier, e.g. `"T0001"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TripId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of vehicle serving a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Rail,
    Bus,
    Tram,
    Ferry,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rail => "rail",
            Self::Bus => "bus",
            Self::Tram => "tram",
            Self::Ferry => "ferry",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "rail" => Ok(Self::Rail),
            "bus" => Ok(Self::Bus),
            "tram" => Ok(Self::Tram),
            "ferry" => Ok(Self::Ferry),
            other => Err(Error::validation(format!(
                "unknown vehicle_type '{other}' (expected rail, bus, tram or ferry)"
            ))),
        }
    }
}

/// A transit route/service.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub vehicle_type: VehicleType,
}

/// A physical stop location.
///
/// Geometry follows the `geo` convention: x is longitude, y is latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub geometry: Point<f64>,
}

impl Stop {
    pub fn latitude(&self) -> f64 {
        self.geometry.y()
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.x()
    }
}

/// Ordered membership of a stop on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStop {
    pub id: LineStopId,
    pub line_id: LineId,
    pub stop_id: StopId,
    /// Position of the stop on the line, starting at 1.
    pub sequence_number: u32,
    /// Scheduled minutes from the line's departure to this stop.
    pub time_offset_minutes: u32,
}

/// A scheduled vehicle run on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub id: TripId,
    pub line_id: LineId,
    pub departure_time: NaiveDateTime,
    pub vehicle_id: String,
}

/// A trip's recorded arrival at a stop, with ridership counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopEvent {
    pub id: StopEventId,
    pub trip_id: TripId,
    pub stop_id: StopId,
    pub scheduled_time: NaiveDateTime,
    /// `None` until the vehicle has actually arrived.
    pub actual_time: Option<NaiveDateTime>,
    pub passengers_on: u32,
    pub passengers_off: u32,
}

impl StopEvent {
    /// Difference between actual and scheduled arrival, if recorded.
    /// Negative when the vehicle ran early.
    pub fn delay(&self) -> Option<TimeDelta> {
        self.actual_time.map(|actual| actual - self.scheduled_time)
    }

    /// Boardings plus alightings.
    pub fn total_activity(&self) -> u64 {
        u64::from(self.passengers_on) + u64::from(self.passengers_off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_type_round_trips_through_str() {
        for raw in ["rail", "bus", "tram", "ferry"] {
            let parsed: VehicleType = raw.parse().unwrap();
            assert_eq!(parsed.as_str(), raw);
        }
    }

    #[test]
    fn vehicle_type_rejects_unknown_kind() {
        let err = "zeppelin".parse::<VehicleType>().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn stop_event_delay_is_signed() {
        let scheduled = NaiveDateTime::parse_from_str("2024-03-01 08:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let event = StopEvent {
            id: StopEventId(0),
            trip_id: TripId::new("T0001"),
            stop_id: StopId(0),
            scheduled_time: scheduled,
            actual_time: Some(scheduled - TimeDelta::minutes(1)),
            passengers_on: 2,
            passengers_off: 1,
        };
        assert_eq!(event.delay(), Some(TimeDelta::minutes(-1)));
        assert_eq!(event.total_activity(), 3);
    }

    #[test]
    fn stop_event_without_actual_time_has_no_delay() {
        let scheduled = NaiveDateTime::parse_from_str("2024-03-01 08:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let event = StopEvent {
            id: StopEventId(0),
            trip_id: TripId::new("T0001"),
            stop_id: StopId(0),
            scheduled_time: scheduled,
            actual_time: None,
            passengers_on: 0,
            passengers_off: 0,
        };
        assert_eq!(event.delay(), None);
    }
}

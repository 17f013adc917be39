//! Data model for the transit schema
//!
//! Contains the five entities and their identifier types.

pub mod types;

pub use types::{
    Line, LineId, LineStop, LineStopId, Stop, StopEvent, StopEventId, StopId, Trip, TripId,
    VehicleType,
};

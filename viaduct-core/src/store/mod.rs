//! In-memory transit store with write-time constraint enforcement.
//!
//! Every write validates the full set of schema invariants before touching
//! any map or index, so a rejected write leaves no partial state behind.
//! Reads take `&self` and never mutate.

mod cascade;

use chrono::NaiveDateTime;
use geo::Point;
use hashbrown::{HashMap, HashSet};

use crate::Error;
use crate::model::{
    Line, LineId, LineStop, LineStopId, Stop, StopEvent, StopEventId, StopId, Trip, TripId,
    VehicleType,
};

/// The embedded schema-and-integrity engine.
///
/// Entity maps hold the rows; the auxiliary maps and sets are uniqueness
/// indexes kept in lockstep with the rows by every write and delete.
#[derive(Debug, Clone, Default)]
pub struct TransitStore {
    lines: HashMap<LineId, Line>,
    stops: HashMap<StopId, Stop>,
    line_stops: HashMap<LineStopId, LineStop>,
    trips: HashMap<TripId, Trip>,
    stop_events: HashMap<StopEventId, StopEvent>,

    line_names: HashMap<String, LineId>,
    stop_names: HashMap<String, StopId>,
    line_stop_pairs: HashSet<(LineId, StopId)>,
    line_sequences: HashSet<(LineId, u32)>,
    trip_schedules: HashSet<(LineId, NaiveDateTime, String)>,
    trip_stop_pairs: HashSet<(TripId, StopId)>,

    next_line: u32,
    next_stop: u32,
    next_line_stop: u32,
    next_stop_event: u32,
}

impl TransitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line with a unique name.
    ///
    /// # Errors
    ///
    /// `Validation` if a line with the same name already exists.
    pub fn add_line(&mut self, name: &str, vehicle_type: VehicleType) -> Result<LineId, Error> {
        if self.line_names.contains_key(name) {
            return Err(Error::validation(format!(
                "line name '{name}' already exists"
            )));
        }

        let id = LineId(self.next_line);
        self.next_line += 1;
        self.lines.insert(
            id,
            Line {
                id,
                name: name.to_owned(),
                vehicle_type,
            },
        );
        self.line_names.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Create a stop with a unique name and in-bounds coordinates.
    ///
    /// # Errors
    ///
    /// `Validation` if the name is taken, latitude is outside [-90, 90]
    /// or longitude is outside [-180, 180].
    pub fn add_stop(&mut self, name: &str, latitude: f64, longitude: f64) -> Result<StopId, Error> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::validation(format!(
                "latitude {latitude} outside [-90, 90] for stop '{name}'"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::validation(format!(
                "longitude {longitude} outside [-180, 180] for stop '{name}'"
            )));
        }
        if self.stop_names.contains_key(name) {
            return Err(Error::validation(format!(
                "stop name '{name}' already exists"
            )));
        }

        let id = StopId(self.next_stop);
        self.next_stop += 1;
        self.stops.insert(
            id,
            Stop {
                id,
                name: name.to_owned(),
                geometry: Point::new(longitude, latitude),
            },
        );
        self.stop_names.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Place a stop at a position on a line.
    ///
    /// # Errors
    ///
    /// `Reference` if the line or stop does not exist; `Validation` if the
    /// sequence number is zero, the stop is already on the line, or the
    /// position on the line is already taken.
    pub fn add_line_stop(
        &mut self,
        line_id: LineId,
        stop_id: StopId,
        sequence_number: u32,
        time_offset_minutes: u32,
    ) -> Result<LineStopId, Error> {
        if !self.lines.contains_key(&line_id) {
            return Err(Error::reference(format!("line {line_id} does not exist")));
        }
        if !self.stops.contains_key(&stop_id) {
            return Err(Error::reference(format!("stop {stop_id} does not exist")));
        }
        if sequence_number == 0 {
            return Err(Error::validation(
                "sequence_number must be positive".to_string(),
            ));
        }
        if self.line_stop_pairs.contains(&(line_id, stop_id)) {
            return Err(Error::validation(format!(
                "stop {stop_id} is already on line {line_id}"
            )));
        }
        if self.line_sequences.contains(&(line_id, sequence_number)) {
            return Err(Error::validation(format!(
                "position {sequence_number} on line {line_id} is already taken"
            )));
        }

        let id = LineStopId(self.next_line_stop);
        self.next_line_stop += 1;
        self.line_stops.insert(
            id,
            LineStop {
                id,
                line_id,
                stop_id,
                sequence_number,
                time_offset_minutes,
            },
        );
        self.line_stop_pairs.insert((line_id, stop_id));
        self.line_sequences.insert((line_id, sequence_number));
        Ok(id)
    }

    /// Schedule a vehicle run on a line.
    ///
    /// # Errors
    ///
    /// `Reference` if the line does not exist; `Validation` on a duplicate
    /// trip id or a duplicate (line, departure, vehicle) run.
    pub fn add_trip(
        &mut self,
        id: TripId,
        line_id: LineId,
        departure_time: NaiveDateTime,
        vehicle_id: &str,
    ) -> Result<(), Error> {
        if !self.lines.contains_key(&line_id) {
            return Err(Error::reference(format!("line {line_id} does not exist")));
        }
        if self.trips.contains_key(&id) {
            return Err(Error::validation(format!("trip '{id}' already exists")));
        }
        let schedule = (line_id, departure_time, vehicle_id.to_owned());
        if self.trip_schedules.contains(&schedule) {
            return Err(Error::validation(format!(
                "vehicle '{vehicle_id}' is already scheduled on line {line_id} at {departure_time}"
            )));
        }

        self.trips.insert(
            id.clone(),
            Trip {
                id,
                line_id,
                departure_time,
                vehicle_id: vehicle_id.to_owned(),
            },
        );
        self.trip_schedules.insert(schedule);
        Ok(())
    }

    /// Record a trip's arrival at a stop.
    ///
    /// # Errors
    ///
    /// `Reference` if the trip or stop does not exist; `Validation` if the
    /// trip already has an event at the stop.
    pub fn add_stop_event(
        &mut self,
        trip_id: &TripId,
        stop_id: StopId,
        scheduled_time: NaiveDateTime,
        actual_time: Option<NaiveDateTime>,
        passengers_on: u32,
        passengers_off: u32,
    ) -> Result<StopEventId, Error> {
        if !self.trips.contains_key(trip_id) {
            return Err(Error::reference(format!("trip '{trip_id}' does not exist")));
        }
        if !self.stops.contains_key(&stop_id) {
            return Err(Error::reference(format!("stop {stop_id} does not exist")));
        }
        if self.trip_stop_pairs.contains(&(trip_id.clone(), stop_id)) {
            return Err(Error::validation(format!(
                "trip '{trip_id}' already has an event at stop {stop_id}"
            )));
        }

        let id = StopEventId(self.next_stop_event);
        self.next_stop_event += 1;
        self.stop_events.insert(
            id,
            StopEvent {
                id,
                trip_id: trip_id.clone(),
                stop_id,
                scheduled_time,
                actual_time,
                passengers_on,
                passengers_off,
            },
        );
        self.trip_stop_pairs.insert((trip_id.clone(), stop_id));
        Ok(id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    pub fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.get(id)
    }

    pub fn line_by_name(&self, name: &str) -> Option<&Line> {
        self.line_names.get(name).and_then(|id| self.lines.get(id))
    }

    pub fn stop_by_name(&self, name: &str) -> Option<&Stop> {
        self.stop_names.get(name).and_then(|id| self.stops.get(id))
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    pub fn line_stops(&self) -> impl Iterator<Item = &LineStop> {
        self.line_stops.values()
    }

    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.trips.values()
    }

    pub fn stop_events(&self) -> impl Iterator<Item = &StopEvent> {
        self.stop_events.values()
    }

    /// Memberships of a line ordered by sequence number.
    pub fn line_stops_for(&self, line_id: LineId) -> Vec<&LineStop> {
        let mut members: Vec<&LineStop> = self
            .line_stops
            .values()
            .filter(|ls| ls.line_id == line_id)
            .collect();
        members.sort_by_key(|ls| ls.sequence_number);
        members
    }

    pub fn has_line_stop(&self, line_id: LineId, stop_id: StopId) -> bool {
        self.line_stop_pairs.contains(&(line_id, stop_id))
    }

    pub fn has_scheduled_run(
        &self,
        line_id: LineId,
        departure_time: NaiveDateTime,
        vehicle_id: &str,
    ) -> bool {
        self.trip_schedules
            .contains(&(line_id, departure_time, vehicle_id.to_owned()))
    }

    pub fn has_stop_event(&self, trip_id: &TripId, stop_id: StopId) -> bool {
        self.trip_stop_pairs.contains(&(trip_id.clone(), stop_id))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn line_stop_count(&self) -> usize {
        self.line_stops.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn stop_event_count(&self) -> usize {
        self.stop_events.len()
    }
}

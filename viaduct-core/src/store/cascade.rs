//! Cascading deletes over the ownership graph.
//!
//! Each delete is an explicit traversal: collect the ids of every dependent
//! row first, then remove leaf-to-root (stop events, then trips and
//! memberships, then the root entity). Uniqueness indexes are released
//! together with their rows, so a delete can never be observed half-done.

use hashbrown::HashSet;
use log::debug;

use super::TransitStore;
use crate::Error;
use crate::model::{LineId, LineStopId, StopEventId, StopId, TripId};

impl TransitStore {
    /// Delete a line together with its memberships, trips and their events.
    ///
    /// # Errors
    ///
    /// `NotFound` if the line does not exist.
    pub fn remove_line(&mut self, id: LineId) -> Result<(), Error> {
        if !self.lines.contains_key(&id) {
            return Err(Error::not_found(format!("line {id}")));
        }

        let member_ids: Vec<LineStopId> = self
            .line_stops
            .values()
            .filter(|ls| ls.line_id == id)
            .map(|ls| ls.id)
            .collect();
        let trip_ids: Vec<TripId> = self
            .trips
            .values()
            .filter(|trip| trip.line_id == id)
            .map(|trip| trip.id.clone())
            .collect();
        let trip_set: HashSet<&TripId> = trip_ids.iter().collect();
        let event_ids: Vec<StopEventId> = self
            .stop_events
            .values()
            .filter(|event| trip_set.contains(&event.trip_id))
            .map(|event| event.id)
            .collect();

        for event_id in &event_ids {
            self.detach_stop_event(*event_id);
        }
        for trip_id in &trip_ids {
            self.detach_trip(trip_id);
        }
        for member_id in &member_ids {
            self.detach_line_stop(*member_id);
        }
        if let Some(line) = self.lines.remove(&id) {
            self.line_names.remove(&line.name);
        }

        debug!(
            "removed line {id} with {} memberships, {} trips and {} stop events",
            member_ids.len(),
            trip_ids.len(),
            event_ids.len()
        );
        Ok(())
    }

    /// Delete a stop together with its line memberships and stop events.
    ///
    /// # Errors
    ///
    /// `NotFound` if the stop does not exist.
    pub fn remove_stop(&mut self, id: StopId) -> Result<(), Error> {
        if !self.stops.contains_key(&id) {
            return Err(Error::not_found(format!("stop {id}")));
        }

        let member_ids: Vec<LineStopId> = self
            .line_stops
            .values()
            .filter(|ls| ls.stop_id == id)
            .map(|ls| ls.id)
            .collect();
        let event_ids: Vec<StopEventId> = self
            .stop_events
            .values()
            .filter(|event| event.stop_id == id)
            .map(|event| event.id)
            .collect();

        for event_id in &event_ids {
            self.detach_stop_event(*event_id);
        }
        for member_id in &member_ids {
            self.detach_line_stop(*member_id);
        }
        if let Some(stop) = self.stops.remove(&id) {
            self.stop_names.remove(&stop.name);
        }

        debug!(
            "removed stop {id} with {} memberships and {} stop events",
            member_ids.len(),
            event_ids.len()
        );
        Ok(())
    }

    /// Delete a trip together with its stop events.
    ///
    /// # Errors
    ///
    /// `NotFound` if the trip does not exist.
    pub fn remove_trip(&mut self, id: &TripId) -> Result<(), Error> {
        if !self.trips.contains_key(id) {
            return Err(Error::not_found(format!("trip '{id}'")));
        }

        let event_ids: Vec<StopEventId> = self
            .stop_events
            .values()
            .filter(|event| event.trip_id == *id)
            .map(|event| event.id)
            .collect();

        for event_id in &event_ids {
            self.detach_stop_event(*event_id);
        }
        self.detach_trip(id);

        debug!("removed trip '{id}' with {} stop events", event_ids.len());
        Ok(())
    }

    fn detach_stop_event(&mut self, id: StopEventId) {
        if let Some(event) = self.stop_events.remove(&id) {
            self.trip_stop_pairs
                .remove(&(event.trip_id, event.stop_id));
        }
    }

    fn detach_trip(&mut self, id: &TripId) {
        if let Some(trip) = self.trips.remove(id) {
            self.trip_schedules
                .remove(&(trip.line_id, trip.departure_time, trip.vehicle_id));
        }
    }

    fn detach_line_stop(&mut self, id: LineStopId) {
        if let Some(member) = self.line_stops.remove(&id) {
            self.line_stop_pairs
                .remove(&(member.line_id, member.stop_id));
            self.line_sequences
                .remove(&(member.line_id, member.sequence_number));
        }
    }
}

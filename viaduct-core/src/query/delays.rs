//! Delay analysis over stop events with a recorded actual time.

use chrono::TimeDelta;
use hashbrown::HashMap;
use serde_json::json;

use super::params::QueryParams;
use super::report::{QueryId, QueryReport};
use crate::Error;
use crate::model::{LineId, StopEvent, TripId};
use crate::store::TransitStore;

fn is_delayed(event: &StopEvent, threshold: TimeDelta) -> bool {
    event.delay().is_some_and(|delay| delay > threshold)
}

/// Q8: delayed stop events counted per line, worst line first.
pub(super) fn delays_by_line(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    let threshold = TimeDelta::minutes(params.delay_threshold_minutes);

    let mut per_line: HashMap<LineId, u64> = HashMap::new();
    for event in store.stop_events().filter(|e| is_delayed(e, threshold)) {
        if let Some(trip) = store.trip(&event.trip_id) {
            *per_line.entry(trip.line_id).or_default() += 1;
        }
    }

    let mut rows: Vec<(String, u64)> = per_line
        .into_iter()
        .filter_map(|(line_id, count)| {
            store.line(line_id).map(|line| (line.name.clone(), count))
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let results = rows
        .into_iter()
        .map(|(line_name, count)| json!({ "line_name": line_name, "delay_count": count }))
        .collect();
    Ok(QueryReport::new(
        QueryId::Q8,
        vec!["line_name", "delay_count"],
        results,
    ))
}

/// Q9: trips delayed at `min_delayed_stops` or more of their stops.
pub(super) fn delayed_trips(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    let threshold = TimeDelta::minutes(params.delay_threshold_minutes);

    let mut per_trip: HashMap<&TripId, usize> = HashMap::new();
    for event in store.stop_events().filter(|e| is_delayed(e, threshold)) {
        *per_trip.entry(&event.trip_id).or_default() += 1;
    }

    let mut rows: Vec<(&TripId, usize)> = per_trip
        .into_iter()
        .filter(|(_, count)| *count >= params.min_delayed_stops)
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let results = rows
        .into_iter()
        .map(|(trip_id, count)| json!({ "trip_id": trip_id, "delayed_stop_count": count }))
        .collect();
    Ok(QueryReport::new(
        QueryId::Q9,
        vec!["trip_id", "delayed_stop_count"],
        results,
    ))
}

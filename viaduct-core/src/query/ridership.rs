//! Ridership aggregation over stop events.

use std::cmp::Ordering;

use hashbrown::HashMap;
use serde_json::json;

use super::params::QueryParams;
use super::report::{QueryId, QueryReport};
use crate::Error;
use crate::model::{LineId, StopId};
use crate::store::TransitStore;

/// Q6: average boardings per stop event, grouped by line, descending.
pub(super) fn average_boardings_by_line(store: &TransitStore) -> Result<QueryReport, Error> {
    let mut per_line: HashMap<LineId, (u64, u64)> = HashMap::new();
    for event in store.stop_events() {
        if let Some(trip) = store.trip(&event.trip_id) {
            let entry = per_line.entry(trip.line_id).or_insert((0, 0));
            entry.0 += u64::from(event.passengers_on);
            entry.1 += 1;
        }
    }

    let mut rows: Vec<(String, f64)> = per_line
        .into_iter()
        .filter_map(|(line_id, (total, events))| {
            store
                .line(line_id)
                .map(|line| (line.name.clone(), total as f64 / events as f64))
        })
        .collect();
    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let results = rows
        .into_iter()
        .map(|(line_name, avg)| json!({ "line_name": line_name, "avg_passengers": avg }))
        .collect();
    Ok(QueryReport::new(
        QueryId::Q6,
        vec!["line_name", "avg_passengers"],
        results,
    ))
}

/// Q7: top stops by boardings plus alightings.
pub(super) fn busiest_stops(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    let mut activity: HashMap<StopId, u64> = HashMap::new();
    for event in store.stop_events() {
        *activity.entry(event.stop_id).or_default() += event.total_activity();
    }

    let mut rows: Vec<(String, u64)> = activity
        .into_iter()
        .filter_map(|(stop_id, total)| {
            store.stop(stop_id).map(|stop| (stop.name.clone(), total))
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(params.busiest_limit);

    let results = rows
        .into_iter()
        .map(|(stop_name, total)| json!({ "stop_name": stop_name, "total_activity": total }))
        .collect();
    Ok(QueryReport::new(
        QueryId::Q7,
        vec!["stop_name", "total_activity"],
        results,
    ))
}

/// Q10: stops whose total boardings exceed the average per-stop total.
///
/// Only stops with at least one event take part, on both sides of the
/// comparison.
pub(super) fn above_average_stops(store: &TransitStore) -> Result<QueryReport, Error> {
    let mut boardings: HashMap<StopId, u64> = HashMap::new();
    for event in store.stop_events() {
        *boardings.entry(event.stop_id).or_default() += u64::from(event.passengers_on);
    }
    if boardings.is_empty() {
        return Ok(QueryReport::new(
            QueryId::Q10,
            vec!["stop_name", "total_boardings"],
            Vec::new(),
        ));
    }

    let average = boardings.values().sum::<u64>() as f64 / boardings.len() as f64;
    let mut rows: Vec<(String, u64)> = boardings
        .into_iter()
        .filter(|(_, total)| *total as f64 > average)
        .filter_map(|(stop_id, total)| {
            store.stop(stop_id).map(|stop| (stop.name.clone(), total))
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let results = rows
        .into_iter()
        .map(|(stop_name, total)| json!({ "stop_name": stop_name, "total_boardings": total }))
        .collect();
    Ok(QueryReport::new(
        QueryId::Q10,
        vec!["stop_name", "total_boardings"],
        results,
    ))
}

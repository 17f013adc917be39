//! Schedule queries over trips.

use serde_json::json;

use super::params::QueryParams;
use super::report::{QueryId, QueryReport};
use crate::Error;
use crate::loading::DATETIME_FORMAT;
use crate::store::TransitStore;

/// Q2: trips whose departure time-of-day falls inside the window,
/// ordered by departure.
pub(super) fn trips_in_window(
    store: &TransitStore,
    params: &QueryParams,
) -> Result<QueryReport, Error> {
    let mut departures: Vec<_> = store
        .trips()
        .filter(|trip| {
            let time_of_day = trip.departure_time.time();
            time_of_day >= params.window_start && time_of_day <= params.window_end
        })
        .collect();
    departures.sort_by_key(|trip| (trip.departure_time, trip.id.clone()));

    let results = departures
        .into_iter()
        .filter_map(|trip| {
            store.line(trip.line_id).map(|line| {
                json!({
                    "trip_id": trip.id,
                    "line_name": line.name,
                    "scheduled_departure": trip.departure_time.format(DATETIME_FORMAT).to_string(),
                })
            })
        })
        .collect();
    Ok(QueryReport::new(
        QueryId::Q2,
        vec!["trip_id", "line_name", "scheduled_departure"],
        results,
    ))
}
